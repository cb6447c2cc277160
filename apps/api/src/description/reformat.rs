//! Re-formatter: turns normalized description text into a small HTML fragment.
//!
//! The fragment only ever contains `<br>`, `<strong>`, `<em>`, `<div>`, `<h4>`
//! and `<span>`. Every piece of description text is escaped before any of those
//! tags are introduced, so nothing in the input can smuggle markup through.

use std::sync::LazyLock;

use html_escape::encode_double_quoted_attribute;
use regex::Regex;

use crate::description::headings::HeadingCatalog;

pub const LINE_BREAK: &str = "<br>";
const SECTION_OPEN: &str = r#"<div class="jd-section"><h4 class="jd-section-title">"#;
const SECTION_CLOSE: &str = "</h4></div>";
const BULLET_MARKER: &str = r#"<span class="jd-bullet"></span>"#;
const BULLET_PREFIX: &str = "\u{2022} ";

static STRONG_MARKDOWN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("STRONG_MARKDOWN regex should compile"));
static EM_MARKDOWN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+?)\*").expect("EM_MARKDOWN regex should compile"));
static BREAKS_BEFORE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:<br>\s*)+(<div class="jd-section">)"#)
        .expect("BREAKS_BEFORE_SECTION regex should compile")
});
static BREAKS_AFTER_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(</h4></div>)(?:\s*<br>)+").expect("BREAKS_AFTER_SECTION regex should compile")
});
static EXCESS_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:<br>){3,}").expect("EXCESS_BREAKS regex should compile"));

/// Renders normalized text as an HTML fragment, promoting whole-line section
/// titles from `headings` to heading blocks.
pub fn reformat(text: &str, headings: &HeadingCatalog) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut html = String::with_capacity(text.len() + text.len() / 4);
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            html.push_str(LINE_BREAK);
        }
        if headings.is_heading(line) {
            html.push_str(SECTION_OPEN);
            html.push_str(&encode_double_quoted_attribute(line.trim()));
            html.push_str(SECTION_CLOSE);
        } else {
            html.push_str(&format_line(line));
        }
    }

    tidy_breaks(&html)
}

fn format_line(line: &str) -> String {
    // Escapes `&`, `<`, `>` and `"`.
    let escaped = encode_double_quoted_attribute(line);

    let (bulleted, body) = match escaped.trim_start().strip_prefix(BULLET_PREFIX) {
        Some(rest) => (true, rest),
        None => (false, &*escaped),
    };

    // A bold marker left unpaired (cut off by the excerpt) is dropped.
    let body = STRONG_MARKDOWN
        .replace_all(body, "<strong>${1}</strong>")
        .replace("**", "");
    let body = EM_MARKDOWN.replace_all(&body, "<em>${1}</em>");

    if bulleted {
        format!("{BULLET_MARKER}{body}")
    } else {
        body.into_owned()
    }
}

/// Section blocks carry their own spacing, so breaks hugging them go.
fn tidy_breaks(html: &str) -> String {
    let html = BREAKS_BEFORE_SECTION.replace_all(html, "${1}");
    let html = BREAKS_AFTER_SECTION.replace_all(&html, "${1}");
    EXCESS_BREAKS
        .replace_all(&html, "<br><br>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str) -> String {
        reformat(text, &HeadingCatalog::default())
    }

    #[test]
    fn test_empty_text_renders_empty() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_newlines_become_breaks() {
        assert_eq!(render("one\ntwo\n\nthree"), "one<br>two<br><br>three");
    }

    #[test]
    fn test_heading_line_is_promoted_without_trailing_break() {
        let html = render("Responsibilities\nBuild features\nWrite tests");
        assert_eq!(
            html,
            format!("{SECTION_OPEN}Responsibilities{SECTION_CLOSE}Build features<br>Write tests")
        );
    }

    #[test]
    fn test_breaks_before_heading_are_removed() {
        let html = render("We are hiring.\n\nRequirements:\n• Rust");
        assert_eq!(
            html,
            format!(
                "We are hiring.{SECTION_OPEN}Requirements:{SECTION_CLOSE}{BULLET_MARKER}Rust"
            )
        );
    }

    #[test]
    fn test_heading_phrase_mid_sentence_is_not_promoted() {
        let html = render("We value strong Requirements gathering skills");
        assert_eq!(html, "We value strong Requirements gathering skills");
        assert!(!html.contains("<h4"));
    }

    #[test]
    fn test_bullet_line_gets_marker() {
        let html = render("• Own the roadmap");
        assert!(html.starts_with(BULLET_MARKER));
        assert_eq!(html, format!("{BULLET_MARKER}Own the roadmap"));
    }

    #[test]
    fn test_every_bullet_line_gets_marker() {
        let html = render("• One\n• Two");
        assert_eq!(html, format!("{BULLET_MARKER}One<br>{BULLET_MARKER}Two"));
    }

    #[test]
    fn test_markdown_emphasis() {
        assert_eq!(
            render("**Remote** role, *async* team"),
            "<strong>Remote</strong> role, <em>async</em> team"
        );
    }

    #[test]
    fn test_unpaired_bold_marker_is_dropped() {
        assert_eq!(render("We use **Rus..."), "We use Rus...");
        assert_eq!(render("**Perks\nRemote**"), "Perks<br>Remote");
    }

    #[test]
    fn test_bracketed_address_is_escaped_not_lost() {
        assert_eq!(render("Apply at <jobs@acme.com>"), "Apply at &lt;jobs@acme.com&gt;");
    }

    #[test]
    fn test_raw_markup_is_escaped() {
        let html = render("<script>alert(\"x\")</script> & more");
        assert_eq!(
            html,
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; more"
        );
    }

    #[test]
    fn test_unbalanced_asterisk_is_left_alone() {
        assert_eq!(render("5* rating"), "5* rating");
    }

    #[test]
    fn test_excess_breaks_collapse_to_two() {
        assert_eq!(render("a\n \n\n\nb"), "a<br> <br><br>b");
        assert_eq!(render("a\n\n\n\nb"), "a<br><br>b");
    }

    #[test]
    fn test_custom_catalog_is_used() {
        let catalog = HeadingCatalog::new(["Life at Acme"]);
        let html = reformat("Life at Acme\nFree lunch\nBenefits", &catalog);
        assert_eq!(
            html,
            format!("{SECTION_OPEN}Life at Acme{SECTION_CLOSE}Free lunch<br>Benefits")
        );
    }

    #[test]
    fn test_reformat_is_deterministic() {
        let text = "About\n• **Rust** & Go\nPerks:\nRemote";
        assert_eq!(render(text), render(text));
    }
}
