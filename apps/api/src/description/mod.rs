//! Job description pipeline: raw text → normalize → excerpt → reformat.
//!
//! Every stage is a pure function of its input. Rendering the same description
//! with the same display state always yields byte-identical output.

pub mod excerpt;
pub mod handlers;
pub mod headings;
pub mod normalize;
pub mod reformat;

use serde::Serialize;

use crate::description::excerpt::{excerpt, DisplayState, DEFAULT_PREVIEW_CHARS};
use crate::description::headings::HeadingCatalog;
use crate::description::normalize::normalize;
use crate::description::reformat::reformat;

/// A description ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDescription {
    /// Full normalized text, before truncation.
    pub normalized: String,
    /// HTML fragment of the visible portion.
    pub html: String,
    pub show_toggle: bool,
    pub expanded: bool,
}

/// Holds the configured heading catalog and preview length.
#[derive(Debug, Clone)]
pub struct DescriptionFormatter {
    headings: HeadingCatalog,
    preview_chars: usize,
}

impl DescriptionFormatter {
    pub fn new(headings: HeadingCatalog, preview_chars: usize) -> Self {
        Self {
            headings,
            preview_chars,
        }
    }

    pub fn preview_chars(&self) -> usize {
        self.preview_chars
    }

    /// Renders a description for a card in the given display state.
    pub fn render(&self, description: Option<&str>, state: &DisplayState) -> RenderedDescription {
        self.render_with_limit(description, state.expanded, self.preview_chars)
    }

    /// Same as [`render`](Self::render) with an explicit preview length.
    pub fn render_with_limit(
        &self,
        description: Option<&str>,
        expanded: bool,
        max_chars: usize,
    ) -> RenderedDescription {
        let normalized = normalize(description);
        let shown = excerpt(&normalized, max_chars, expanded);
        let html = reformat(&shown.text, &self.headings);

        RenderedDescription {
            normalized,
            html,
            show_toggle: shown.show_toggle,
            expanded,
        }
    }
}

impl Default for DescriptionFormatter {
    fn default() -> Self {
        Self::new(HeadingCatalog::default(), DEFAULT_PREVIEW_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_description_renders_empty() {
        let formatter = DescriptionFormatter::default();
        let rendered = formatter.render(None, &DisplayState::default());
        assert_eq!(rendered.normalized, "");
        assert_eq!(rendered.html, "");
        assert!(!rendered.show_toggle);
    }

    #[test]
    fn test_full_pipeline_on_html_posting() {
        let formatter = DescriptionFormatter::default();
        let raw = "<p>Responsibilities</p><ul><li>Build the team\u{e2}\u{20ac}\u{2122}s API</li><li>Write tests</li></ul>";
        let rendered = formatter.render(Some(raw), &DisplayState::default());

        assert_eq!(rendered.normalized, "Responsibilities\n• Build the team's API\n• Write tests");
        assert!(rendered.html.starts_with(r#"<div class="jd-section"><h4 class="jd-section-title">Responsibilities</h4></div><span class="jd-bullet"></span>Build the team's API"#));
        assert!(rendered.html.ends_with(r#"<br><span class="jd-bullet"></span>Write tests"#));
        assert!(!rendered.show_toggle);
    }

    #[test]
    fn test_collapsed_render_truncates_normalized_text() {
        let formatter = DescriptionFormatter::new(HeadingCatalog::default(), 8);
        let raw = "**Senior** engineer wanted for a long time";
        let collapsed = formatter.render(Some(raw), &DisplayState::collapsed("1"));
        // The cut lands before the closing marker, so the opener is dropped.
        assert_eq!(collapsed.html, "Senior...");
        assert!(collapsed.show_toggle);
        assert!(!collapsed.expanded);

        let expanded = formatter.render(Some(raw), &DisplayState::collapsed("1").with_expanded(true));
        assert_eq!(
            expanded.html,
            "<strong>Senior</strong> engineer wanted for a long time"
        );
        assert!(expanded.show_toggle);
        assert_eq!(collapsed.normalized, expanded.normalized);
    }

    #[test]
    fn test_cut_through_bold_tag_leaves_no_markup() {
        let formatter = DescriptionFormatter::new(HeadingCatalog::default(), 12);
        let rendered = formatter.render(
            Some("We use <strong>Rust and Go</strong> daily"),
            &DisplayState::collapsed("3"),
        );
        assert_eq!(rendered.normalized, "We use **Rust and Go** daily");
        assert_eq!(rendered.html, "We use Rus...");
    }

    #[test]
    fn test_bold_tag_across_line_break_leaves_no_markup() {
        let formatter = DescriptionFormatter::default();
        let rendered = formatter.render(
            Some("<strong>Perks<br>Remote</strong>"),
            &DisplayState::default(),
        );
        assert!(!rendered.html.contains("&lt;"));
        assert!(!rendered.html.contains("**"));
        assert!(rendered.html.ends_with("</h4></div>Remote"));
    }

    #[test]
    fn test_render_is_byte_identical_across_calls() {
        let formatter = DescriptionFormatter::default();
        let raw = "About\n&lt;b&gt;Fast&lt;/b&gt; team \u{e2}\u{20ac}\u{201d} remote";
        let state = DisplayState::collapsed("7");
        assert_eq!(formatter.render(Some(raw), &state), formatter.render(Some(raw), &state));
    }

    #[test]
    fn test_explicit_limit_overrides_default() {
        let formatter = DescriptionFormatter::default();
        let rendered = formatter.render_with_limit(Some("abcdef"), false, 3);
        assert_eq!(rendered.html, "abc...");
        assert!(rendered.show_toggle);
    }
}
