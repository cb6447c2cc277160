//! Normalizer: repairs double-encoded text, decodes HTML entities and flattens
//! markup into plain text with explicit line breaks and bullet markers.
//!
//! Job boards hand us descriptions that went through at least one bad
//! UTF-8 → Windows-1252 → UTF-8 round trip, sometimes with HTML escaped on top.
//! Everything here is a literal, ordered substitution. Order matters: the
//! three-character `â€X` sequences must be resolved before the `â€` fallback
//! would consume their first two characters.

use std::sync::LazyLock;

use regex::Regex;

/// Mojibake sequences (UTF-8 bytes decoded as Windows-1252) and their repair.
/// Longest, most specific sequences first.
const MOJIBAKE: &[(&str, &str)] = &[
    ("\u{e2}\u{20ac}\u{2122}", "'"),        // â€™  right single quote
    ("\u{e2}\u{20ac}\u{2dc}", "'"),         // â€˜  left single quote
    ("\u{e2}\u{20ac}\u{153}", "\""),        // â€œ  left double quote
    ("\u{e2}\u{20ac}\u{9d}", "\""),         // â€\x9d right double quote
    ("\u{e2}\u{20ac}\u{201d}", "\u{2014}"), // â€”  em dash
    ("\u{e2}\u{20ac}\u{201c}", "\u{2013}"), // â€“  en dash
    ("\u{e2}\u{20ac}\u{a6}", "\u{2026}"),   // â€¦  ellipsis
    ("\u{e2}\u{20ac}\u{a2}", "\u{2022}"),   // â€¢  bullet
    ("\u{e2}\u{201e}\u{a2}", "\u{2122}"),   // â„¢  trademark
    ("\u{c3}\u{a9}", "é"),
    ("\u{c3}\u{a1}", "á"),
    ("\u{c3}\u{ad}", "í"),
    ("\u{c3}\u{b3}", "ó"),
    ("\u{c3}\u{ba}", "ú"),
    ("\u{c3}\u{b1}", "ñ"),
    ("\u{c3}\u{bc}", "ü"),
    ("\u{c3}\u{b6}", "ö"),
    ("\u{c3}\u{a4}", "ä"),
    ("\u{c3}\u{a8}", "è"),
    ("\u{c3}\u{a7}", "ç"),
    ("\u{c3}\u{2030}", "É"),
    ("\u{c3}\u{81}", "Á"),
    ("\u{c3}\u{201c}", "Ó"),
    ("\u{c3}\u{161}", "Ú"),
    ("\u{c3}\u{2018}", "Ñ"),
    ("\u{c2}\u{a0}", " "), // Â + no-break space
];

/// Whatever is left of a broken `â€X` sequence once the table has run.
/// The original character is unknowable; an em dash is the most common culprit.
const BROKEN_LEAD: &str = "\u{e2}\u{20ac}";
const BROKEN_LEAD_REPLACEMENT: &str = "\u{2014}";

/// `&amp;` goes last so `&amp;lt;` decodes in two passes rather than one.
const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#x27;", "'"),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
    ("&amp;", "&"),
];

static BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("BREAK_TAG regex should compile"));
static PARAGRAPH_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</p\s*>\s*<p\b[^>]*>").expect("PARAGRAPH_BOUNDARY regex should compile")
});
static PARAGRAPH_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?p\b[^>]*>").expect("PARAGRAPH_TAG regex should compile"));
static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:div|ul|ol)\b[^>]*>").expect("BLOCK_TAG regex should compile")
});
static LIST_ITEM_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li\b[^>]*>").expect("LIST_ITEM_OPEN regex should compile"));
static LIST_ITEM_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</li\s*>").expect("LIST_ITEM_CLOSE regex should compile"));
static STRONG_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:b|strong)\b[^<>]*>([^\n]+?)</(?:b|strong)\s*>")
        .expect("STRONG_TAG regex should compile")
});
static EM_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:i|em)\b[^<>]*>([^\n]+?)</(?:i|em)\s*>").expect("EM_TAG regex should compile")
});
/// Presentational HTML with no text meaning. Anything else in angle brackets,
/// such as `<jobs@acme.com>` or `<your name>`, is left for the re-formatter
/// to escape.
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(?:a|abbr|article|b|blockquote|body|center|code|em|font|footer|h[1-6]|head|header|hr|html|i|img|main|meta|pre|script|section|small|span|strong|style|sub|sup|table|tbody|td|tfoot|th|thead|tr|u)\b[^<>]*>",
    )
    .expect("HTML_TAG regex should compile")
});
/// A lone `Â` before whitespace or at the end is the residue of a broken
/// no-break space. Elsewhere it may be a real letter (`Âmbito`).
static STRAY_LEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{c2}(\s|$)").expect("STRAY_LEAD regex should compile"));
static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("EXCESS_NEWLINES regex should compile"));

/// Normalizes a raw job description. Absent input yields an empty string.
///
/// Never fails: sequences no rule recognises pass through untouched.
pub fn normalize(description: Option<&str>) -> String {
    let Some(raw) = description else {
        return String::new();
    };
    if raw.is_empty() {
        return String::new();
    }

    // Stripping a tag can join the halves of an entity or a mojibake
    // sequence, so the stages repeat until the text settles. Every rule
    // removes markup or shortens the text.
    let mut text = raw.replace("\r\n", "\n").replace('\r', "\n");
    loop {
        let next = flatten_markup(&decode_entities(&repair_mojibake(&text)));
        if next == text {
            break;
        }
        text = next;
    }

    EXCESS_NEWLINES
        .replace_all(&text, "\n\n")
        .trim()
        .to_string()
}

/// Applies the mojibake table, then the broken-lead-byte fallbacks.
pub fn repair_mojibake(text: &str) -> String {
    let mut repaired = text.to_string();
    for (garbled, intended) in MOJIBAKE {
        if repaired.contains(garbled) {
            repaired = repaired.replace(garbled, intended);
        }
    }
    if repaired.contains(BROKEN_LEAD) {
        repaired = repaired.replace(BROKEN_LEAD, BROKEN_LEAD_REPLACEMENT);
    }
    STRAY_LEAD.replace_all(&repaired, "${1}").into_owned()
}

/// Decodes the entity table until nothing changes, so double-escaped input
/// (`&amp;quot;`) cannot leave an entity behind.
pub fn decode_entities(text: &str) -> String {
    let mut decoded = text.to_string();
    loop {
        let next = ENTITIES
            .iter()
            .fold(decoded.clone(), |acc, (entity, ch)| acc.replace(entity, ch));
        // Every replacement shrinks the string, so this terminates.
        if next == decoded {
            return decoded;
        }
        decoded = next;
    }
}

/// Turns block markup into newlines and bullets, and inline emphasis into
/// `**`/`*` markers. Emphasis that does not close on the same line is dropped
/// along with the other presentational tags.
fn flatten_markup(text: &str) -> String {
    let text = BREAK_TAG.replace_all(text, "\n");
    let text = PARAGRAPH_BOUNDARY.replace_all(&text, "\n\n");
    let text = PARAGRAPH_TAG.replace_all(&text, "");
    let text = BLOCK_TAG.replace_all(&text, "\n");
    let text = LIST_ITEM_OPEN.replace_all(&text, "\u{2022} ");
    let text = LIST_ITEM_CLOSE.replace_all(&text, "\n");
    let text = STRONG_TAG.replace_all(&text, "**${1}**");
    let text = EM_TAG.replace_all(&text, "*${1}*");

    HTML_TAG.replace_all(&text, "").into_owned()
}
