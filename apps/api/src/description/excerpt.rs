//! Excerpts: the collapsed/expanded view of a normalized description.
//!
//! Truncation counts characters of the normalized text, never of the HTML
//! fragment, so a cut can't land inside a generated tag.

use serde::{Deserialize, Serialize};

use crate::models::job::JobPosting;

/// Characters shown before a description collapses behind "Read more".
pub const DEFAULT_PREVIEW_CHARS: usize = 300;
pub const ELLIPSIS: &str = "...";

/// Text to display and whether the expand/collapse toggle should be offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub text: String,
    pub show_toggle: bool,
}

/// Picks the text to show for a card.
///
/// `show_toggle` depends only on the length, not on `expanded`.
pub fn excerpt(normalized: &str, max_chars: usize, expanded: bool) -> Excerpt {
    let cut = normalized
        .char_indices()
        .nth(max_chars)
        .map(|(byte_index, _)| byte_index);

    match cut {
        None => Excerpt {
            text: normalized.to_string(),
            show_toggle: false,
        },
        Some(_) if expanded => Excerpt {
            text: normalized.to_string(),
            show_toggle: true,
        },
        Some(byte_index) => Excerpt {
            text: format!("{}{ELLIPSIS}", &normalized[..byte_index]),
            show_toggle: true,
        },
    }
}

/// Per-card expansion state. Resets whenever the card shows a different posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub job_id: String,
    pub expanded: bool,
}

impl DisplayState {
    pub fn collapsed(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            expanded: false,
        }
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Points the state at `posting`, collapsing it if the posting changed.
    pub fn sync(&mut self, posting: &JobPosting) {
        if self.job_id != posting.job_id {
            self.job_id = posting.job_id.clone();
            self.expanded = false;
        }
    }
}
