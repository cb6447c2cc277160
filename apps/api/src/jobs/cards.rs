//! Job cards: the display model the frontend renders for each posting.

use serde::Serialize;

use crate::description::excerpt::DisplayState;
use crate::description::{DescriptionFormatter, RenderedDescription};
use crate::models::job::JobPosting;

/// Tag chips shown before collapsing the rest into "+N more".
pub const MAX_VISIBLE_TAGS: usize = 6;
/// Placeholder the upstream sends when a listing has no salary.
const EMPTY_SALARY: &str = "$0-$0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Strong,   // ≥ 70%
    Moderate, // 50 – 69%
    Weak,
}

impl MatchTier {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            70.. => MatchTier::Strong,
            50..=69 => MatchTier::Moderate,
            _ => MatchTier::Weak,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub match_percent: u32,
    pub semantic_percent: u32,
    pub keyword_percent: u32,
    pub tier: MatchTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCard {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub tags: Vec<String>,
    pub hidden_tag_count: usize,
    pub salary: Option<String>,
    pub posted_date: Option<String>,
    pub url: Option<String>,
    pub description: RenderedDescription,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_summary: Option<MatchSummary>,
}

impl JobCard {
    /// Builds the card for `posting`. `state` is synced to the posting first,
    /// so a state left over from another card renders collapsed.
    pub fn build(
        posting: &JobPosting,
        formatter: &DescriptionFormatter,
        state: &DisplayState,
        show_match: bool,
    ) -> Self {
        let mut state = state.clone();
        state.sync(posting);

        let tags: Vec<&str> = posting
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();

        JobCard {
            job_id: posting.job_id.clone(),
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            tags: tags
                .iter()
                .take(MAX_VISIBLE_TAGS)
                .map(|t| capitalize_tag(t))
                .collect(),
            hidden_tag_count: tags.len().saturating_sub(MAX_VISIBLE_TAGS),
            salary: visible_salary(posting.salary.as_deref()),
            posted_date: posting.posted_date.clone(),
            url: posting.url.clone(),
            description: formatter.render(posting.description.as_deref(), &state),
            match_summary: show_match.then(|| match_summary(posting)),
        }
    }
}

/// Builds one card per posting, all in the same expansion mode.
pub fn build_cards(
    postings: &[JobPosting],
    formatter: &DescriptionFormatter,
    expanded: bool,
    show_match: bool,
) -> Vec<JobCard> {
    postings
        .iter()
        .map(|posting| {
            let state = DisplayState::collapsed(posting.job_id.as_str()).with_expanded(expanded);
            JobCard::build(posting, formatter, &state, show_match)
        })
        .collect()
}

/// First character upper-cased, the rest lower-cased.
fn capitalize_tag(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

fn visible_salary(salary: Option<&str>) -> Option<String> {
    salary
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != EMPTY_SALARY)
        .map(str::to_string)
}

fn percent(score: Option<f64>) -> u32 {
    (score.unwrap_or(0.0).clamp(0.0, 1.0) * 100.0).round() as u32
}

fn match_summary(posting: &JobPosting) -> MatchSummary {
    let match_percent = percent(posting.match_score);
    MatchSummary {
        match_percent,
        semantic_percent: percent(posting.semantic_score),
        keyword_percent: percent(posting.keyword_score),
        tier: MatchTier::from_percent(match_percent),
    }
}
