//! ATS score presentation: rating labels and the weighted component breakdown.

use serde::Serialize;

use crate::models::resume::AtsScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AtsRating {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl AtsRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            AtsRating::Excellent
        } else if score >= 0.65 {
            AtsRating::Good
        } else if score >= 0.5 {
            AtsRating::Fair
        } else {
            AtsRating::NeedsWork
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AtsRating::Excellent => "Excellent",
            AtsRating::Good => "Good",
            AtsRating::Fair => "Fair",
            AtsRating::NeedsWork => "Needs Work",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtsComponent {
    pub label: &'static str,
    /// Share of the overall score, in percent.
    pub weight_percent: u32,
    pub score: f64,
    pub rating: AtsRating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtsReport {
    pub overall_percent: u32,
    pub rating: AtsRating,
    pub label: &'static str,
    pub breakdown: Vec<AtsComponent>,
}

impl AtsReport {
    pub fn from_score(score: &AtsScore) -> Self {
        let rating = AtsRating::from_score(score.overall_score);
        AtsReport {
            overall_percent: (score.overall_score.clamp(0.0, 1.0) * 100.0).round() as u32,
            rating,
            label: rating.label(),
            breakdown: breakdown(score),
        }
    }
}

/// The eight weighted components, heaviest first. Weights sum to 100.
pub fn breakdown(score: &AtsScore) -> Vec<AtsComponent> {
    [
        ("Keyword Optimization", 25, score.keyword_optimization),
        ("Content Quality", 20, score.content_quality),
        ("Formatting", 15, score.formatting_score),
        ("Action Verbs", 10, score.action_verbs),
        ("Metrics Usage", 10, score.metrics_usage),
        ("Summary Quality", 10, score.summary_quality),
        ("Contact Info", 5, score.contact_info),
        ("Experience Detail", 5, score.experience_detail),
    ]
    .into_iter()
    .map(|(label, weight_percent, score)| AtsComponent {
        label,
        weight_percent,
        score,
        rating: AtsRating::from_score(score),
    })
    .collect()
}
