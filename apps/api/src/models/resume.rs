use serde::{Deserialize, Serialize};

/// ATS compatibility sub-scores, each in [0, 1].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtsScore {
    pub overall_score: f64,
    pub keyword_optimization: f64,
    pub formatting_score: f64,
    pub content_quality: f64,
    pub action_verbs: f64,
    pub metrics_usage: f64,
    pub contact_info: f64,
    pub summary_quality: f64,
    pub experience_detail: f64,
    pub education_relevance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaknessSeverity {
    Low,
    Medium,
    High,
    /// Anything the analyzer sends that we don't recognise.
    #[serde(other)]
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeWeakness {
    pub category: String,
    pub severity: WeaknessSeverity,
    pub description: String,
    pub suggestion: String,
    pub impact: String,
}

/// Structured result of the Job API's resume analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub job_titles: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub ats_score: Option<AtsScore>,
    #[serde(default)]
    pub weaknesses: Vec<ResumeWeakness>,
}

impl ResumeAnalysis {
    /// Text sent to the matcher: summary, skills, then keywords, space-joined.
    pub fn match_query(&self) -> String {
        std::iter::once(self.summary.as_str())
            .chain(self.skills.iter().map(String::as_str))
            .chain(self.keywords.iter().map(String::as_str))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
