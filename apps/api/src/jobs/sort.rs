//! Job list orderings offered by the search and match views.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::job::JobPosting;

static SALARY_FIGURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(k)?").expect("SALARY_FIGURE regex should compile")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Keep the upstream order.
    #[default]
    #[serde(alias = "default")]
    None,
    /// Most recently posted first.
    Latest,
    /// Highest match score first.
    Relevance,
    /// Highest salary floor first.
    Salary,
}

/// Returns a sorted copy. Sorts are stable, so ties keep upstream order.
pub fn sort_jobs(jobs: &[JobPosting], order: SortOrder) -> Vec<JobPosting> {
    let mut sorted = jobs.to_vec();
    match order {
        SortOrder::None => {}
        SortOrder::Latest => sorted.sort_by_key(|job| {
            std::cmp::Reverse(job.posted_at().map(|ts| ts.timestamp()).unwrap_or(0))
        }),
        SortOrder::Relevance => sorted.sort_by(|a, b| {
            descending(a.match_score.unwrap_or(0.0), b.match_score.unwrap_or(0.0))
        }),
        SortOrder::Salary => sorted.sort_by(|a, b| descending(salary_key(a), salary_key(b))),
    }
    sorted
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Lower bound when it is positive, otherwise the upper bound, otherwise 0.
fn salary_key(job: &JobPosting) -> f64 {
    let (min, max) = job
        .salary
        .as_deref()
        .map(salary_bounds)
        .unwrap_or((None, None));
    min.filter(|v| *v > 0.0).or(max).unwrap_or(0.0)
}

/// Parses the first two figures of a free-text salary range such as
/// `"$80,000 - $120,000"` or `"90k-110k"`.
pub fn salary_bounds(salary: &str) -> (Option<f64>, Option<f64>) {
    let mut figures = SALARY_FIGURE.captures_iter(salary).filter_map(|caps| {
        let value: f64 = caps[1].replace(',', "").parse().ok()?;
        Some(if caps.get(2).is_some() { value * 1000.0 } else { value })
    });
    let min = figures.next();
    let max = figures.next();
    (min, max)
}
