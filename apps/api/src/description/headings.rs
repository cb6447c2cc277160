//! Section heading catalog: the recruiting-domain phrases promoted to headings
//! when they occupy a whole line of a description.
//!
//! Deployments supply their own list via `SECTION_HEADINGS_FILE`; the built-in
//! list covers the phrases common to most job boards.

use std::path::Path;

use anyhow::{bail, Context, Result};

/// Built-in heading phrases, in match priority order.
pub const DEFAULT_SECTION_HEADINGS: &[&str] = &[
    "Key Responsibilities",
    "Responsibilities",
    "What We Offer",
    "What You'll Do",
    "What You'll Get",
    "Skills & Experience",
    "Skills and Experience",
    "Requirements",
    "Qualifications",
    "Benefits",
    "Perks",
    "About",
    "About This Role",
    "About the Role",
    "Job Description",
    "Overview",
    "Additional Information",
    "Additional Details",
    "Company",
    "Location",
    "Salary",
    "Compensation",
    "Why Join Us",
    "Why Work With Us",
    "What We're Looking For",
    "What We Need",
    "Your Role",
    "The Role",
    "Position",
    "Opportunity",
    "Details",
    "Summary",
    "Description",
];

/// Ordered list of heading phrases. The first phrase equal to a line wins.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCatalog {
    phrases: Vec<String>,
    /// Case- and apostrophe-folded copies of `phrases`, same order.
    folded: Vec<String>,
}

impl HeadingCatalog {
    /// Builds a catalog from phrases. Blank entries are dropped.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        let folded = phrases.iter().map(|p| fold(p)).collect();
        Self { phrases, folded }
    }

    /// Loads one phrase per line. Blank lines and `#` comments are ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read section headings from {}", path.display()))?;

        let catalog = Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );

        if catalog.is_empty() {
            bail!("Section headings file {} contains no phrases", path.display());
        }
        Ok(catalog)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Returns the catalog phrase matching the whole line, if any.
    ///
    /// The line is trimmed and may carry one trailing colon. Matching ignores
    /// case and treats a typographic apostrophe as a plain one.
    pub fn find(&self, line: &str) -> Option<&str> {
        let candidate = line.trim();
        let candidate = candidate.strip_suffix(':').unwrap_or(candidate).trim_end();
        if candidate.is_empty() {
            return None;
        }

        let candidate = fold(candidate);
        self.folded
            .iter()
            .position(|phrase| *phrase == candidate)
            .map(|index| self.phrases[index].as_str())
    }

    pub fn is_heading(&self, line: &str) -> bool {
        self.find(line).is_some()
    }
}

impl Default for HeadingCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_HEADINGS)
    }
}

fn fold(phrase: &str) -> String {
    phrase.to_lowercase().replace('\u{2019}', "'")
}
