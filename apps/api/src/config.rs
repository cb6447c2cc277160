use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::description::excerpt::DEFAULT_PREVIEW_CHARS;
use crate::description::headings::HeadingCatalog;

const DEFAULT_JOB_API_BASE_URL: &str = "http://localhost:8000";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub job_api_base_url: String,
    pub port: u16,
    pub rust_log: String,
    pub description_preview_chars: usize,
    pub section_headings_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let preview_chars = match lookup("DESCRIPTION_PREVIEW_CHARS") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .context("DESCRIPTION_PREVIEW_CHARS must be a positive integer")?,
            None => DEFAULT_PREVIEW_CHARS,
        };
        if preview_chars == 0 {
            bail!("DESCRIPTION_PREVIEW_CHARS must be greater than zero");
        }

        Ok(Config {
            job_api_base_url: lookup("JOB_API_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_JOB_API_BASE_URL.to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            description_preview_chars: preview_chars,
            section_headings_file: lookup("SECTION_HEADINGS_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// The configured heading catalog, or the built-in one.
    pub fn heading_catalog(&self) -> Result<HeadingCatalog> {
        match &self.section_headings_file {
            Some(path) => HeadingCatalog::from_file(path),
            None => Ok(HeadingCatalog::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.job_api_base_url, "http://localhost:8000");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.description_preview_chars, 300);
        assert!(config.section_headings_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("JOB_API_BASE_URL", "https://jobs.internal"),
            ("PORT", "9000"),
            ("DESCRIPTION_PREVIEW_CHARS", "450"),
            ("SECTION_HEADINGS_FILE", "/etc/jobfeed/headings.txt"),
        ])
        .unwrap();
        assert_eq!(config.job_api_base_url, "https://jobs.internal");
        assert_eq!(config.port, 9000);
        assert_eq!(config.description_preview_chars, 450);
        assert_eq!(
            config.section_headings_file,
            Some(PathBuf::from("/etc/jobfeed/headings.txt"))
        );
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("DESCRIPTION_PREVIEW_CHARS", "0")]).is_err());
        assert!(config_from(&[("DESCRIPTION_PREVIEW_CHARS", "-5")]).is_err());
    }

    #[test]
    fn test_heading_catalog_defaults_to_builtin() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.heading_catalog().unwrap(), HeadingCatalog::default());
    }

    #[test]
    fn test_heading_catalog_loads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Life at Acme").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = config_from(&[("SECTION_HEADINGS_FILE", path.as_str())]).unwrap();
        let catalog = config.heading_catalog().unwrap();
        assert!(catalog.is_heading("Life at Acme"));
        assert!(!catalog.is_heading("Benefits"));
    }
}
