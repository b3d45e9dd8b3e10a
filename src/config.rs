use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for a search run.
///
/// Every field has a documented default, so an empty JSON object is a
/// valid configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// URL of the news site to open
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Directory downloaded images are written to
    #[serde(default = "default_image_dir")]
    pub image_dir: String,

    /// Directory the CSV output is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Navigation attempts before giving up on the site
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Seconds to wait before the first navigation retry; doubles on
    /// each further retry
    #[serde(default = "default_backoff_base_secs")]
    pub backoff_base_secs: u64,

    /// Milliseconds to wait for the page to settle after each "show
    /// more" expansion
    #[serde(default = "default_settle_timeout_ms")]
    pub settle_timeout_ms: u64,

    /// Milliseconds to wait for a required control to appear
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,

    /// Safety cap on "show more" expansions for a single run
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            image_dir: default_image_dir(),
            output_dir: default_output_dir(),
            webdriver_url: default_webdriver_url(),
            retry_count: default_retry_count(),
            backoff_base_secs: default_backoff_base_secs(),
            settle_timeout_ms: default_settle_timeout_ms(),
            wait_timeout_ms: default_wait_timeout_ms(),
            max_expansions: default_max_expansions(),
        }
    }
}

impl SearchConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

fn default_site_url() -> String {
    "https://www.nytimes.com/".to_string()
}

fn default_image_dir() -> String {
    "output/images".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_retry_count() -> u32 {
    3
}

fn default_backoff_base_secs() -> u64 {
    5
}

fn default_settle_timeout_ms() -> u64 {
    2000
}

fn default_wait_timeout_ms() -> u64 {
    10000
}

fn default_max_expansions() -> usize {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gets_all_defaults() {
        let config = SearchConfig::from_json("{}").unwrap();
        assert_eq!(config.site_url, "https://www.nytimes.com/");
        assert_eq!(config.image_dir, "output/images");
        assert_eq!(config.output_dir, "output");
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.retry_count, 3);
        assert_eq!(config.backoff_base_secs, 5);
        assert_eq!(config.settle_timeout_ms, 2000);
        assert_eq!(config.wait_timeout_ms, 10000);
        assert_eq!(config.max_expansions, 500);
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let config =
            SearchConfig::from_json(r#"{"retry_count": 5, "image_dir": "pics"}"#).unwrap();
        assert_eq!(config.retry_count, 5);
        assert_eq!(config.image_dir, "pics");
        assert_eq!(config.backoff_base_secs, 5);
    }

    #[test]
    fn test_default_matches_empty_json() {
        let from_json = SearchConfig::from_json("{}").unwrap();
        let from_default = SearchConfig::default();
        assert_eq!(from_json.site_url, from_default.site_url);
        assert_eq!(from_json.max_expansions, from_default.max_expansions);
    }
}
