use crate::error::{DownloadError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Run configuration, loadable from a TOML file.
///
/// Every field has a default matching the board site the tool was written
/// for, so a config file is only needed to point pinfetch at a different
/// site or tune timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Board URLs must start with one of these prefixes.
    pub allowed_url_prefixes: Vec<String>,
    /// Substring an image URL must contain to count as board content.
    pub image_host: String,
    /// Low-resolution rendition tokens to rewrite.
    pub low_res_tokens: Vec<String>,
    /// High-resolution rendition token substituted in.
    pub high_res_token: String,
    /// WebDriver endpoint the renderer connects to.
    pub webdriver_url: String,
    /// Filename prefix for downloaded images.
    pub file_prefix: String,
    /// Referer header sent with image requests.
    pub referer: String,
    /// Delay after navigation and after each scroll, in milliseconds.
    pub settle_delay_ms: u64,
    /// Delay between image requests, in milliseconds.
    pub request_delay_ms: u64,
    /// Per-request timeout, in seconds.
    pub request_timeout_secs: u64,
    /// Upper bound on scroll iterations.
    pub max_scrolls: usize,
    /// Consecutive no-growth scrolls needed to declare the page stable.
    pub stable_rounds: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            allowed_url_prefixes: vec![
                "https://www.pinterest.com/".to_string(),
                "https://jp.pinterest.com/".to_string(),
                "https://ru.pinterest.com/".to_string(),
            ],
            image_host: "pinimg.com".to_string(),
            low_res_tokens: vec!["/236x/".to_string(), "/564x/".to_string()],
            high_res_token: "/736x/".to_string(),
            webdriver_url: "http://localhost:9515".to_string(),
            file_prefix: "pinterest".to_string(),
            referer: "https://www.pinterest.com/".to_string(),
            settle_delay_ms: 2000,
            request_delay_ms: 500,
            request_timeout_secs: 30,
            max_scrolls: 30,
            stable_rounds: 2,
        }
    }
}

impl RunConfig {
    /// Load a config file, falling back to defaults for absent keys.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| DownloadError::Config(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_target_known_board_site() {
        let config = RunConfig::default();
        assert!(config.allowed_url_prefixes.iter().any(|p| p.contains("pinterest")));
        assert_eq!(config.high_res_token, "/736x/");
    }

    #[test]
    fn test_partial_config_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
allowed_url_prefixes = ["https://boards.example.com/"]
image_host = "img.example.com"
"#
        )
        .unwrap();

        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.allowed_url_prefixes, vec!["https://boards.example.com/"]);
        assert_eq!(config.image_host, "img.example.com");
        // Untouched keys keep their defaults.
        assert_eq!(config.max_scrolls, 30);
        assert_eq!(config.request_delay_ms, 500);
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_scrolls = \"lots\"").unwrap();

        assert!(RunConfig::load(file.path()).is_err());
    }
}
