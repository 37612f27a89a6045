use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chunker::DEFAULT_PARAGRAPH_TARGET;
use crate::error::{Result, TranscriptError};

pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";
pub const DEFAULT_USER_AGENT: &str = "TranscriptDownloader/1.0 (+https://github.com)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Client settings. Every field is optional in a YAML file; missing ones
/// take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme and host the watch page is requested from
    pub base_url: String,
    pub user_agent: String,
    pub accept_language: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Target paragraph length in characters
    pub paragraph_target: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            paragraph_target: DEFAULT_PARAGRAPH_TARGET,
        }
    }
}

impl ClientConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(content)
            .map_err(|e| TranscriptError::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranscriptError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| TranscriptError::Config(format!("invalid base_url {:?}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TranscriptError::Config(
                "base_url must use http or https".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(TranscriptError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.paragraph_target == 0 {
            return Err(TranscriptError::Config(
                "paragraph_target must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn watch_url(&self, video_id: &str) -> String {
        format!(
            "{}/watch?v={}&hl=en",
            self.base_url.trim_end_matches('/'),
            video_id
        )
    }
}
