use std::time::Duration;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::{Result, TranscriptError};

/// Transport used by [`crate::TranscriptFetcher`] for its two GET requests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the response body as text. Transport errors and
    /// non-success statuses are reported as [`TranscriptError::NetworkFailure`].
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        let accept_language = reqwest::header::HeaderValue::from_str(&config.accept_language)
            .map_err(|e| TranscriptError::Config(format!("invalid accept_language: {}", e)))?;
        headers.insert(reqwest::header::ACCEPT_LANGUAGE, accept_language);

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranscriptError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn check_http_errors(response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptError::NetworkFailure(
                "HTTP 429: the platform is rate limiting requests".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(TranscriptError::NetworkFailure(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TranscriptError::NetworkFailure(format!("request failed: {}", e)))?;

        Self::check_http_errors(&response)?;

        response
            .text()
            .await
            .map_err(|e| TranscriptError::NetworkFailure(format!("failed to read body: {}", e)))
    }
}
