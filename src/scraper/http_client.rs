use crate::config::FetchConfig;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Transport failure: the fetch itself is fatal, the caller decides what
/// that means. Non-2xx responses are rejected here rather than handed on
/// as garbage markup.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("invalid base url: {0}")]
    BadBaseUrl(#[from] url::ParseError),
}

pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            // Accept cookies so session-based pages work
            .cookie_store(true)
            .build()?;

        Ok(Self { inner })
    }

    /// Fetch a URL as text. One attempt, no retry.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let resp = self.inner.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(resp.text().await?)
    }
}
