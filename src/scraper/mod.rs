pub mod cleaner;
pub mod http_client;
pub mod parsers;

use crate::config::FetchConfig;
use async_trait::async_trait;
use url::Url;

use self::http_client::{FetchError, HttpClient};

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable listing-page source: one page number in, raw markup out.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<String, FetchError>;
}

// ── Naver listing source ──────────────────────────────────────────────────────

/// Fetches the paginated market listing from Naver Finance. One blocking
/// GET per call; no pagination discovery, no retry.
pub struct NaverListingSource {
    client: HttpClient,
    base_url: String,
}

impl NaverListingSource {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        // The page number is appended as-is, so only the base needs to be
        // a well-formed URL.
        Url::parse(&config.base_url)?;

        Ok(Self {
            client: HttpClient::new(config)?,
            base_url: config.base_url.clone(),
        })
    }

    /// URL for one listing page. e.g. page 3 → `…entryJongmok.nhn?&page=3`
    pub fn page_url(&self, page: u32) -> String {
        format!("{}{}", self.base_url, page)
    }
}

#[async_trait]
impl ListingSource for NaverListingSource {
    async fn fetch_page(&self, page: u32) -> Result<String, FetchError> {
        self.client.get_text(&self.page_url(page)).await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn page_number_is_appended_verbatim() {
        let source = NaverListingSource::new(&AppConfig::default().fetch).unwrap();
        assert_eq!(
            source.page_url(3),
            "https://finance.naver.com/sise/entryJongmok.nhn?&page=3"
        );
    }

    #[test]
    fn bad_base_url_is_rejected_at_construction() {
        let mut fetch = AppConfig::default().fetch;
        fetch.base_url = "not a url".to_string();
        assert!(matches!(
            NaverListingSource::new(&fetch),
            Err(FetchError::BadBaseUrl(_))
        ));
    }
}
