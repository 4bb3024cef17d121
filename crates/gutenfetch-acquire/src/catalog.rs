use crate::error::FetchError;
use gutenfetch_model::BookId;
use std::time::Duration;

pub const BASE_URL: &str = "https://www.gutenberg.org";

/// Visible text of the anchor that links a work's plain-text rendition.
pub const PLAIN_TEXT_LABEL: &str = "Plain Text UTF-8";

/// Where and how to reach the book catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Scheme and host, without a trailing path (e.g., "https://www.gutenberg.org").
    pub base_url: String,
    /// Bound on the whole metadata page request.
    pub page_timeout: Duration,
    /// Bound on establishing the body connection.
    pub connect_timeout: Duration,
    /// Bound on waiting for body data between reads.
    pub read_timeout: Duration,
    pub user_agent: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            page_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10 * 60),
            read_timeout: Duration::from_secs(10 * 60),
            user_agent: concat!("gutenfetch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Catalog {
    /// Default timeouts against a different host, e.g. a local test server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Metadata page of a work: `{base}/ebooks/{id}`.
    pub fn book_url(&self, id: BookId) -> String {
        format!("{}/ebooks/{id}", self.base_url.trim_end_matches('/'))
    }

    pub(crate) fn page_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.page_timeout)
            .build()
            .map_err(FetchError::Client)
    }

    pub(crate) fn download_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.connect_timeout)
            .read_timeout(self.read_timeout)
            .build()
            .map_err(FetchError::Client)
    }
}
