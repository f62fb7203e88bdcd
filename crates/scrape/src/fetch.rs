//! HTTP retrieval of bookmark pages.
//!
//! [`PageFetcher`] issues a single GET per URL with a fixed timeout and no
//! retry. Retry pressure comes from the refresh job itself: a failed URL is
//! picked up again on a later run until its failure ceiling is reached.

use std::time::Duration;

use reqwest::StatusCode;

/// HTTP request timeout for a single page fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for page-fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server reported the content permanently removed (HTTP 410).
    #[error("Content removed upstream (HTTP 410)")]
    Gone,

    /// Any other non-200 status code.
    #[error("Fetch returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

/// A successfully retrieved page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Value of the `Content-Type` response header, empty when absent.
    pub content_type: String,
    /// Response body decoded as text.
    pub body: String,
}

/// Retrieves bookmark pages over HTTP.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Create a new fetcher with a pre-configured HTTP client.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client }
    }

    /// Fetch a single URL.
    ///
    /// Only HTTP 200 yields a [`FetchedPage`]. 410 maps to
    /// [`FetchError::Gone`] so callers can log removals distinctly; every
    /// other status maps to [`FetchError::HttpStatus`].
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let content_type = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let body = response.text().await?;
                Ok(FetchedPage { content_type, body })
            }
            StatusCode::GONE => Err(FetchError::Gone),
            status => Err(FetchError::HttpStatus(status.as_u16())),
        }
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
