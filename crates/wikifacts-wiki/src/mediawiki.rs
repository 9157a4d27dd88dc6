//! MediaWiki Provider Implementation
//!
//! Fetches plain-text article extracts from a MediaWiki `api.php` endpoint.
//!
//! # Features
//!
//! - Locators given as `/wiki/Title`, full article URLs or bare titles
//! - Redirects followed by the API
//! - Retry logic with exponential backoff for transport and server errors
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use wikifacts_wiki::MediaWikiProvider;
//! use wikifacts_domain::traits::DocumentProvider;
//!
//! # async fn example() -> Result<(), wikifacts_wiki::WikiError> {
//! let provider = MediaWikiProvider::default_endpoint()?;
//! let document = provider.fetch("/wiki/Paris").await?;
//! println!("{} ({} bytes)", document.title(), document.text().len());
//! # Ok(())
//! # }
//! ```

use crate::WikiError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};
use wikifacts_domain::traits::DocumentProvider;
use wikifacts_domain::Document;

/// Default MediaWiki API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Default timeout for API requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Longest wait between two attempts
pub const MAX_BACKOFF: Duration = Duration::from_secs(60);

pub(crate) const USER_AGENT: &str = concat!("wikifacts/", env!("CARGO_PKG_VERSION"));

/// Document provider backed by the MediaWiki query API
#[derive(Debug, Clone)]
pub struct MediaWikiProvider {
    endpoint: String,
    client: reqwest::Client,
    max_retries: u32,
    backoff: Duration,
}

#[derive(Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
}

#[derive(Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: BTreeMap<String, Page>,
}

#[derive(Deserialize)]
struct Page {
    pageid: Option<u64>,
    title: String,
    extract: Option<String>,
    /// Present (as an empty string) for pages that do not exist
    missing: Option<serde_json::Value>,
    /// Present for titles the wiki cannot represent
    invalid: Option<serde_json::Value>,
}

impl MediaWikiProvider {
    /// Create a new MediaWiki provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: full `api.php` URL (e.g., "https://en.wikipedia.org/w/api.php")
    /// - `timeout`: per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, WikiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WikiError::Communication(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Duration::from_secs(1),
        })
    }

    /// Create a provider for English Wikipedia with default settings
    pub fn default_endpoint() -> Result<Self, WikiError> {
        Self::new(DEFAULT_ENDPOINT, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the first backoff delay; later delays double
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// The API endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the plain-text extract of `title`
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The page does not exist (`NotFound`)
    /// - The API answers with a client error or an unexpected body
    /// - Network communication keeps failing after all retries
    pub async fn fetch_title(&self, title: &str) -> Result<Document, WikiError> {
        let params = [
            ("format", "json"),
            ("action", "query"),
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("titles", title),
            ("origin", "*"),
        ];

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.get(&self.endpoint).query(&params).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.json::<QueryResponse>().await.map_err(|e| {
                            WikiError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        return Self::document_from(body, title);
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(WikiError::NotFound(title.to_string()));
                    } else if status.is_client_error() {
                        return Err(WikiError::InvalidResponse(format!("HTTP {}", status)));
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(WikiError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(WikiError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = self.backoff_delay(attempts);
                warn!("Fetching '{}' failed, retrying in {:?}", title, delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| WikiError::Communication("Max retries exceeded".to_string())))
    }

    /// Exponential backoff (1x, 2x, 4x, ...) before retry `attempt`, capped at [`MAX_BACKOFF`]
    fn backoff_delay(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt.saturating_sub(1))
            .and_then(|factor| self.backoff.checked_mul(factor))
            .map_or(MAX_BACKOFF, |delay| delay.min(MAX_BACKOFF))
    }

    fn document_from(body: QueryResponse, requested: &str) -> Result<Document, WikiError> {
        let page = body
            .query
            .and_then(|q| q.pages.into_values().next())
            .ok_or_else(|| WikiError::NotFound(requested.to_string()))?;

        if page.missing.is_some() || page.invalid.is_some() {
            return Err(WikiError::NotFound(page.title));
        }

        let pageid = page.pageid.ok_or_else(|| {
            WikiError::InvalidResponse(format!("Page '{}' has no pageid", page.title))
        })?;

        debug!("Fetched '{}' (pageid {})", page.title, pageid);
        Ok(Document::new(page.title, pageid, page.extract.unwrap_or_default()))
    }
}

/// Resolve a locator into an article title
///
/// Accepts `/wiki/Title`, `https://host/wiki/Title` or a bare title.
/// Percent-escapes are decoded, underscores become spaces, and any
/// `#section` suffix is dropped.
pub fn title_from_locator(locator: &str) -> Option<String> {
    let locator = locator.trim();
    let raw = match locator.rfind("/wiki/") {
        Some(at) => &locator[at + "/wiki/".len()..],
        None => locator,
    };
    let raw = raw.split('#').next().unwrap_or_default();

    let decoded = urlencoding::decode(raw)
        .map(|title| title.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    let title = decoded.replace('_', " ").trim().to_string();

    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

impl DocumentProvider for MediaWikiProvider {
    type Error = WikiError;

    async fn fetch(&self, locator: &str) -> Result<Document, WikiError> {
        let title = title_from_locator(locator)
            .ok_or_else(|| WikiError::NotFound(locator.to_string()))?;
        self.fetch_title(&title).await
    }
}
