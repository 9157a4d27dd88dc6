//! Wikifacts Document Provider Layer
//!
//! Implementations of the `DocumentProvider` trait from `wikifacts-domain`,
//! plus the ranking-page harvest that produces locators to ingest.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic in-memory provider for testing
//! - `MediaWikiProvider`: MediaWiki `api.php` plain-text extracts
//!
//! # Examples
//!
//! ```
//! use wikifacts_wiki::MockProvider;
//! use wikifacts_domain::traits::DocumentProvider;
//! use wikifacts_domain::Document;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = MockProvider::new()
//!     .with_document("/wiki/Paris", Document::new("Paris", 1, "Paris is big."));
//! let document = provider.fetch("/wiki/Paris").await.unwrap();
//! assert_eq!(document.title(), "Paris");
//! # }
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod harvest;
pub mod mediawiki;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use wikifacts_domain::traits::{DocumentProvider, ProviderError};
use wikifacts_domain::Document;

pub use cache::UrlCache;
pub use harvest::{harvest_links, RankingHarvester};
pub use mediawiki::{title_from_locator, MediaWikiProvider};

/// Errors that can occur while fetching documents or harvesting links
#[derive(Error, Debug)]
pub enum WikiError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The locator does not resolve to a page
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected response from the server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Page markup lacks the expected structure
    #[error("HTML error: {0}")]
    Html(String),

    /// Cache file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache file could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProviderError for WikiError {
    fn is_not_found(&self) -> bool {
        matches!(self, WikiError::NotFound(_))
    }
}

/// Mock document provider for deterministic testing
///
/// Serves pre-configured documents by exact locator without any network
/// calls. Unknown locators fail with `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    documents: HashMap<String, Document>,
    failing: HashSet<String>,
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create an empty MockProvider
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `locator`
    pub fn with_document(mut self, locator: impl Into<String>, document: Document) -> Self {
        self.documents.insert(locator.into(), document);
        self
    }

    /// Configure a communication failure for `locator`
    pub fn with_error(mut self, locator: impl Into<String>) -> Self {
        self.failing.insert(locator.into());
        self
    }

    /// Get the number of times fetch was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }
}

impl DocumentProvider for MockProvider {
    type Error = WikiError;

    async fn fetch(&self, locator: &str) -> Result<Document, WikiError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(locator) {
            return Err(WikiError::Communication("Mock error".to_string()));
        }
        self.documents
            .get(locator)
            .cloned()
            .ok_or_else(|| WikiError::NotFound(locator.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> Document {
        Document::new("Paris", 22989, "Paris is the capital of France.")
    }

    #[tokio::test]
    async fn test_mock_provider_serves_documents() {
        let provider = MockProvider::new().with_document("/wiki/Paris", paris());

        let document = provider.fetch("/wiki/Paris").await.unwrap();
        assert_eq!(document, paris());
    }

    #[tokio::test]
    async fn test_mock_provider_not_found() {
        let provider = MockProvider::new();
        let err = provider.fetch("/wiki/Atlantis").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let provider = MockProvider::new()
            .with_document("/wiki/Paris", paris())
            .with_error("/wiki/Paris");

        let err = provider.fetch("/wiki/Paris").await.unwrap_err();
        assert!(matches!(err, WikiError::Communication(_)));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new().with_document("/wiki/Paris", paris());
        let shared = provider.clone();

        assert_eq!(provider.call_count(), 0);
        provider.fetch("/wiki/Paris").await.unwrap();
        provider.fetch("/wiki/Rome").await.unwrap_err();
        assert_eq!(shared.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(shared.call_count(), 0);
    }
}
