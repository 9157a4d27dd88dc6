//! Error types for the Extractor

use thiserror::Error;
use wikifacts_domain::traits::ProviderError;

/// Errors that can occur during extraction
///
/// Recoverable-empty outcomes (no keywords, no statements, no containing
/// sentence) are not errors; they simply contribute no facts.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Text exceeds maximum length
    #[error("Text too long: {0} bytes (max: {1})")]
    TextTooLong(usize, usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that can occur while ingesting an article
///
/// Fetch and store failures carry the collaborator's own error value
/// unchanged, so callers can still inspect it.
#[derive(Error, Debug)]
pub enum IngestError<F, S> {
    /// Document provider could not resolve the locator
    #[error("Fetch error: {0}")]
    Fetch(F),

    /// Extraction rejected the document
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractorError),

    /// Article store rejected the read or write
    #[error("Store error: {0}")]
    Store(S),

    /// Another thread panicked while holding the store
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl<F: ProviderError, S> IngestError<F, S> {
    /// Whether this is a provider NotFound failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, IngestError::Fetch(e) if e.is_not_found())
    }
}
