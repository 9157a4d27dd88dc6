//! Error types for the CLI application.

use thiserror::Error;
use wikifacts_extractor::{ExtractorError, IngestError};
use wikifacts_store::StoreError;
use wikifacts_wiki::WikiError;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetch or harvest error
    #[error("Wiki error: {0}")]
    Wiki(#[from] WikiError),

    /// Storage error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Extraction error
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Nothing stored under the requested title
    #[error("Not found: {0}")]
    NotFound(String),

    /// Another thread panicked while holding the store
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl From<IngestError<WikiError, StoreError>> for CliError {
    fn from(err: IngestError<WikiError, StoreError>) -> Self {
        match err {
            IngestError::Fetch(e) => CliError::Wiki(e),
            IngestError::Extraction(e) => CliError::Extraction(e),
            IngestError::Store(e) => CliError::Store(e),
            IngestError::LockPoisoned => CliError::LockPoisoned,
        }
    }
}
