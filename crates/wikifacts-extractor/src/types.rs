//! Result types for extraction and ingestion

use wikifacts_domain::ArticleRecord;

/// Result of extracting one document
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// The record to persist
    pub record: ArticleRecord,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

/// Metadata about an extraction operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionMetadata {
    /// Title of the extracted document
    pub title: String,

    /// Source identifier of the document
    pub source_id: u64,

    /// Number of keywords ranked
    pub keywords_ranked: usize,

    /// Statements found across all keywords, duplicates included
    pub statements_found: usize,

    /// Statements whose sentence could not be recovered
    pub recovery_misses: usize,

    /// Recovered sentences dropped as duplicates
    pub duplicates_elided: usize,

    /// Facts kept
    pub facts: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Outcome of a batch ingest
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Titles stored, in ingestion order
    pub ingested: Vec<String>,

    /// Titles that were already stored before the batch reached them
    pub skipped: Vec<String>,

    /// Locators that failed
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    /// Whether every locator was ingested or already stored
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A locator that could not be ingested
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    /// The locator as given
    pub locator: String,

    /// Reason for failure
    pub reason: String,
}
