//! Wikifacts Extractor
//!
//! Turns the plain text of an article into an ordered, deduplicated list of
//! fact sentences.
//!
//! # Architecture
//!
//! ```text
//! Document → keywords → statements per keyword → sentence recovery → facts
//!                                                                      ↓
//! DocumentProvider ──────────────── Ingestor ──────────────────→ ArticleStore
//! ```
//!
//! # Key Features
//!
//! - **Keyword ranking**: unsupervised YAKE scoring, lower is better
//! - **Statement finding**: (entity, cue, fragment) triples anchored on a verb
//! - **Sentence recovery**: the full sentence around each fragment, searched
//!   within a bounded window
//! - **Aggregation**: first-seen order, exact-string deduplication
//! - **Batch ingestion**: one failing article never stops the batch
//!
//! # Example Usage
//!
//! ```
//! use wikifacts_domain::Document;
//! use wikifacts_extractor::{ExtractorConfig, FactExtractor};
//!
//! let extractor = FactExtractor::new(ExtractorConfig::default()).unwrap();
//! let document = Document::new(
//!     "Paris",
//!     22989,
//!     "Paris is the capital of France. Paris has many museums.",
//! );
//!
//! let result = extractor.extract(document).unwrap();
//! for fact in &result.record.facts {
//!     println!("{}", fact);
//! }
//! ```

#![warn(missing_docs)]

mod aggregate;
mod config;
mod error;
mod extractor;
mod ingest;
mod keywords;
mod recover;
mod segment;
mod statements;
mod stopwords;
mod tokens;
mod types;


pub use aggregate::{Aggregation, FactAggregator};
pub use config::ExtractorConfig;
pub use error::{ExtractorError, IngestError};
pub use extractor::FactExtractor;
pub use ingest::{IngestResult, Ingestor};
pub use keywords::YakeRanker;
pub use recover::{SentenceRecoverer, DEFAULT_WINDOW};
pub use segment::PunctSegmenter;
pub use statements::{AnnotatedDocument, CueStatementFinder};
pub use types::{BatchFailure, BatchReport, ExtractionMetadata, ExtractionResult};
