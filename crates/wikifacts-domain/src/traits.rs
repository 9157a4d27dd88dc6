//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction algorithm and
//! the capabilities it consumes (keyword ranking, statement finding,
//! sentence segmentation) or hands results to (document providers, article
//! stores). Implementations live in other crates.

use crate::{ArticleRecord, Document, Keyword, Statement};
use std::future::Future;
use std::ops::Range;

/// Ranks the salient single- or multi-word keywords of a text
///
/// Implemented by the extraction layer (wikifacts-extractor)
pub trait KeywordRanker {
    /// Return at most `top_n` keywords of up to `ngram_size` words, best first
    ///
    /// Degenerate input (empty or whitespace-only text) yields an empty
    /// sequence rather than an error; callers treat empty as "no facts
    /// derivable".
    fn rank(&self, text: &str, top_n: usize, ngram_size: usize) -> Vec<Keyword>;
}

/// Finds (entity, cue, fragment) statements in a document
///
/// Finding happens in two steps so the linguistic annotation of a document
/// is computed once and reused for every keyword queried against it.
///
/// Implemented by the extraction layer (wikifacts-extractor)
pub trait StatementFinder {
    /// Annotation of one document, borrowing from it
    type Annotated<'d>;

    /// Annotate a document once
    fn annotate<'d>(&self, document: &'d Document) -> Self::Annotated<'d>;

    /// Find statements anchored on `entity`
    ///
    /// An entity that takes part in no recognized relation yields an empty
    /// sequence. Results are not deduplicated.
    fn find_statements<'d>(
        &self,
        annotated: &Self::Annotated<'d>,
        entity: &str,
    ) -> Vec<Statement<'d>>;
}

/// Splits text into sentence-like units
///
/// Only consistency is guaranteed, not linguistic correctness.
pub trait SentenceSegmenter {
    /// Byte ranges of the sentence units of `text`, in order
    ///
    /// Every range is trimmed of surrounding whitespace and non-empty.
    fn sentence_spans(&self, text: &str) -> Vec<Range<usize>>;

    /// Sentence units of `text` as slices
    fn sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.sentence_spans(text)
            .into_iter()
            .map(|span| &text[span])
            .collect()
    }
}

/// Errors raised by a [`DocumentProvider`]
pub trait ProviderError: std::fmt::Display {
    /// Whether the locator did not resolve to a document
    fn is_not_found(&self) -> bool;
}

/// Resolves a locator (URL path, title, ...) into a [`Document`]
///
/// Implemented by the provider layer (wikifacts-wiki)
pub trait DocumentProvider {
    /// Error type for fetch operations
    type Error: ProviderError;

    /// Fetch the document a locator points at
    fn fetch(&self, locator: &str) -> impl Future<Output = Result<Document, Self::Error>> + Send;
}

/// Persists article records, keyed by title
///
/// Implemented by the infrastructure layer (wikifacts-store). Append-only:
/// a record is written once and never updated.
pub trait ArticleStore {
    /// Error type for store operations
    type Error;

    /// Store a new record; a title that is already stored is rejected
    fn put_article(&mut self, record: ArticleRecord) -> Result<(), Self::Error>;

    /// Get the record with exactly this title
    fn get_article(&self, title: &str) -> Result<Option<ArticleRecord>, Self::Error>;

    /// First record, in insertion order, whose title contains `pattern`
    /// case-insensitively
    fn find_article(&self, pattern: &str) -> Result<Option<ArticleRecord>, Self::Error>;

    /// All stored titles in insertion order
    fn list_titles(&self) -> Result<Vec<String>, Self::Error>;
}
