//! Pipeline driver: fetch, extract and store articles

use crate::error::IngestError;
use crate::extractor::FactExtractor;
use crate::keywords::YakeRanker;
use crate::segment::PunctSegmenter;
use crate::statements::CueStatementFinder;
use crate::types::{BatchFailure, BatchReport, ExtractionResult};
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};
use wikifacts_domain::traits::{
    ArticleStore, DocumentProvider, KeywordRanker, SentenceSegmenter, StatementFinder,
};
use wikifacts_domain::{ArticleRecord, Document};

/// Result type of ingestor operations
pub type IngestResult<T, P, S> =
    Result<T, IngestError<<P as DocumentProvider>::Error, <S as ArticleStore>::Error>>;

/// A fetched document, or the record already stored under its title
enum Fetched {
    New(Document),
    Stored(ArticleRecord),
}

/// Drives articles from a provider through extraction into a store
///
/// The store is shared with the caller and locked only for the duration of
/// a single read or write, never across a fetch.
pub struct Ingestor<P, S, K = YakeRanker, F = CueStatementFinder, G = PunctSegmenter> {
    provider: P,
    store: Arc<Mutex<S>>,
    extractor: FactExtractor<K, F, G>,
}

impl<P, S, K, F, G> Ingestor<P, S, K, F, G>
where
    P: DocumentProvider,
    S: ArticleStore,
    S::Error: Display,
    K: KeywordRanker,
    F: StatementFinder,
    G: SentenceSegmenter,
{
    /// Create a new Ingestor
    pub fn new(provider: P, store: Arc<Mutex<S>>, extractor: FactExtractor<K, F, G>) -> Self {
        Self {
            provider,
            store,
            extractor,
        }
    }

    /// Handle to the shared store
    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    /// The extractor used for every article
    pub fn extractor(&self) -> &FactExtractor<K, F, G> {
        &self.extractor
    }

    fn lock_store(&self) -> IngestResult<MutexGuard<'_, S>, P, S> {
        self.store.lock().map_err(|_| IngestError::LockPoisoned)
    }

    async fn fetch(&self, locator: &str) -> IngestResult<Document, P, S> {
        debug!("Fetching '{}'", locator);
        self.provider
            .fetch(locator)
            .await
            .map_err(IngestError::Fetch)
    }

    /// Fetch `locator` unless it resolves to an article already stored
    ///
    /// Providers may resolve redirects, so the stored title is only known
    /// after the fetch.
    async fn fetch_new(&self, locator: &str) -> IngestResult<Fetched, P, S> {
        let document = self.fetch(locator).await?;
        let stored = self
            .lock_store()?
            .get_article(document.title())
            .map_err(IngestError::Store)?;

        Ok(match stored {
            Some(record) => {
                debug!("'{}' resolved to stored '{}'", locator, record.title);
                Fetched::Stored(record)
            }
            None => Fetched::New(document),
        })
    }

    /// Fetch, extract and store one article
    ///
    /// Nothing is stored when the fetch or the extraction fails. An article
    /// already stored under the fetched title is rejected by the store.
    pub async fn ingest(&self, locator: &str) -> IngestResult<ExtractionResult, P, S> {
        let document = self.fetch(locator).await?;
        self.store_document(document)
    }

    fn store_document(&self, document: Document) -> IngestResult<ExtractionResult, P, S> {
        let result = self.extractor.extract(document)?;

        self.lock_store()?
            .put_article(result.record.clone())
            .map_err(IngestError::Store)?;

        info!(
            "Ingested '{}' with {} facts",
            result.record.title,
            result.record.facts.len()
        );
        Ok(result)
    }

    /// Look up a stored article by title
    ///
    /// An exact title match wins; otherwise the first stored article whose
    /// title contains `title` case-insensitively is returned.
    pub fn lookup(&self, title: &str) -> IngestResult<Option<ArticleRecord>, P, S> {
        let store = self.lock_store()?;
        if let Some(record) = store.get_article(title).map_err(IngestError::Store)? {
            return Ok(Some(record));
        }
        store.find_article(title).map_err(IngestError::Store)
    }

    /// Look up an article, ingesting it on a miss
    ///
    /// When `title` is an alias of an article already stored under its
    /// canonical title, the stored record is returned.
    pub async fn lookup_or_ingest(&self, title: &str) -> IngestResult<ArticleRecord, P, S> {
        if let Some(record) = self.lookup(title)? {
            return Ok(record);
        }
        info!("'{}' not stored, ingesting", title);
        match self.fetch_new(title).await? {
            Fetched::Stored(record) => Ok(record),
            Fetched::New(document) => Ok(self.store_document(document)?.record),
        }
    }

    /// Ingest every locator in order
    ///
    /// A failing locator is logged and recorded; the batch continues.
    /// Locators resolving to an article already stored are skipped.
    pub async fn ingest_all<I>(&self, locators: I) -> BatchReport
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut report = BatchReport::default();

        for locator in locators {
            let locator = locator.as_ref();
            let stored = match self.fetch_new(locator).await {
                Ok(Fetched::Stored(record)) => {
                    report.skipped.push(record.title);
                    continue;
                }
                Ok(Fetched::New(document)) => self.store_document(document),
                Err(e) => Err(e),
            };

            match stored {
                Ok(result) => report.ingested.push(result.record.title),
                Err(e) => {
                    warn!("Failed to ingest '{}': {}", locator, e);
                    report.failed.push(BatchFailure {
                        locator: locator.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Batch complete: {} ingested, {} already stored, {} failed",
            report.ingested.len(),
            report.skipped.len(),
            report.failed.len()
        );
        report
    }
}
