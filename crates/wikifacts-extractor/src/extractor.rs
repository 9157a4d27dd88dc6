//! Core FactExtractor implementation

use crate::aggregate::{Aggregation, FactAggregator};
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::keywords::YakeRanker;
use crate::recover::SentenceRecoverer;
use crate::segment::PunctSegmenter;
use crate::statements::CueStatementFinder;
use crate::types::{ExtractionMetadata, ExtractionResult};
use std::time::Instant;
use tracing::{debug, info};
use wikifacts_domain::traits::{KeywordRanker, SentenceSegmenter, StatementFinder};
use wikifacts_domain::{ArticleRecord, Document, Statement};

/// The FactExtractor turns one document into an article record
///
/// Keywords are ranked, the document is annotated once, statements are found
/// for every keyword in rank order, and the sentence around every statement
/// fragment is recovered and deduplicated.
#[derive(Debug, Clone)]
pub struct FactExtractor<K = YakeRanker, F = CueStatementFinder, G = PunctSegmenter> {
    ranker: K,
    finder: F,
    aggregator: FactAggregator<G>,
    config: ExtractorConfig,
}

impl FactExtractor {
    /// Create an extractor with the built-in components
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        let finder = CueStatementFinder::from_config(&config);
        Self::with_components(YakeRanker::new(), finder, PunctSegmenter::new(), config)
    }
}

impl<K, F, G> FactExtractor<K, F, G> {
    /// Create an extractor from custom components
    ///
    /// `segmenter` is used for sentence recovery; the ranker and finder
    /// carry their own.
    pub fn with_components(
        ranker: K,
        finder: F,
        segmenter: G,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let recoverer = SentenceRecoverer::with_segmenter(segmenter, config.window);
        Ok(Self {
            ranker,
            finder,
            aggregator: FactAggregator::with_recoverer(recoverer),
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }
}

impl<K, F, G> FactExtractor<K, F, G>
where
    K: KeywordRanker,
    F: StatementFinder,
    G: SentenceSegmenter,
{
    /// Extract the facts of `document`
    ///
    /// A document without keywords, statements or recoverable sentences
    /// yields a record with no facts; only oversized input is an error.
    pub fn extract(&self, document: Document) -> Result<ExtractionResult, ExtractorError> {
        let start_time = Instant::now();

        let length = document.text().len();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(length, self.config.max_text_length));
        }

        info!(
            "Starting extraction for '{}' (source {}), text length {}",
            document.title(),
            document.source_id(),
            length
        );

        let keywords = self
            .ranker
            .rank(document.text(), self.config.top_n, self.config.ngram_size);
        debug!("Ranked {} keywords", keywords.len());

        let aggregation = if keywords.is_empty() {
            Aggregation::default()
        } else {
            let annotated = self.finder.annotate(&document);
            let groups: Vec<Vec<Statement<'_>>> = keywords
                .iter()
                .map(|keyword| {
                    let statements = self.finder.find_statements(&annotated, &keyword.token);
                    debug!("Keyword '{}': {} statements", keyword.token, statements.len());
                    statements
                })
                .collect();
            self.aggregator.aggregate_with_report(groups)
        };

        let (title, source_id, text) = document.into_parts();

        let metadata = ExtractionMetadata {
            title: title.clone(),
            source_id,
            keywords_ranked: keywords.len(),
            statements_found: aggregation.statements_seen,
            recovery_misses: aggregation.recovery_misses,
            duplicates_elided: aggregation.duplicates_elided,
            facts: aggregation.facts.len(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Extraction complete for '{}': {} facts, {} misses, {} duplicates",
            title, metadata.facts, metadata.recovery_misses, metadata.duplicates_elided
        );

        Ok(ExtractionResult {
            record: ArticleRecord {
                text,
                title,
                facts: aggregation.facts,
                keywords,
                source_id,
            },
            metadata,
        })
    }
}
