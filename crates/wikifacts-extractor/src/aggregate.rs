//! Merging per-keyword statements into one ordered, deduplicated fact list

use crate::recover::SentenceRecoverer;
use crate::segment::PunctSegmenter;
use indexmap::IndexSet;
use wikifacts_domain::traits::SentenceSegmenter;
use wikifacts_domain::{Fact, Statement};

/// Outcome of one aggregation, with counters for reporting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Facts in keyword rank, then discovery, order
    pub facts: Vec<Fact>,

    /// Statements fed to the recoverer
    pub statements_seen: usize,

    /// Statements whose sentence could not be recovered
    pub recovery_misses: usize,

    /// Recovered sentences dropped as exact duplicates
    pub duplicates_elided: usize,

    /// Keyword groups that had no statements
    pub empty_groups: usize,
}

/// Runs sentence recovery over statement groups and deduplicates the results
///
/// Deduplication state lives inside a single `aggregate` call, so one
/// aggregator can serve concurrent aggregations of different articles.
#[derive(Debug, Clone)]
pub struct FactAggregator<G = PunctSegmenter> {
    recoverer: SentenceRecoverer<G>,
}

impl FactAggregator {
    /// Create an aggregator with the default recoverer
    pub fn new() -> Self {
        Self {
            recoverer: SentenceRecoverer::new(),
        }
    }
}

impl Default for FactAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> FactAggregator<G> {
    /// Create an aggregator around `recoverer`
    pub fn with_recoverer(recoverer: SentenceRecoverer<G>) -> Self {
        Self { recoverer }
    }

    /// The recoverer used for every statement
    pub fn recoverer(&self) -> &SentenceRecoverer<G> {
        &self.recoverer
    }
}

impl<G: SentenceSegmenter> FactAggregator<G> {
    /// Aggregate statement groups, one group per keyword in rank order
    pub fn aggregate<'d, I, S>(&self, groups: I) -> Vec<Fact>
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = Statement<'d>>,
    {
        self.aggregate_with_report(groups).facts
    }

    /// Aggregate statement groups and report what happened along the way
    ///
    /// Groups are visited in order, statements within a group in order. A
    /// recovered sentence is appended unless an identical string is already
    /// present, so each fact keeps the position of its first occurrence.
    /// Misses and empty groups contribute nothing and never abort the run.
    pub fn aggregate_with_report<'d, I, S>(&self, groups: I) -> Aggregation
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = Statement<'d>>,
    {
        let mut facts: IndexSet<Fact> = IndexSet::new();
        let mut report = Aggregation::default();

        for group in groups {
            let mut group_size = 0;
            for statement in group {
                group_size += 1;
                report.statements_seen += 1;

                match self.recoverer.recover(&statement.fragment) {
                    Some(fact) => {
                        if !facts.insert(fact) {
                            report.duplicates_elided += 1;
                        }
                    }
                    None => report.recovery_misses += 1,
                }
            }
            if group_size == 0 {
                report.empty_groups += 1;
            }
        }

        report.facts = facts.into_iter().collect();
        report
    }
}
