//! Unsupervised keyword ranking (YAKE)
//!
//! Scores every non-stopword by casing, position, frequency, relatedness to
//! context and spread over sentences, then scores candidate n-grams from the
//! word scores. Lower scores are more relevant.

use crate::segment::PunctSegmenter;
use crate::stopwords::is_stopword;
use crate::tokens::{tokenize, TokenKind};
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::debug;
use wikifacts_domain::traits::{KeywordRanker, SentenceSegmenter};
use wikifacts_domain::Keyword;

/// Co-occurrence window (in words) used for relatedness
const DEFAULT_WINDOW: usize = 2;

/// Shortest word accepted as a candidate
const MIN_WORD_CHARS: usize = 3;

/// YAKE keyword ranker
#[derive(Debug, Clone)]
pub struct YakeRanker<G = PunctSegmenter> {
    segmenter: G,
    window: usize,
}

impl YakeRanker {
    /// Create a ranker with the default segmenter
    pub fn new() -> Self {
        Self::with_segmenter(PunctSegmenter::new())
    }
}

impl Default for YakeRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> YakeRanker<G> {
    /// Create a ranker splitting sentences with `segmenter`
    pub fn with_segmenter(segmenter: G) -> Self {
        Self {
            segmenter,
            window: DEFAULT_WINDOW,
        }
    }

    /// Set the co-occurrence window
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }
}

/// One word occurrence inside a punctuation-free chunk
struct Term {
    lower: String,
    stop: bool,
    kind: TokenKind,
}

impl Term {
    fn is_content(&self) -> bool {
        !self.stop && self.kind == TokenKind::Word
    }
}

#[derive(Default)]
struct WordStats {
    tf: usize,
    tf_upper: usize,
    tf_acronym: usize,
    /// Sentence index of every occurrence, ascending
    sentence_ids: Vec<usize>,
    left: HashMap<String, usize>,
    right: HashMap<String, usize>,
    content: bool,
}

impl WordStats {
    fn median_sentence(&self) -> f64 {
        let n = self.sentence_ids.len();
        if n == 0 {
            return 0.0;
        }
        if n % 2 == 1 {
            self.sentence_ids[n / 2] as f64
        } else {
            (self.sentence_ids[n / 2 - 1] + self.sentence_ids[n / 2]) as f64 / 2.0
        }
    }

    fn sentence_frequency(&self) -> usize {
        let mut ids = self.sentence_ids.clone();
        ids.dedup();
        ids.len()
    }
}

fn dispersion(neighbours: &HashMap<String, usize>) -> f64 {
    let total: usize = neighbours.values().sum();
    if total == 0 {
        0.0
    } else {
        neighbours.len() as f64 / total as f64
    }
}

impl<G: SentenceSegmenter> YakeRanker<G> {
    /// Split `text` into chunks of words and collect per-word statistics
    fn collect(&self, text: &str) -> (Vec<Vec<Term>>, IndexMap<String, WordStats>, usize) {
        let sentences = self.segmenter.sentence_spans(text);
        let mut chunks = Vec::new();
        let mut stats: IndexMap<String, WordStats> = IndexMap::new();

        for (sentence_id, span) in sentences.iter().enumerate() {
            let mut chunk: Vec<Term> = Vec::new();
            let mut first_word = true;

            for token in tokenize(&text[span.clone()], span.start) {
                if token.kind == TokenKind::Punct {
                    if !chunk.is_empty() {
                        chunks.push(std::mem::take(&mut chunk));
                    }
                    continue;
                }

                let surface = token.text(text);
                let lower = surface.to_lowercase();
                let stop = is_stopword(&lower);
                let acronym = surface.chars().count() > 1
                    && surface.chars().any(char::is_uppercase)
                    && !surface.chars().any(char::is_lowercase);
                let capitalized = !first_word && surface.chars().next().is_some_and(char::is_uppercase);
                first_word = false;

                let entry = stats.entry(lower.clone()).or_default();
                entry.tf += 1;
                entry.sentence_ids.push(sentence_id);
                entry.content = !stop && token.kind == TokenKind::Word;
                if acronym {
                    entry.tf_acronym += 1;
                } else if capitalized {
                    entry.tf_upper += 1;
                }

                chunk.push(Term {
                    lower,
                    stop,
                    kind: token.kind,
                });
            }

            if !chunk.is_empty() {
                chunks.push(chunk);
            }
        }

        for chunk in &chunks {
            for (i, term) in chunk.iter().enumerate() {
                if !term.is_content() {
                    continue;
                }
                for other in &chunk[i.saturating_sub(self.window)..i] {
                    if !other.is_content() {
                        continue;
                    }
                    if let Some(s) = stats.get_mut(&term.lower) {
                        *s.left.entry(other.lower.clone()).or_default() += 1;
                    }
                    if let Some(s) = stats.get_mut(&other.lower) {
                        *s.right.entry(term.lower.clone()).or_default() += 1;
                    }
                }
            }
        }

        (chunks, stats, sentences.len())
    }

    /// Score every content word
    fn word_scores(stats: &IndexMap<String, WordStats>, sentence_count: usize) -> HashMap<&str, f64> {
        let tfs: Vec<f64> = stats
            .values()
            .filter(|s| s.content)
            .map(|s| s.tf as f64)
            .collect();
        if tfs.is_empty() {
            return HashMap::new();
        }

        let mean = tfs.iter().sum::<f64>() / tfs.len() as f64;
        let variance = tfs.iter().map(|tf| (tf - mean).powi(2)).sum::<f64>() / tfs.len() as f64;
        let spread = mean + variance.sqrt();
        let max_tf = tfs.iter().cloned().fold(1.0, f64::max);
        let sentence_count = sentence_count.max(1) as f64;

        stats
            .iter()
            .filter(|(_, s)| s.content)
            .map(|(word, s)| {
                let tf = s.tf as f64;
                let t_case = s.tf_upper.max(s.tf_acronym) as f64 / (1.0 + tf.ln());
                let t_pos = (3.0 + s.median_sentence()).ln().ln();
                let t_freq = if spread > 0.0 { tf / spread } else { tf };
                let t_rel = 1.0 + (dispersion(&s.left) + dispersion(&s.right)) * tf / max_tf;
                let t_sent = s.sentence_frequency() as f64 / sentence_count;
                let score = (t_rel * t_pos) / (t_case + t_freq / t_rel + t_sent / t_rel);
                (word.as_str(), score)
            })
            .collect()
    }
}

fn is_candidate(words: &[Term]) -> bool {
    let (Some(first), Some(last)) = (words.first(), words.last()) else {
        return false;
    };
    !first.stop
        && !last.stop
        && words.iter().all(|t| t.kind == TokenKind::Word)
        && words
            .iter()
            .filter(|t| !t.stop)
            .all(|t| t.lower.chars().count() >= MIN_WORD_CHARS)
}

impl<G: SentenceSegmenter> KeywordRanker for YakeRanker<G> {
    fn rank(&self, text: &str, top_n: usize, ngram_size: usize) -> Vec<Keyword> {
        if text.trim().is_empty() || top_n == 0 {
            return Vec::new();
        }

        let (chunks, stats, sentence_count) = self.collect(text);
        let scores = Self::word_scores(&stats, sentence_count);
        if scores.is_empty() {
            return Vec::new();
        }

        // candidate -> (occurrences, words)
        let mut candidates: IndexMap<String, (usize, Vec<&str>)> = IndexMap::new();
        for chunk in &chunks {
            for n in 1..=ngram_size.max(1) {
                for words in chunk.windows(n) {
                    if !is_candidate(words) {
                        continue;
                    }
                    let key = words
                        .iter()
                        .map(|t| t.lower.as_str())
                        .collect::<Vec<_>>()
                        .join(" ");
                    let entry = candidates.entry(key).or_insert_with(|| {
                        let content = words
                            .iter()
                            .filter(|t| !t.stop)
                            .map(|t| t.lower.as_str())
                            .collect();
                        (0, content)
                    });
                    entry.0 += 1;
                }
            }
        }

        let mut ranked: Vec<Keyword> = candidates
            .into_iter()
            .map(|(key, (tf, words))| {
                let (product, sum) = words.iter().fold((1.0, 0.0), |(p, s), w| {
                    let score = scores.get(w).copied().unwrap_or(1.0);
                    (p * score, s + score)
                });
                Keyword::new(key, product / (tf as f64 * (1.0 + sum)))
            })
            .collect();

        // Stable sort keeps first occurrence order between equal scores
        ranked.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(top_n);

        debug!("Ranked {} keywords from {} sentences", ranked.len(), sentence_count);
        ranked
    }
}
