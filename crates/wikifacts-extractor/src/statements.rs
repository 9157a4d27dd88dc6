//! Semi-structured statement finding
//!
//! Finds `entity <cue> ...` statements: an occurrence of the entity followed
//! closely by an inflection of the cue verb, with the fragment running from
//! the cue to the end of the clause.

use crate::config::ExtractorConfig;
use crate::segment::PunctSegmenter;
use crate::tokens::{tokenize, Token, TokenKind};
use std::collections::HashSet;
use std::ops::Range;
use wikifacts_domain::traits::{SentenceSegmenter, StatementFinder};
use wikifacts_domain::{Document, Fragment, Statement};

/// A document tokenized once and grouped into sentences
///
/// Produced by [`CueStatementFinder::annotate`] and reused for every entity
/// queried against the same document.
#[derive(Debug, Clone)]
pub struct AnnotatedDocument<'d> {
    document: &'d Document,
    tokens: Vec<Token>,
    /// Token index range of every sentence
    sentences: Vec<Range<usize>>,
}

impl<'d> AnnotatedDocument<'d> {
    /// The annotated document
    pub fn document(&self) -> &'d Document {
        self.document
    }

    /// Number of sentences found during annotation
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Number of word and punctuation tokens
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Statement finder anchored on a verb lemma
#[derive(Debug, Clone)]
pub struct CueStatementFinder<G = PunctSegmenter> {
    segmenter: G,
    cue: String,
    cue_forms: HashSet<String>,
    max_cue_gap: usize,
    min_words: usize,
    max_words: usize,
}

impl CueStatementFinder {
    /// Create a finder from the extractor configuration
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::with_segmenter(PunctSegmenter::new(), &config.cue)
            .with_max_cue_gap(config.max_cue_gap)
            .with_fragment_words(config.min_fragment_words, config.max_fragment_words)
    }
}

impl Default for CueStatementFinder {
    fn default() -> Self {
        Self::from_config(&ExtractorConfig::default())
    }
}

impl<G> CueStatementFinder<G> {
    /// Create a finder for `cue` splitting sentences with `segmenter`
    pub fn with_segmenter(segmenter: G, cue: &str) -> Self {
        let defaults = ExtractorConfig::default();
        Self {
            segmenter,
            cue: cue.trim().to_lowercase(),
            cue_forms: inflections(cue),
            max_cue_gap: defaults.max_cue_gap,
            min_words: defaults.min_fragment_words,
            max_words: defaults.max_fragment_words,
        }
    }

    /// Words allowed between the entity and the cue
    pub fn with_max_cue_gap(mut self, gap: usize) -> Self {
        self.max_cue_gap = gap;
        self
    }

    /// Accepted fragment length in words, cue included
    pub fn with_fragment_words(mut self, min: usize, max: usize) -> Self {
        self.min_words = min;
        self.max_words = max;
        self
    }

    /// The cue lemma
    pub fn cue(&self) -> &str {
        &self.cue
    }

    fn is_cue(&self, word: &str) -> bool {
        self.cue_forms.contains(&word.to_lowercase())
    }
}

/// Surface forms of a verb lemma
fn inflections(cue: &str) -> HashSet<String> {
    let lemma = cue.trim().to_lowercase();
    let irregular: &[&str] = match lemma.as_str() {
        "be" => &["be", "am", "is", "are", "was", "were", "been", "being"],
        "have" => &["have", "has", "had", "having"],
        "do" => &["do", "does", "did", "done", "doing"],
        "go" => &["go", "goes", "went", "gone", "going"],
        "make" => &["make", "makes", "made", "making"],
        "become" => &["become", "becomes", "became", "becoming"],
        _ => &[],
    };
    if !irregular.is_empty() {
        return irregular.iter().map(|s| s.to_string()).collect();
    }

    let mut forms: HashSet<String> = ["", "s", "es", "ed", "d", "ing"]
        .iter()
        .map(|suffix| format!("{lemma}{suffix}"))
        .collect();
    if let Some(stem) = lemma.strip_suffix('e') {
        forms.insert(format!("{stem}ing"));
    }
    if let Some(stem) = lemma.strip_suffix('y') {
        forms.insert(format!("{stem}ies"));
        forms.insert(format!("{stem}ied"));
    }
    forms
}

fn ends_clause(text: &str) -> bool {
    matches!(text, "." | "!" | "?" | ";")
}

fn closes_span(text: &str) -> bool {
    matches!(text, ")" | "]" | "\"" | "'" | "\u{201D}" | "\u{2019}")
}

impl<G: SentenceSegmenter> CueStatementFinder<G> {
    /// Statement starting at the cue token `cue_at` of `sentence`, if the
    /// clause has an acceptable length
    fn fragment_from<'d>(
        &self,
        document: &'d Document,
        sentence: &[Token],
        cue_at: usize,
    ) -> Option<Fragment<'d>> {
        let text = document.text();
        let start = sentence[cue_at].start;
        let mut end = sentence[cue_at].end;
        let mut words = 0;

        for token in &sentence[cue_at..] {
            let surface = token.text(text);
            if token.kind == TokenKind::Punct {
                if ends_clause(surface) {
                    break;
                }
                if closes_span(surface) {
                    end = token.end;
                }
                continue;
            }
            words += 1;
            end = token.end;
        }

        if words < self.min_words || words > self.max_words {
            return None;
        }
        Fragment::new(document, start..end)
    }
}

impl<G: SentenceSegmenter> StatementFinder for CueStatementFinder<G> {
    type Annotated<'d> = AnnotatedDocument<'d>;

    fn annotate<'d>(&self, document: &'d Document) -> AnnotatedDocument<'d> {
        let text = document.text();
        let mut tokens = Vec::new();
        let mut sentences = Vec::new();

        for span in self.segmenter.sentence_spans(text) {
            let first = tokens.len();
            tokens.extend(tokenize(&text[span.clone()], span.start));
            sentences.push(first..tokens.len());
        }

        AnnotatedDocument {
            document,
            tokens,
            sentences,
        }
    }

    fn find_statements<'d>(
        &self,
        annotated: &Self::Annotated<'d>,
        entity: &str,
    ) -> Vec<Statement<'d>> {
        let entity_words: Vec<String> = tokenize(entity, 0)
            .iter()
            .filter(|t| t.is_word_like())
            .map(|t| t.text(entity).to_lowercase())
            .collect();
        if entity_words.is_empty() {
            return Vec::new();
        }

        let document = annotated.document;
        let text = document.text();
        let mut statements = Vec::new();

        for range in &annotated.sentences {
            let sentence = &annotated.tokens[range.clone()];
            if sentence.len() < entity_words.len() {
                continue;
            }

            for i in 0..=sentence.len() - entity_words.len() {
                let matches = sentence[i..i + entity_words.len()]
                    .iter()
                    .zip(&entity_words)
                    .all(|(token, word)| {
                        token.is_word_like() && token.text(text).to_lowercase() == *word
                    });
                if !matches {
                    continue;
                }

                let mut gap = 0;
                let mut cue_at = None;
                for (k, token) in sentence.iter().enumerate().skip(i + entity_words.len()) {
                    if token.kind == TokenKind::Punct {
                        break;
                    }
                    if self.is_cue(token.text(text)) {
                        cue_at = Some(k);
                        break;
                    }
                    gap += 1;
                    if gap > self.max_cue_gap {
                        break;
                    }
                }

                if let Some(fragment) = cue_at.and_then(|k| self.fragment_from(document, sentence, k)) {
                    statements.push(Statement::new(entity, self.cue.clone(), fragment));
                }
            }
        }

        statements
    }
}
