//! Keyword module

/// A ranked salient token of a document
///
/// `token` is lower-cased. `score` is the ranking capability's relevance
/// weight; with YAKE lower means more relevant. Rank order is the order of
/// the sequence the ranker returned, not something recomputed from scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    /// Normalized (lower-cased) token
    pub token: String,

    /// Relevance weight from the ranking capability
    pub score: f64,
}

impl Keyword {
    /// Create a new keyword
    pub fn new(token: impl Into<String>, score: f64) -> Self {
        Self {
            token: token.into(),
            score,
        }
    }
}
