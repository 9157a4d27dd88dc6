//! Fact module - detached, display-ready sentences

use std::fmt;

/// A complete sentence confirmed to contain a statement's fragment
///
/// Facts own their text and hold no reference to the document they came
/// from. Equality is exact string equality, which is what deduplication
/// within one article relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fact(String);

impl Fact {
    /// Create a fact from a sentence
    pub fn new(sentence: impl Into<String>) -> Self {
        Self(sentence.into())
    }

    /// The sentence text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the fact, returning its sentence
    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether the fact's sentence contains `needle` literally
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fact {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Fact {
    fn from(sentence: String) -> Self {
        Self(sentence)
    }
}

impl From<&str> for Fact {
    fn from(sentence: &str) -> Self {
        Self(sentence.to_string())
    }
}
