//! Article record - the persisted unit per processed article

use crate::{Fact, Keyword};

/// Everything kept about one processed article
///
/// Built once by the pipeline driver and never mutated afterwards; stores
/// key it by `title`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRecord {
    /// Full article text
    pub text: String,

    /// Article title, the lookup key
    pub title: String,

    /// Deduplicated facts in keyword rank, then discovery, order
    pub facts: Vec<Fact>,

    /// Keywords in rank order
    pub keywords: Vec<Keyword>,

    /// Numeric id assigned by the source
    pub source_id: u64,
}

impl ArticleRecord {
    /// Whether no fact could be recovered for the article
    ///
    /// An empty record is a complete, valid result, not an error.
    pub fn has_facts(&self) -> bool {
        !self.facts.is_empty()
    }

    /// Fact sentences as plain strings
    pub fn fact_strings(&self) -> Vec<String> {
        self.facts.iter().map(|f| f.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_is_valid() {
        let record = ArticleRecord {
            text: "   ".to_string(),
            title: "Blank".to_string(),
            facts: Vec::new(),
            keywords: Vec::new(),
            source_id: 7,
        };
        assert!(!record.has_facts());
        assert!(record.fact_strings().is_empty());
    }

    #[test]
    fn test_fact_strings_preserve_order() {
        let record = ArticleRecord {
            text: String::new(),
            title: "T".to_string(),
            facts: vec![Fact::new("B is b."), Fact::new("A is a.")],
            keywords: vec![Keyword::new("b", 0.1)],
            source_id: 1,
        };
        assert_eq!(record.fact_strings(), vec!["B is b.", "A is a."]);
    }
}
