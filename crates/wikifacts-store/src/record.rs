//! Serialized form of an article record

use serde::{Deserialize, Serialize};
use wikifacts_domain::{ArticleRecord, Fact, Keyword};

/// An [`ArticleRecord`] as written to disk
///
/// Keywords are stored as `[token, score]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredArticle {
    /// Full article text
    pub text: String,

    /// Article title
    pub title: String,

    /// Fact sentences in order
    pub facts: Vec<String>,

    /// Keywords in rank order
    pub keywords: Vec<(String, f64)>,

    /// Numeric id assigned by the source
    pub source_id: u64,
}

impl From<ArticleRecord> for StoredArticle {
    fn from(record: ArticleRecord) -> Self {
        Self {
            text: record.text,
            title: record.title,
            facts: record.facts.into_iter().map(Fact::into_string).collect(),
            keywords: record
                .keywords
                .into_iter()
                .map(|k| (k.token, k.score))
                .collect(),
            source_id: record.source_id,
        }
    }
}

impl From<StoredArticle> for ArticleRecord {
    fn from(stored: StoredArticle) -> Self {
        Self {
            text: stored.text,
            title: stored.title,
            facts: stored.facts.into_iter().map(Fact::from).collect(),
            keywords: stored
                .keywords
                .into_iter()
                .map(|(token, score)| Keyword::new(token, score))
                .collect(),
            source_id: stored.source_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_shape() {
        let record = ArticleRecord {
            text: "Paris is the capital of France.".to_string(),
            title: "Paris".to_string(),
            facts: vec![Fact::new("Paris is the capital of France.")],
            keywords: vec![Keyword::new("paris", 0.04)],
            source_id: 22989,
        };

        let value = serde_json::to_value(StoredArticle::from(record)).unwrap();
        assert_eq!(
            value,
            json!({
                "text": "Paris is the capital of France.",
                "title": "Paris",
                "facts": ["Paris is the capital of France."],
                "keywords": [["paris", 0.04]],
                "source_id": 22989,
            })
        );
    }
}
