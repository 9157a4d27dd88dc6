//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the fact extraction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum number of keywords ranked per article
    pub top_n: usize,

    /// Maximum words per keyword
    pub ngram_size: usize,

    /// Bytes on each side of a fragment searched for its sentence
    pub window: usize,

    /// Verb lemma statements must be anchored on
    pub cue: String,

    /// Words allowed between an entity and its cue
    pub max_cue_gap: usize,

    /// Minimum words in a fragment, cue included
    pub min_fragment_words: usize,

    /// Maximum words in a fragment, cue included
    pub max_fragment_words: usize,

    /// Maximum input text length (bytes)
    pub max_text_length: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.top_n == 0 {
            return Err("top_n must be greater than 0".to_string());
        }
        if self.ngram_size == 0 {
            return Err("ngram_size must be greater than 0".to_string());
        }
        if self.window == 0 {
            return Err("window must be greater than 0".to_string());
        }
        if self.cue.trim().is_empty() {
            return Err("cue cannot be empty".to_string());
        }
        if self.min_fragment_words == 0 {
            return Err("min_fragment_words must be greater than 0".to_string());
        }
        if self.min_fragment_words > self.max_fragment_words {
            return Err("min_fragment_words cannot exceed max_fragment_words".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Defaults matching the reference extraction run: ten single-word
    /// keywords and a 2000 byte search window
    fn default() -> Self {
        Self {
            top_n: 10,
            ngram_size: 1,
            window: 2000,
            cue: "be".to_string(),
            max_cue_gap: 2,
            min_fragment_words: 1,
            max_fragment_words: 20,
            max_text_length: 2_000_000,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: fewer keywords and a tighter window
    pub fn aggressive() -> Self {
        Self {
            top_n: 5,
            window: 1000,
            max_cue_gap: 1,
            max_fragment_words: 15,
            max_text_length: 500_000,
            ..Self::default()
        }
    }

    /// Lenient preset: more keywords, bigrams, a wider window
    pub fn lenient() -> Self {
        Self {
            top_n: 20,
            ngram_size: 2,
            window: 4000,
            max_cue_gap: 3,
            max_fragment_words: 30,
            max_text_length: 5_000_000,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
