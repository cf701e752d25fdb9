//! Alignment configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thresholds and weights steering the alignment run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlignConfig {
    /// Minimum similarity score for a candidate to become a match.
    pub min_delta: f64,
    /// Minimum token count for full comparison; shorter units fall back to
    /// exact matching inside the adaptive search window.
    pub min_matching_words: usize,
    /// Search-window radius as a fraction of the secondary sequence length.
    /// Negative values disable the window fallback entirely.
    pub relative_search_window: f64,
    /// Minimum best score for a unit's matches to re-anchor the window.
    pub min_score_for_window: f64,
    /// Minimum word similarity for two different words to count as related
    /// in the vector strategy.
    pub min_word_similarity: f64,
    /// Mixing weight between lexical-semantic and word-order similarity.
    pub relative_lexical_importance: f64,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            min_delta: 0.8,
            min_matching_words: 4,
            relative_search_window: 0.02,
            min_score_for_window: 0.8,
            min_word_similarity: 0.2,
            relative_lexical_importance: 0.7,
        }
    }
}

impl AlignConfig {
    /// Check that every threshold lies in its legal range.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("min_delta", self.min_delta),
            ("min_score_for_window", self.min_score_for_window),
            ("min_word_similarity", self.min_word_similarity),
            ("relative_lexical_importance", self.relative_lexical_importance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}
