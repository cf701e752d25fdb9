//! Corpus statistics
//!
//! Informativeness weights over the combined vocabulary of both sequences:
//! `1 − ln(freq+1)/ln(total+1)`, down-weighting common words in the vector
//! strategy. Built once per run, before any scoring starts.

use ahash::AHashMap;

use crate::unit::Unit;

/// Frequency-derived word weights over both input sequences.
#[derive(Debug, Clone)]
pub struct CorpusStatistics {
    weights: AHashMap<String, f64>,
    total_words: usize,
}

impl CorpusStatistics {
    /// Count every token of the given units and derive the weights.
    pub fn build<'a, I>(units: I) -> Self
    where
        I: IntoIterator<Item = &'a Unit>,
    {
        let mut counts: AHashMap<String, f64> = AHashMap::new();
        let mut total_words = 0usize;
        for unit in units {
            for token in unit.tokens() {
                *counts.entry(token.form.clone()).or_insert(0.0) += 1.0;
                total_words += 1;
            }
        }

        let log_total = ((total_words + 1) as f64).ln();
        let weights = counts
            .into_iter()
            .map(|(word, freq)| {
                let weight = if log_total > 0.0 {
                    1.0 - (freq + 1.0).ln() / log_total
                } else {
                    0.0
                };
                (word, weight)
            })
            .collect();

        Self {
            weights,
            total_words,
        }
    }

    /// Informativeness weight of a counted word.
    ///
    /// # Panics
    ///
    /// Panics when `word` was never counted: every word reaching the vector
    /// strategy comes from a unit that was part of the build, so a miss is a
    /// programming error and silently scoring it 0 would corrupt every
    /// downstream score.
    #[must_use]
    pub fn weight(&self, word: &str) -> f64 {
        match self.weights.get(word) {
            Some(&w) => w,
            None => panic!("corpus statistics consulted for uncounted word: {word:?}"),
        }
    }

    #[inline]
    #[must_use]
    pub fn total_words(&self) -> usize {
        self.total_words
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.weights.len()
    }
}
