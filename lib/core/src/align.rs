//! Alignment engine
//!
//! Single order-preserving pass over the primary sequence. Long-enough units
//! are scored against every long-enough secondary unit; all secondary units
//! tied at the best score become matches. Units below the word threshold
//! fall back to exact normalized-text matching inside an adaptive window
//! around the previous confident match. The window state is sequential by
//! nature; only the inner secondary scan is parallelized.

use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

use syncx_lexicon::Lexicon;

use crate::config::AlignConfig;
use crate::corpus::CorpusStatistics;
use crate::error::{Error, Result};
use crate::unit::Unit;
use crate::unit_sim::UnitSimilarity;

/// One alignment record.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Match {
    pub primary: usize,
    pub secondary: usize,
    pub score: f64,
}

/// Event stream emitted during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum AlignEvent {
    Match(Match),
    Progress { stage: &'static str, percent: u32 },
}

/// Walks both sequences and emits the match stream.
pub struct AlignmentEngine {
    scorer: UnitSimilarity,
    config: AlignConfig,
}

impl AlignmentEngine {
    pub fn new(lexicon: Arc<dyn Lexicon>, config: AlignConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scorer: UnitSimilarity::new(lexicon, &config),
            config,
        })
    }

    /// The unit scorer, exposed for cache inspection.
    #[must_use]
    pub fn scorer(&self) -> &UnitSimilarity {
        &self.scorer
    }

    /// Run the alignment and collect the matches.
    pub fn align(&self, primary: &[Unit], secondary: &[Unit]) -> Result<Vec<Match>> {
        let mut matches = Vec::new();
        self.run(primary, secondary, &mut |event| {
            if let AlignEvent::Match(record) = event {
                matches.push(record);
            }
        })?;
        Ok(matches)
    }

    /// Run the alignment, forwarding every event to `on_event`.
    pub fn run(
        &self,
        primary: &[Unit],
        secondary: &[Unit],
        on_event: &mut dyn FnMut(AlignEvent),
    ) -> Result<()> {
        if primary.is_empty() {
            return Err(Error::EmptySequence("primary"));
        }
        if secondary.is_empty() {
            return Err(Error::EmptySequence("secondary"));
        }

        // Frozen before any scoring starts.
        let corpus = CorpusStatistics::build(primary.iter().chain(secondary.iter()));
        info!(
            primary = primary.len(),
            secondary = secondary.len(),
            vocabulary = corpus.vocabulary_size(),
            total_words = corpus.total_words(),
            "alignment started"
        );

        let min_words = self.config.min_matching_words;
        let mut last_range: Option<(usize, usize)> = None;
        let mut reported_progress: Option<u32> = None;

        for (primary_index, unit) in primary.iter().enumerate() {
            let word_count = unit.word_count();
            let mut best = 0.0f64;
            let mut ties: Vec<usize> = Vec::new();

            if word_count < min_words
                && last_range.is_some()
                && self.config.relative_search_window >= 0.0
            {
                // Too short for a reliable comparison: accept only exact
                // text matches near the previous confident match.
                let (last_start, last_end) = last_range.unwrap();
                let window =
                    (self.config.relative_search_window * secondary.len() as f64).round() as usize;
                let start = last_start.saturating_sub(window);
                let end = (last_end + window + 1).min(secondary.len());
                let needle = unit.normalized_text();
                for secondary_index in start..end {
                    if secondary[secondary_index].normalized_text() == needle {
                        ties.push(secondary_index);
                    }
                }
                best = 1.0;
                debug!(
                    primary_index,
                    window_start = start,
                    window_end = end,
                    hits = ties.len(),
                    "window fallback"
                );
            } else if word_count >= min_words {
                let scores: Vec<Option<f64>> = secondary
                    .par_iter()
                    .map(|candidate| {
                        if candidate.word_count() >= min_words {
                            Some(self.scorer.similarity(unit, candidate, &corpus))
                        } else {
                            None
                        }
                    })
                    .collect();
                // Sequential fold in index order keeps ties deterministic.
                for (secondary_index, score) in scores.into_iter().enumerate() {
                    let Some(score) = score else { continue };
                    if score < self.config.min_delta {
                        continue;
                    }
                    if score > best {
                        best = score;
                        ties.clear();
                        ties.push(secondary_index);
                    } else if score == best && !ties.is_empty() {
                        ties.push(secondary_index);
                    }
                }
            }

            for &secondary_index in &ties {
                on_event(AlignEvent::Match(Match {
                    primary: primary_index,
                    secondary: secondary_index,
                    score: best,
                }));
            }

            // Re-anchor the window only on confident full comparisons.
            if word_count >= min_words
                && best >= self.config.min_score_for_window
                && !ties.is_empty()
            {
                let start = *ties.iter().min().unwrap();
                let end = *ties.iter().max().unwrap();
                last_range = Some((start, end));
            } else {
                last_range = None;
            }

            let percent = ((primary_index + 1) * 100 / primary.len()) as u32;
            if reported_progress.map_or(true, |prev| percent > prev) {
                on_event(AlignEvent::Progress {
                    stage: "similarity",
                    percent,
                });
                reported_progress = Some(percent);
            }
        }
        Ok(())
    }
}
