//! Unit-level similarity
//!
//! Two interchangeable strategies. When both units carry predicate frames
//! with enough role tokens, frames are compared role by role with greedy
//! token matching and the best frame pair wins. Otherwise the units are
//! compared through semantic and word-order vectors over their joint
//! vocabulary, weighted by corpus informativeness.

use ahash::{AHashMap, AHashSet};
use std::sync::Arc;

use syncx_lexicon::{Lexicon, RelatedWords, WordSimilarityEngine};

use crate::config::AlignConfig;
use crate::corpus::CorpusStatistics;
use crate::unit::{Frame, Unit};

/// Scores pairs of units, delegating word comparisons to the lexicon layer.
pub struct UnitSimilarity {
    words: WordSimilarityEngine,
    related: RelatedWords,
    min_matching_words: usize,
    min_word_similarity: f64,
    relative_lexical_importance: f64,
}

impl UnitSimilarity {
    #[must_use]
    pub fn new(lexicon: Arc<dyn Lexicon>, config: &AlignConfig) -> Self {
        Self {
            words: WordSimilarityEngine::new(Arc::clone(&lexicon)),
            related: RelatedWords::new(lexicon),
            min_matching_words: config.min_matching_words,
            min_word_similarity: config.min_word_similarity,
            relative_lexical_importance: config.relative_lexical_importance,
        }
    }

    /// The word-level engine, exposed for cache inspection.
    #[must_use]
    pub fn words(&self) -> &WordSimilarityEngine {
        &self.words
    }

    /// Similarity of two units in [0, 1].
    pub fn similarity(&self, a: &Unit, b: &Unit, corpus: &CorpusStatistics) -> f64 {
        if a.has_frame_with_words(self.min_matching_words)
            && b.has_frame_with_words(self.min_matching_words)
        {
            if let Some(score) = self.best_frame_similarity(a, b) {
                return score;
            }
        }
        self.vector_similarity(a, b, corpus)
    }

    /// Best similarity over all qualifying frame pairs, or `None` when no
    /// pair meets the word-count threshold.
    fn best_frame_similarity(&self, a: &Unit, b: &Unit) -> Option<f64> {
        let frames_a: Vec<&Frame> = a.frames()?.map(|(_, frame)| frame).collect();
        let frames_b: Vec<&Frame> = b.frames()?.map(|(_, frame)| frame).collect();

        let mut best: Option<f64> = None;
        for &fa in frames_a
            .iter()
            .filter(|f| f.word_count() >= self.min_matching_words)
        {
            for &fb in frames_b
                .iter()
                .filter(|f| f.word_count() >= self.min_matching_words)
            {
                let score = self.frame_pair_similarity(fa, fb, a, b);
                if best.is_none() || score > best.unwrap() {
                    best = Some(score);
                }
            }
        }
        best
    }

    /// Per-role greedy scores over the roles both frames share, normalized
    /// by the larger frame's role count.
    fn frame_pair_similarity(&self, fa: &Frame, fb: &Frame, a: &Unit, b: &Unit) -> f64 {
        let mut sum = 0.0;
        for label in fa.labels() {
            if let (Some(ra), Some(rb)) = (fa.role(label), fb.role(label)) {
                sum += if ra.len() <= rb.len() {
                    self.greedy_match(ra, rb, a)
                } else {
                    self.greedy_match(rb, ra, b)
                };
            }
        }
        let roles = fa.role_count().max(fb.role_count());
        if roles == 0 {
            0.0
        } else {
            sum / roles as f64
        }
    }

    /// Match each small-side token against an unconsumed occurrence in the
    /// large side, exact first, then through the related-word set of the
    /// token's category. Score is matches over the large side's length.
    fn greedy_match(&self, small: &[String], large: &[String], owner: &Unit) -> f64 {
        if large.is_empty() {
            return 0.0;
        }
        let mut used: AHashSet<usize> = AHashSet::new();
        let mut matched = 0.0f64;
        for term in small {
            let exact = large
                .iter()
                .enumerate()
                .find(|(i, word)| !used.contains(i) && *word == term)
                .map(|(i, _)| i);
            if let Some(index) = exact {
                used.insert(index);
                matched += 1.0;
                continue;
            }

            let related = self.related.related(term, owner.category_of(term));
            if related.is_empty() {
                continue;
            }
            let by_relation = large
                .iter()
                .enumerate()
                .find(|(i, word)| !used.contains(i) && related.contains(word.as_str()))
                .map(|(i, _)| i);
            if let Some(index) = by_relation {
                used.insert(index);
                matched += 1.0;
            }
        }
        matched / large.len() as f64
    }

    /// Mix of semantic-vector cosine and word-order similarity over the
    /// joint vocabulary of both units.
    fn vector_similarity(&self, a: &Unit, b: &Unit, corpus: &CorpusStatistics) -> f64 {
        let mut joint: Vec<&str> = Vec::new();
        let mut seen: AHashSet<&str> = AHashSet::new();
        for token in a.tokens().iter().chain(b.tokens()) {
            if seen.insert(token.form.as_str()) {
                joint.push(token.form.as_str());
            }
        }

        // Shared forms take the secondary unit's tag.
        let mut pos: AHashMap<&str, &str> = AHashMap::new();
        for token in a.tokens().iter().chain(b.tokens()) {
            pos.insert(token.form.as_str(), token.pos.as_str());
        }

        let semantic_a = self.semantic_vector(a, &joint, &pos, corpus);
        let semantic_b = self.semantic_vector(b, &joint, &pos, corpus);
        let semantic = cosine(&semantic_a, &semantic_b);

        let order_a = self.order_vector(a, &joint, &pos);
        let order_b = self.order_vector(b, &joint, &pos);
        let order = order_similarity(&order_a, &order_b);

        let lambda = self.relative_lexical_importance;
        lambda * semantic + (1.0 - lambda) * order
    }

    fn semantic_vector(
        &self,
        unit: &Unit,
        joint: &[&str],
        pos: &AHashMap<&str, &str>,
        corpus: &CorpusStatistics,
    ) -> Vec<f64> {
        joint
            .iter()
            .map(|&word| {
                if unit.tokens().iter().any(|t| t.form == word) {
                    let weight = corpus.weight(word);
                    return weight * weight;
                }
                let word_pos = pos.get(word).copied().unwrap_or("");
                let mut best = 0.0f64;
                let mut best_match: Option<&str> = None;
                for token in unit.tokens() {
                    let sim = self.words.similarity(word, word_pos, &token.form, &token.pos);
                    if sim > best {
                        best = sim;
                        best_match = Some(token.form.as_str());
                    }
                }
                match best_match {
                    Some(found) if best > self.min_word_similarity => {
                        best * corpus.weight(word) * corpus.weight(found)
                    }
                    _ => 0.0,
                }
            })
            .collect()
    }

    fn order_vector(
        &self,
        unit: &Unit,
        joint: &[&str],
        pos: &AHashMap<&str, &str>,
    ) -> Vec<f64> {
        joint
            .iter()
            .map(|&word| {
                if let Some(index) = unit.tokens().iter().position(|t| t.form == word) {
                    // Positions count from 1; 0 marks absence.
                    return (index + 1) as f64;
                }
                let word_pos = pos.get(word).copied().unwrap_or("");
                let mut best = 0.0f64;
                let mut best_index = 0usize;
                for (index, token) in unit.tokens().iter().enumerate() {
                    let sim = self.words.similarity(word, word_pos, &token.form, &token.pos);
                    if sim > best {
                        best = sim;
                        best_index = index + 1;
                    }
                }
                if best > self.min_word_similarity {
                    best_index as f64
                } else {
                    0.0
                }
            })
            .collect()
    }
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

fn order_similarity(a: &[f64], b: &[f64]) -> f64 {
    let diff: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt();
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x + y) * (x + y)).sum::<f64>().sqrt();
    if sum == 0.0 {
        return 0.0;
    }
    (1.0 - diff / sum).clamp(0.0, 1.0)
}
