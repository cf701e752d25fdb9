//! Word-level similarity
//!
//! Computes a graded similarity between two (word, category) pairs from the
//! shortest hierarchy path between any of their senses and the depth of the
//! common ancestor witnessing it. Results are cached per unordered word
//! pair, so repeated unit comparisons stay cheap.

use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::category::Category;
use crate::graph::{AncestorTree, LexicalGraph};
use crate::lexicon::{Lexicon, SynsetId};

// Path-length decay and depth-scaling constants, tuned for WordNet-shaped
// hierarchies.
const ALPHA: f64 = 0.2;
const BETA: f64 = 0.45;

#[derive(Debug, Clone, Copy)]
struct HierarchyPath {
    length: u32,
    subsumer_depth: u32,
}

/// Cached, graded similarity between words backed by a lexical hierarchy.
pub struct WordSimilarityEngine {
    lexicon: Arc<dyn Lexicon>,
    graph: LexicalGraph,
    // unordered (word, word) pair within one category -> similarity
    cache: RwLock<AHashMap<(String, String, Category), f64>>,
}

impl WordSimilarityEngine {
    #[must_use]
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        let graph = LexicalGraph::new(Arc::clone(&lexicon));
        Self {
            lexicon,
            graph,
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// The underlying hierarchy graph, exposed for cache inspection.
    #[must_use]
    pub fn graph(&self) -> &LexicalGraph {
        &self.graph
    }

    /// Similarity of two words given their POS tags, in [0, 1].
    ///
    /// Identical surface forms score 1. Words of different categories, or of
    /// a category without hierarchy support, score 0.
    pub fn similarity(&self, word1: &str, pos1: &str, word2: &str, pos2: &str) -> f64 {
        if word1 == word2 {
            return 1.0;
        }
        let category = Category::from_pos(pos1);
        if category != Category::from_pos(pos2) || !category.has_hierarchy() {
            return 0.0;
        }

        let key = pair_key(word1, word2, category);
        if let Some(&cached) = self.cache.read().get(&key) {
            return cached;
        }

        let senses1 = self.lexicon.senses(word1, category);
        let senses2 = self.lexicon.senses(word2, category);
        let similarity = if senses1.is_empty() || senses2.is_empty() {
            0.0
        } else {
            match self.shortest_path(senses1, senses2, category) {
                Some(path) => score(path),
                None => 0.0,
            }
        };

        self.cache.write().insert(key, similarity);
        similarity
    }

    /// Shortest hierarchy path over all sense pairs.
    ///
    /// Tried in order: a shared sense (length 0), a shared member word form
    /// (length 1), then the minimal distance through a common ancestor. For
    /// verbs a virtual root bridges disconnected local hierarchies at one
    /// extra hop per side.
    fn shortest_path(
        &self,
        senses1: &[SynsetId],
        senses2: &[SynsetId],
        category: Category,
    ) -> Option<HierarchyPath> {
        let trees1: Vec<Arc<AncestorTree>> =
            senses1.iter().map(|&s| self.graph.tree(s)).collect();
        let trees2: Vec<Arc<AncestorTree>> =
            senses2.iter().map(|&s| self.graph.tree(s)).collect();

        // Shared sense: the words are different names for one concept.
        for (i, &s1) in senses1.iter().enumerate() {
            for (j, &s2) in senses2.iter().enumerate() {
                if s1 == s2 {
                    return Some(HierarchyPath {
                        length: 0,
                        subsumer_depth: subsumer_depth(&trees1[i], &trees2[j], s1),
                    });
                }
            }
        }

        // Shared member word form across two senses.
        for (i, &s1) in senses1.iter().enumerate() {
            let forms1 = self.lexicon.word_forms(s1);
            for (j, &s2) in senses2.iter().enumerate() {
                let shared = self
                    .lexicon
                    .word_forms(s2)
                    .iter()
                    .any(|form| forms1.contains(form));
                if shared {
                    let depth1 = trees1[i].depth(s1);
                    let depth2 = trees2[j].depth(s2);
                    return Some(HierarchyPath {
                        length: 1,
                        subsumer_depth: depth1.max(depth2),
                    });
                }
            }
        }

        // Minimal total distance through a node common to both trees.
        let mut best: Option<(u32, Option<(usize, usize, SynsetId)>)> = None;
        for (i, tree1) in trees1.iter().enumerate() {
            for (j, tree2) in trees2.iter().enumerate() {
                let leaf1 = tree1.leaf();
                let leaf2 = tree2.leaf();
                for node in tree1.common_nodes(tree2) {
                    if let (Some(d1), Some(d2)) =
                        (tree1.distance(leaf1, node), tree2.distance(leaf2, node))
                    {
                        let total = d1 + d2;
                        if best.is_none() || total < best.unwrap().0 {
                            best = Some((total, Some((i, j, node))));
                        }
                    }
                }
                if category == Category::Verb {
                    // Bridge disconnected local roots through a shared
                    // virtual root, one extra hop on each side.
                    if let (Some(d1), Some(d2)) = (
                        tree1.distance(leaf1, tree1.root()),
                        tree2.distance(leaf2, tree2.root()),
                    ) {
                        let total = d1 + 1 + d2 + 1;
                        if best.is_none() || total < best.unwrap().0 {
                            best = Some((total, None));
                        }
                    }
                }
            }
        }

        best.map(|(length, witness)| {
            let depth = match witness {
                Some((i, j, node)) => subsumer_depth(&trees1[i], &trees2[j], node),
                // The virtual root is not a real node; its depth is 0.
                None => 0,
            };
            HierarchyPath {
                length,
                subsumer_depth: depth,
            }
        })
    }
}

/// Depth of the subsumer seen from both trees: the deeper perspective, plus
/// one shared virtual hop when the trees terminate at different roots.
fn subsumer_depth(tree1: &AncestorTree, tree2: &AncestorTree, subsumer: SynsetId) -> u32 {
    let depth = tree1.depth(subsumer).max(tree2.depth(subsumer));
    if tree1.root() != tree2.root() {
        depth + 1
    } else {
        depth
    }
}

fn score(path: HierarchyPath) -> f64 {
    let length_factor = (-ALPHA * f64::from(path.length)).exp();
    let bd = BETA * f64::from(path.subsumer_depth);
    let depth_factor = (bd.exp() - (-bd).exp()) / (bd.exp() + (-bd).exp());
    length_factor * depth_factor
}

fn pair_key(word1: &str, word2: &str, category: Category) -> (String, String, Category) {
    if word1 <= word2 {
        (word1.to_string(), word2.to_string(), category)
    } else {
        (word2.to_string(), word1.to_string(), category)
    }
}
