//! Upward hierarchy traversal
//!
//! Builds, per leaf synset, the tree of every ancestor reachable through
//! "is-a" edges (plus "has-a" edges for nouns), with cycle breaking:
//! a noun cycle restarts the traversal with holonym edges disabled, a verb
//! cycle coerces the offending node into a terminal root. Trees, per-node
//! parent sets and upward-distance maps are all cached read-through.

use ahash::{AHashMap, AHashSet};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::category::Category;
use crate::lexicon::{Lexicon, Relation, SynsetId};

/// Ancestor tree of one leaf synset: every node reachable upward, mapped to
/// its direct parents within the tree. Acyclic by construction.
#[derive(Debug)]
pub struct AncestorTree {
    leaf: SynsetId,
    parents: AHashMap<SynsetId, AHashSet<SynsetId>>,
    root: SynsetId,
    // start node -> minimal upward hop count to every ancestor reachable
    // from it; one BFS serves all goals for that start
    distances: RwLock<AHashMap<SynsetId, Arc<AHashMap<SynsetId, u32>>>>,
}

impl AncestorTree {
    fn new(leaf: SynsetId, parents: AHashMap<SynsetId, AHashSet<SynsetId>>) -> Self {
        // Deterministic root choice: smallest id among parentless nodes.
        let root = parents
            .iter()
            .filter(|(_, ps)| ps.is_empty())
            .map(|(&id, _)| id)
            .min()
            .unwrap_or(leaf);
        Self {
            leaf,
            parents,
            root,
            distances: RwLock::new(AHashMap::new()),
        }
    }

    #[inline]
    #[must_use]
    pub fn leaf(&self) -> SynsetId {
        self.leaf
    }

    /// The tree's root: the smallest-id node without parents.
    #[inline]
    #[must_use]
    pub fn root(&self) -> SynsetId {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, node: SynsetId) -> bool {
        self.parents.contains_key(&node)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// All nodes of the tree, in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = SynsetId> + '_ {
        self.parents.keys().copied()
    }

    /// Nodes shared with another tree, sorted for deterministic iteration.
    #[must_use]
    pub fn common_nodes(&self, other: &AncestorTree) -> Vec<SynsetId> {
        let mut common: Vec<SynsetId> =
            self.nodes().filter(|&node| other.contains(node)).collect();
        common.sort_unstable();
        common
    }

    /// Minimal upward hop count from `start` to `goal`, or `None` when
    /// `goal` is not an ancestor of `start` within this tree.
    #[must_use]
    pub fn distance(&self, start: SynsetId, goal: SynsetId) -> Option<u32> {
        self.distances_from(start).get(&goal).copied()
    }

    /// Depth of `node`: its distance to the tree root, falling back to the
    /// nearest reachable terminal root when the tree has several (verbs).
    #[must_use]
    pub fn depth(&self, node: SynsetId) -> u32 {
        let reachable = self.distances_from(node);
        if let Some(&d) = reachable.get(&self.root) {
            return d;
        }
        reachable
            .iter()
            .filter(|(id, _)| self.parents.get(*id).is_some_and(|ps| ps.is_empty()))
            .map(|(_, &d)| d)
            .min()
            .unwrap_or(0)
    }

    fn distances_from(&self, start: SynsetId) -> Arc<AHashMap<SynsetId, u32>> {
        if let Some(map) = self.distances.read().get(&start) {
            return Arc::clone(map);
        }
        let mut dist: AHashMap<SynsetId, u32> = AHashMap::new();
        let mut queue = std::collections::VecDeque::from([start]);
        dist.insert(start, 0);
        while let Some(node) = queue.pop_front() {
            let d = dist[&node];
            if let Some(parents) = self.parents.get(&node) {
                for &parent in parents {
                    if !dist.contains_key(&parent) {
                        dist.insert(parent, d + 1);
                        queue.push_back(parent);
                    }
                }
            }
        }
        let map = Arc::new(dist);
        self.distances
            .write()
            .entry(start)
            .or_insert_with(|| Arc::clone(&map))
            .clone()
    }
}

enum BuildOutcome {
    Tree(AHashMap<SynsetId, AHashSet<SynsetId>>),
    CycleDetected,
}

/// Lazily builds and caches ancestor trees over a shared lexical database.
pub struct LexicalGraph {
    lexicon: Arc<dyn Lexicon>,
    trees: RwLock<AHashMap<SynsetId, Arc<AncestorTree>>>,
    // (node, holonyms enabled) -> sorted direct broader nodes
    broader: RwLock<AHashMap<(SynsetId, bool), Arc<Vec<SynsetId>>>>,
    expansions: AtomicU64,
}

impl LexicalGraph {
    #[must_use]
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        Self {
            lexicon,
            trees: RwLock::new(AHashMap::new()),
            broader: RwLock::new(AHashMap::new()),
            expansions: AtomicU64::new(0),
        }
    }

    /// Number of lexical-database expansions performed so far. Stays flat
    /// across repeated queries that are served from the caches.
    #[must_use]
    pub fn expansion_count(&self) -> u64 {
        self.expansions.load(Ordering::Relaxed)
    }

    /// The ancestor tree of `leaf`, building and caching it on first use.
    pub fn tree(&self, leaf: SynsetId) -> Arc<AncestorTree> {
        if let Some(tree) = self.trees.read().get(&leaf) {
            return Arc::clone(tree);
        }

        let category = self.lexicon.category(leaf);
        let with_holonyms = category == Category::Noun;
        let parents = match self.build(leaf, with_holonyms, category != Category::Noun) {
            BuildOutcome::Tree(parents) => parents,
            BuildOutcome::CycleDetected => {
                // Holonym edge closed a loop; hypernyms alone form a DAG.
                debug!(leaf, "holonym cycle, retrying with hypernyms only");
                match self.build(leaf, false, true) {
                    BuildOutcome::Tree(parents) => parents,
                    BuildOutcome::CycleDetected => unreachable!("cycles are coerced on retry"),
                }
            }
        };

        let tree = Arc::new(AncestorTree::new(leaf, parents));
        self.trees
            .write()
            .entry(leaf)
            .or_insert_with(|| Arc::clone(&tree))
            .clone()
    }

    /// Breadth-first upward expansion from `leaf`.
    ///
    /// `below` tracks, per discovered node, every descendant seen on the way
    /// up to it; a direct parent that is already among the current node's
    /// descendants closes a loop. With `coerce_on_cycle` the current node
    /// becomes a terminal root, otherwise the build is abandoned so the
    /// caller can retry without holonym edges.
    fn build(&self, leaf: SynsetId, with_holonyms: bool, coerce_on_cycle: bool) -> BuildOutcome {
        let mut parents: AHashMap<SynsetId, AHashSet<SynsetId>> = AHashMap::new();
        let mut below: AHashMap<SynsetId, AHashSet<SynsetId>> = AHashMap::new();
        let mut frontier: Vec<SynsetId> = vec![leaf];
        below.insert(leaf, AHashSet::new());

        while !frontier.is_empty() {
            let mut next: Vec<SynsetId> = Vec::new();
            for &node in &frontier {
                let direct = self.direct_broader(node, with_holonyms);
                let node_below = below.get(&node).cloned().unwrap_or_default();

                let cycle = direct.iter().any(|parent| node_below.contains(parent));
                if cycle && !coerce_on_cycle {
                    return BuildOutcome::CycleDetected;
                }

                let kept: AHashSet<SynsetId> = if cycle {
                    AHashSet::new()
                } else {
                    direct.iter().copied().collect()
                };

                for &parent in &kept {
                    let entry = below.entry(parent).or_default();
                    entry.extend(node_below.iter().copied());
                    entry.insert(node);
                    if !parents.contains_key(&parent) && !next.contains(&parent) {
                        next.push(parent);
                    }
                }
                parents.insert(node, kept);
            }
            next.retain(|id| !parents.contains_key(id));
            frontier = next;
        }
        BuildOutcome::Tree(parents)
    }

    /// Direct broader nodes: hypernyms, plus part holonyms for nouns while
    /// holonym edges are enabled. Sorted for deterministic traversal.
    fn direct_broader(&self, node: SynsetId, with_holonyms: bool) -> Arc<Vec<SynsetId>> {
        let key = (node, with_holonyms);
        if let Some(cached) = self.broader.read().get(&key) {
            return Arc::clone(cached);
        }

        self.expansions.fetch_add(1, Ordering::Relaxed);
        let mut result: Vec<SynsetId> = self.lexicon.related(node, Relation::Hypernym).to_vec();
        if with_holonyms && self.lexicon.category(node) == Category::Noun {
            result.extend_from_slice(self.lexicon.related(node, Relation::PartHolonym));
        }
        result.sort_unstable();
        result.dedup();

        let result = Arc::new(result);
        self.broader
            .write()
            .entry(key)
            .or_insert_with(|| Arc::clone(&result))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::InMemoryLexicon;

    fn chain_lexicon() -> Arc<InMemoryLexicon> {
        // dog -> canine -> animal -> entity
        let mut lex = InMemoryLexicon::new();
        lex.add_synset(1, Category::Noun, &["dog"]).unwrap();
        lex.add_synset(2, Category::Noun, &["canine"]).unwrap();
        lex.add_synset(3, Category::Noun, &["animal"]).unwrap();
        lex.add_synset(4, Category::Noun, &["entity"]).unwrap();
        lex.add_relation(1, Relation::Hypernym, 2).unwrap();
        lex.add_relation(2, Relation::Hypernym, 3).unwrap();
        lex.add_relation(3, Relation::Hypernym, 4).unwrap();
        Arc::new(lex)
    }

    #[test]
    fn test_chain_tree() {
        let graph = LexicalGraph::new(chain_lexicon());
        let tree = graph.tree(1);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root(), 4);
        assert_eq!(tree.distance(1, 4), Some(3));
        assert_eq!(tree.distance(1, 2), Some(1));
        assert_eq!(tree.distance(2, 1), None);
        assert_eq!(tree.depth(3), 1);
        assert_eq!(tree.depth(1), 3);
    }

    #[test]
    fn test_tree_caching() {
        let graph = LexicalGraph::new(chain_lexicon());
        let _ = graph.tree(1);
        let after_first = graph.expansion_count();
        assert!(after_first > 0);
        let _ = graph.tree(1);
        assert_eq!(graph.expansion_count(), after_first);
    }

    #[test]
    fn test_noun_holonym_cycle_recovers() {
        // wheel -is a-> part, wheel -part of-> car, car -is a-> vehicle,
        // vehicle -part of-> wheel: the holonym chain loops back down.
        let mut lex = InMemoryLexicon::new();
        lex.add_synset(1, Category::Noun, &["wheel"]).unwrap();
        lex.add_synset(2, Category::Noun, &["part"]).unwrap();
        lex.add_synset(3, Category::Noun, &["car"]).unwrap();
        lex.add_synset(4, Category::Noun, &["vehicle"]).unwrap();
        lex.add_relation(1, Relation::Hypernym, 2).unwrap();
        lex.add_relation(1, Relation::PartHolonym, 3).unwrap();
        lex.add_relation(3, Relation::Hypernym, 4).unwrap();
        lex.add_relation(4, Relation::PartHolonym, 1).unwrap();

        let graph = LexicalGraph::new(Arc::new(lex));
        let tree = graph.tree(1);
        // Fallback drops the holonym edges: only wheel -> part remains.
        assert!(tree.contains(1));
        assert!(tree.contains(2));
        assert!(!tree.contains(3));
        assert_eq!(tree.root(), 2);
    }

    #[test]
    fn test_verb_cycle_coerced_to_root() {
        // run -> move -> run: the top of the verb chain points back down.
        let mut lex = InMemoryLexicon::new();
        lex.add_synset(10, Category::Verb, &["run"]).unwrap();
        lex.add_synset(11, Category::Verb, &["move"]).unwrap();
        lex.add_relation(10, Relation::Hypernym, 11).unwrap();
        lex.add_relation(11, Relation::Hypernym, 10).unwrap();

        let graph = LexicalGraph::new(Arc::new(lex));
        let tree = graph.tree(10);
        assert_eq!(tree.len(), 2);
        // The offending node became a terminal root.
        assert_eq!(tree.root(), 11);
        assert_eq!(tree.distance(10, 11), Some(1));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        // a -> {b, c} -> d: both branches share the top node.
        let mut lex = InMemoryLexicon::new();
        lex.add_synset(1, Category::Noun, &["a"]).unwrap();
        lex.add_synset(2, Category::Noun, &["b"]).unwrap();
        lex.add_synset(3, Category::Noun, &["c"]).unwrap();
        lex.add_synset(4, Category::Noun, &["d"]).unwrap();
        lex.add_relation(1, Relation::Hypernym, 2).unwrap();
        lex.add_relation(1, Relation::Hypernym, 3).unwrap();
        lex.add_relation(2, Relation::Hypernym, 4).unwrap();
        lex.add_relation(3, Relation::Hypernym, 4).unwrap();

        let graph = LexicalGraph::new(Arc::new(lex));
        let tree = graph.tree(1);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.distance(1, 4), Some(2));
    }
}
