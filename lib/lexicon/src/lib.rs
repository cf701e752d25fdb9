//! # syncx Lexicon
//!
//! Lexical database abstraction and word-level similarity for syncx.
//!
//! This crate provides the hierarchy side of the alignment pipeline:
//!
//! - [`Lexicon`] - Query surface over a pre-built lexical database
//! - [`InMemoryLexicon`] - Bundled implementation with a JSON loader
//! - [`LexicalGraph`] - Cycle-safe ancestor-tree traversal with caching
//! - [`WordSimilarityEngine`] - Graded word similarity with a pair cache
//! - [`RelatedWords`] - Memoized related-word sets for greedy matching
//!
//! ## Example
//!
//! ```rust
//! use syncx_lexicon::{Category, InMemoryLexicon, Relation, WordSimilarityEngine};
//! use std::sync::Arc;
//!
//! let mut lexicon = InMemoryLexicon::new();
//! lexicon.add_synset(1, Category::Noun, &["car", "automobile"]).unwrap();
//! lexicon.add_synset(2, Category::Noun, &["vehicle"]).unwrap();
//! lexicon.add_synset(3, Category::Noun, &["entity"]).unwrap();
//! lexicon.add_relation(1, Relation::Hypernym, 2).unwrap();
//! lexicon.add_relation(2, Relation::Hypernym, 3).unwrap();
//!
//! let engine = WordSimilarityEngine::new(Arc::new(lexicon));
//! let sim = engine.similarity("car", "NN", "vehicle", "NN");
//! assert!(sim > 0.0 && sim < 1.0);
//! ```

pub mod category;
pub mod graph;
pub mod lexicon;
pub mod related;
pub mod word_sim;

pub use category::Category;
pub use graph::{AncestorTree, LexicalGraph};
pub use lexicon::{InMemoryLexicon, Lexicon, LexiconError, Relation, Result, SynsetId};
pub use related::RelatedWords;
pub use word_sim::WordSimilarityEngine;
