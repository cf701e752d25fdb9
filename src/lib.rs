//! # syncx
//!
//! Semantic alignment of two parallel text sequences: a long-form narrative
//! track and a caption/subtitle track. For every unit of the primary
//! sequence syncx finds the most semantically similar unit(s) of the
//! secondary sequence, combining graded lexical similarity from a word
//! hierarchy with structural similarity from semantic roles and word order.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cargo install syncx
//! syncx book.txt subtitles.txt --lexicon wordnet.json --min-delta 0.8
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use syncx::prelude::*;
//! use std::sync::Arc;
//!
//! let lexicon = InMemoryLexicon::load("wordnet.json").unwrap();
//! let engine = AlignmentEngine::new(Arc::new(lexicon), AlignConfig::default()).unwrap();
//!
//! let primary: Vec<Unit> = syncx::input::load_plain("book.txt").unwrap();
//! let secondary: Vec<Unit> = syncx::input::load_plain("subtitles.txt").unwrap();
//! for record in engine.align(&primary, &secondary).unwrap() {
//!     println!("{} -> {} ({:.2})", record.primary, record.secondary, record.score);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`syncx-lexicon`](https://docs.rs/syncx-lexicon) - Lexical database,
//!   hierarchy traversal, word similarity
//! - [`syncx-core`](https://docs.rs/syncx-core) - Units, corpus statistics,
//!   unit similarity, alignment engine

pub mod input;

// Re-export core types
pub use syncx_core::{
    AlignConfig, AlignEvent, AlignmentEngine, CorpusStatistics, Error, Frame, Match, Result,
    Token, Unit, UnitSimilarity, PREDICATE_ROLE,
};

// Re-export lexicon types
pub use syncx_lexicon::{
    Category, InMemoryLexicon, LexicalGraph, Lexicon, LexiconError, Relation, SynsetId,
    WordSimilarityEngine,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AlignConfig, AlignEvent, AlignmentEngine, Category, CorpusStatistics, Frame,
        InMemoryLexicon, Lexicon, Match, Relation, Token, Unit, UnitSimilarity,
        WordSimilarityEngine,
    };
}
