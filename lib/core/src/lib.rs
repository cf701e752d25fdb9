//! # syncx Core
//!
//! Unit-level similarity and alignment for the syncx engine.
//!
//! This crate provides the sequence side of the pipeline:
//!
//! - [`Unit`] - One element of an input sequence: tokens, POS tags, frames
//! - [`CorpusStatistics`] - Informativeness weights over both sequences
//! - [`UnitSimilarity`] - Frame and vector strategies for unit pairs
//! - [`AlignmentEngine`] - Adaptive-window walk emitting the match stream
//!
//! ## Example
//!
//! ```rust
//! use syncx_core::{AlignConfig, AlignmentEngine, Unit};
//! use syncx_lexicon::InMemoryLexicon;
//! use std::sync::Arc;
//!
//! let tag = |text: &str| {
//!     Unit::new(
//!         text,
//!         text.split_whitespace()
//!             .map(|w| (w.to_string(), "NN".to_string())),
//!     )
//! };
//! let primary = vec![tag("the cat sat"), tag("it was raining")];
//! let secondary = vec![tag("the cat sat"), tag("it was raining")];
//!
//! let config = AlignConfig {
//!     min_delta: 0.5,
//!     min_matching_words: 2,
//!     ..AlignConfig::default()
//! };
//! let engine = AlignmentEngine::new(Arc::new(InMemoryLexicon::new()), config).unwrap();
//! let matches = engine.align(&primary, &secondary).unwrap();
//! assert_eq!(matches.len(), 2);
//! ```

pub mod align;
pub mod config;
pub mod corpus;
pub mod error;
pub mod unit;
pub mod unit_sim;

pub use align::{AlignEvent, AlignmentEngine, Match};
pub use config::AlignConfig;
pub use corpus::CorpusStatistics;
pub use error::{Error, Result};
pub use unit::{Frame, Token, Unit, PREDICATE_ROLE};
pub use unit_sim::UnitSimilarity;
