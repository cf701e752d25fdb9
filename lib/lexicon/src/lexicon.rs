//! Lexical database abstraction
//!
//! The engines depend only on this query surface: candidate senses of a word
//! within a category, member word forms of a synset, and relation edges.
//! `InMemoryLexicon` is the bundled implementation, built programmatically or
//! loaded from a pre-built JSON file at process start.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::category::Category;

/// Opaque identity of a hierarchy node.
pub type SynsetId = u32;

pub type Result<T> = std::result::Result<T, LexiconError>;

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed lexicon file: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Duplicate synset id: {0}")]
    DuplicateSynset(SynsetId),

    #[error("Relation on synset {from} references unknown synset: {to}")]
    UnknownSynset { from: SynsetId, to: SynsetId },
}

/// Relation edges between synsets.
///
/// `Hypernym` is the "is-a" broader edge; `PartHolonym` the "has-a" broader
/// edge used for nouns during upward traversal. The remaining relations only
/// feed the related-word sets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Hypernym,
    Hyponym,
    PartHolonym,
    MemberHolonym,
    SubstanceHolonym,
    PartMeronym,
    MemberMeronym,
    SubstanceMeronym,
    Troponym,
    SimilarTo,
}

const NO_SYNSETS: &[SynsetId] = &[];
const NO_FORMS: &[String] = &[];

/// Query surface over a pre-built lexical database.
///
/// Implementations are read-only after construction and shared across
/// worker threads.
pub trait Lexicon: Send + Sync {
    /// Candidate senses of `word` within `category`.
    fn senses(&self, word: &str, category: Category) -> &[SynsetId];

    /// Member word forms of a synset.
    fn word_forms(&self, synset: SynsetId) -> &[String];

    /// Category of a synset; `Category::None` for unknown ids.
    fn category(&self, synset: SynsetId) -> Category;

    /// Synsets related to `synset` through `relation`.
    fn related(&self, synset: SynsetId, relation: Relation) -> &[SynsetId];

    /// Morphological base-form candidates of a surface form.
    fn base_forms(&self, word: &str, category: Category) -> &[String] {
        let _ = (word, category);
        NO_FORMS
    }
}

#[derive(Debug)]
struct SynsetEntry {
    category: Category,
    words: Vec<String>,
    relations: AHashMap<Relation, Vec<SynsetId>>,
}

/// In-memory lexical database with a builder API and a JSON loader.
#[derive(Debug, Default)]
pub struct InMemoryLexicon {
    synsets: AHashMap<SynsetId, SynsetEntry>,
    // word -> category -> sense ids, in insertion order
    senses: AHashMap<String, AHashMap<Category, Vec<SynsetId>>>,
    // surface form -> category -> base forms
    morphology: AHashMap<String, AHashMap<Category, Vec<String>>>,
}

impl InMemoryLexicon {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a synset with its member word forms. Each form also becomes
    /// a sense entry for lookups in the synset's category.
    pub fn add_synset(&mut self, id: SynsetId, category: Category, words: &[&str]) -> Result<()> {
        if self.synsets.contains_key(&id) {
            return Err(LexiconError::DuplicateSynset(id));
        }
        let forms: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        for form in &forms {
            let by_category = self.senses.entry(form.clone()).or_default();
            let ids = by_category.entry(category).or_default();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        self.synsets.insert(
            id,
            SynsetEntry {
                category,
                words: forms,
                relations: AHashMap::new(),
            },
        );
        Ok(())
    }

    /// Add a directed relation edge between two registered synsets.
    pub fn add_relation(&mut self, from: SynsetId, relation: Relation, to: SynsetId) -> Result<()> {
        if !self.synsets.contains_key(&to) {
            return Err(LexiconError::UnknownSynset { from, to });
        }
        let entry = self
            .synsets
            .get_mut(&from)
            .ok_or(LexiconError::UnknownSynset { from, to: from })?;
        let targets = entry.relations.entry(relation).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
        Ok(())
    }

    /// Record a morphological base form for a surface form.
    pub fn add_base_form(&mut self, form: &str, category: Category, base: &str) {
        let bases = self
            .morphology
            .entry(form.to_lowercase())
            .or_default()
            .entry(category)
            .or_default();
        let base = base.to_lowercase();
        if !bases.contains(&base) {
            bases.push(base);
        }
    }

    /// Load a pre-built lexicon from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let file: LexiconFile = serde_json::from_str(&raw)?;

        let mut lexicon = Self::new();
        for record in &file.synsets {
            let words: Vec<&str> = record.words.iter().map(String::as_str).collect();
            lexicon.add_synset(record.id, record.category, &words)?;
        }
        for record in &file.synsets {
            for rel in &record.relations {
                for &target in &rel.targets {
                    lexicon.add_relation(record.id, rel.relation, target)?;
                }
            }
        }
        for morph in &file.morphology {
            for base in &morph.bases {
                lexicon.add_base_form(&morph.form, morph.category, base);
            }
        }
        info!(
            synsets = file.synsets.len(),
            morphology = file.morphology.len(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }
}

impl Lexicon for InMemoryLexicon {
    fn senses(&self, word: &str, category: Category) -> &[SynsetId] {
        self.senses
            .get(word)
            .and_then(|by_category| by_category.get(&category))
            .map_or(NO_SYNSETS, Vec::as_slice)
    }

    fn word_forms(&self, synset: SynsetId) -> &[String] {
        self.synsets
            .get(&synset)
            .map_or(NO_FORMS, |entry| entry.words.as_slice())
    }

    fn category(&self, synset: SynsetId) -> Category {
        self.synsets
            .get(&synset)
            .map_or(Category::None, |entry| entry.category)
    }

    fn related(&self, synset: SynsetId, relation: Relation) -> &[SynsetId] {
        self.synsets
            .get(&synset)
            .and_then(|entry| entry.relations.get(&relation))
            .map_or(NO_SYNSETS, Vec::as_slice)
    }

    fn base_forms(&self, word: &str, category: Category) -> &[String] {
        self.morphology
            .get(word)
            .and_then(|by_category| by_category.get(&category))
            .map_or(NO_FORMS, Vec::as_slice)
    }
}

/// Serialized lexicon file format.
#[derive(Debug, Serialize, Deserialize)]
struct LexiconFile {
    synsets: Vec<SynsetRecord>,
    #[serde(default)]
    morphology: Vec<MorphologyRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SynsetRecord {
    id: SynsetId,
    category: Category,
    words: Vec<String>,
    #[serde(default)]
    relations: Vec<RelationRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RelationRecord {
    relation: Relation,
    targets: Vec<SynsetId>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MorphologyRecord {
    form: String,
    category: Category,
    bases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> InMemoryLexicon {
        let mut lex = InMemoryLexicon::new();
        lex.add_synset(1, Category::Noun, &["car", "automobile"]).unwrap();
        lex.add_synset(2, Category::Noun, &["vehicle"]).unwrap();
        lex.add_relation(1, Relation::Hypernym, 2).unwrap();
        lex
    }

    #[test]
    fn test_sense_lookup() {
        let lex = sample();
        assert_eq!(lex.senses("car", Category::Noun), &[1]);
        assert_eq!(lex.senses("automobile", Category::Noun), &[1]);
        assert!(lex.senses("car", Category::Verb).is_empty());
        assert!(lex.senses("plane", Category::Noun).is_empty());
    }

    #[test]
    fn test_relations_and_forms() {
        let lex = sample();
        assert_eq!(lex.related(1, Relation::Hypernym), &[2]);
        assert!(lex.related(1, Relation::Troponym).is_empty());
        assert_eq!(lex.word_forms(2), &["vehicle".to_string()]);
        assert_eq!(lex.category(1), Category::Noun);
        assert_eq!(lex.category(99), Category::None);
    }

    #[test]
    fn test_duplicate_synset_rejected() {
        let mut lex = sample();
        assert!(matches!(
            lex.add_synset(1, Category::Noun, &["again"]),
            Err(LexiconError::DuplicateSynset(1))
        ));
    }

    #[test]
    fn test_unknown_relation_target_rejected() {
        let mut lex = sample();
        assert!(matches!(
            lex.add_relation(1, Relation::Hypernym, 42),
            Err(LexiconError::UnknownSynset { from: 1, to: 42 })
        ));
    }

    #[test]
    fn test_base_forms() {
        let mut lex = sample();
        lex.add_base_form("cars", Category::Noun, "car");
        assert_eq!(lex.base_forms("cars", Category::Noun), &["car".to_string()]);
        assert!(lex.base_forms("cars", Category::Verb).is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let json = r#"{
            "synsets": [
                {"id": 1, "category": "noun", "words": ["car"],
                 "relations": [{"relation": "hypernym", "targets": [2]}]},
                {"id": 2, "category": "noun", "words": ["vehicle"]}
            ],
            "morphology": [
                {"form": "cars", "category": "noun", "bases": ["car"]}
            ]
        }"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let lex = InMemoryLexicon::load(file.path()).unwrap();
        assert_eq!(lex.len(), 2);
        assert_eq!(lex.senses("car", Category::Noun), &[1]);
        assert_eq!(lex.related(1, Relation::Hypernym), &[2]);
        assert_eq!(lex.base_forms("cars", Category::Noun), &["car".to_string()]);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            InMemoryLexicon::load("/nonexistent/lexicon.json"),
            Err(LexiconError::Io(_))
        ));
    }
}
