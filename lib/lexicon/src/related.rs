//! Related-word sets
//!
//! For greedy token matching a word is "related" to the member forms of its
//! own senses (synonyms) and of the synsets one relation step away, with the
//! relation list depending on the category. Morphological base forms join
//! the set so inflected tokens can still match their lemmas. Sets are
//! computed once per (word, category) and memoized.

use ahash::{AHashMap, AHashSet};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::category::Category;
use crate::lexicon::{Lexicon, Relation};

const NOUN_RELATIONS: &[Relation] = &[
    Relation::Hypernym,
    Relation::Hyponym,
    Relation::MemberHolonym,
    Relation::PartHolonym,
    Relation::SubstanceHolonym,
    Relation::MemberMeronym,
    Relation::PartMeronym,
    Relation::SubstanceMeronym,
];

const VERB_RELATIONS: &[Relation] = &[Relation::Hypernym, Relation::Troponym];

const ADJECTIVE_RELATIONS: &[Relation] = &[Relation::SimilarTo];

/// Memoized related-word lookup over a shared lexical database.
pub struct RelatedWords {
    lexicon: Arc<dyn Lexicon>,
    cache: RwLock<AHashMap<(String, Category), Arc<AHashSet<String>>>>,
}

impl RelatedWords {
    #[must_use]
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        Self {
            lexicon,
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Words related to `word` within `category`. Empty for words the
    /// database does not know.
    pub fn related(&self, word: &str, category: Category) -> Arc<AHashSet<String>> {
        let key = (word.to_string(), category);
        if let Some(set) = self.cache.read().get(&key) {
            return Arc::clone(set);
        }

        let set = Arc::new(self.collect(word, category));
        self.cache
            .write()
            .entry(key)
            .or_insert_with(|| Arc::clone(&set))
            .clone()
    }

    fn collect(&self, word: &str, category: Category) -> AHashSet<String> {
        let relations: &[Relation] = match category {
            Category::Noun => NOUN_RELATIONS,
            Category::Verb => VERB_RELATIONS,
            Category::Adjective => ADJECTIVE_RELATIONS,
            Category::Adverb | Category::None => &[],
        };

        let mut related: AHashSet<String> = AHashSet::new();
        for &sense in self.lexicon.senses(word, category) {
            related.extend(self.lexicon.word_forms(sense).iter().cloned());
            for &relation in relations {
                for &neighbor in self.lexicon.related(sense, relation) {
                    related.extend(self.lexicon.word_forms(neighbor).iter().cloned());
                }
            }
        }
        for base in self.lexicon.base_forms(word, category) {
            related.insert(base.clone());
        }
        related
    }
}
