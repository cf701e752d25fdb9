use serde::{Deserialize, Serialize};

/// Lexical category of a word, derived from its part-of-speech tag.
///
/// Only nouns and verbs carry hierarchy support; adjective and adverb
/// similarity is always zero, they only participate through related-word
/// sets during greedy token matching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Noun,
    Verb,
    Adjective,
    Adverb,
    None,
}

impl Category {
    /// Map a POS tag to its lexical category.
    ///
    /// Tags starting with "VB" are verbs, "JJ" adjectives, "RB" adverbs;
    /// every other non-empty tag is treated as a noun.
    #[inline]
    #[must_use]
    pub fn from_pos(tag: &str) -> Self {
        if tag.is_empty() {
            Category::None
        } else if tag.starts_with("VB") {
            Category::Verb
        } else if tag.starts_with("JJ") {
            Category::Adjective
        } else if tag.starts_with("RB") {
            Category::Adverb
        } else {
            Category::Noun
        }
    }

    /// Whether this category has an is-a hierarchy in the lexical database.
    #[inline]
    #[must_use]
    pub fn has_hierarchy(self) -> bool {
        matches!(self, Category::Noun | Category::Verb)
    }
}
