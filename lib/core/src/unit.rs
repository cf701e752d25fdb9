//! Text units
//!
//! A unit is one element of either input sequence: its raw text, the
//! filtered (token, POS) pairs, and optionally the predicate frames produced
//! by an external semantic-role pipeline. Units are immutable once built.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use syncx_lexicon::Category;

/// The role label reserved for the predicate word itself.
pub const PREDICATE_ROLE: &str = "rel";

/// One token with its part-of-speech tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub form: String,
    pub pos: String,
}

/// A predicate frame: role label -> ordered argument tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    roles: AHashMap<String, Vec<String>>,
}

impl Frame {
    /// Build a frame from (role label, tokens) pairs; tokens are lowercased
    /// and entries without an alphanumeric character are dropped.
    pub fn from_roles<I, T>(roles: I) -> Self
    where
        I: IntoIterator<Item = (String, T)>,
        T: IntoIterator<Item = String>,
    {
        let mut map: AHashMap<String, Vec<String>> = AHashMap::new();
        for (label, tokens) in roles {
            let words: Vec<String> = tokens
                .into_iter()
                .filter(|t| has_alphanumeric(t))
                .map(|t| t.to_lowercase())
                .collect();
            if !words.is_empty() {
                map.insert(label, words);
            }
        }
        Self { roles: map }
    }

    /// Total number of role tokens across all labels.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.roles.values().map(Vec::len).sum()
    }

    /// Number of distinct role labels.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn role(&self, label: &str) -> Option<&[String]> {
        self.roles.get(label).map(Vec::as_slice)
    }

    pub fn labels(&self) -> impl Iterator<Item = &String> {
        self.roles.keys()
    }
}

/// One element of an input sequence.
#[derive(Debug, Clone, Default)]
pub struct Unit {
    text: String,
    tokens: Vec<Token>,
    frames: Option<AHashMap<String, Frame>>,
}

impl Unit {
    /// Build a unit from raw text and tagged tokens. Token forms are
    /// lowercased; entries without an alphanumeric character (punctuation)
    /// are dropped.
    pub fn new<I>(text: impl Into<String>, tagged: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let tokens = tagged
            .into_iter()
            .filter(|(form, _)| has_alphanumeric(form))
            .map(|(form, pos)| Token {
                form: form.to_lowercase(),
                pos,
            })
            .collect();
        Self {
            text: text.into(),
            tokens,
            frames: None,
        }
    }

    /// Attach predicate frames from an external role-labelling pipeline.
    #[must_use]
    pub fn with_frames<I>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = (String, Frame)>,
    {
        self.frames = Some(frames.into_iter().collect());
        self
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn frames(&self) -> Option<impl Iterator<Item = (&String, &Frame)>> {
        self.frames.as_ref().map(|map| map.iter())
    }

    /// Whether any frame carries at least `min_words` role tokens.
    #[must_use]
    pub fn has_frame_with_words(&self, min_words: usize) -> bool {
        self.frames
            .as_ref()
            .is_some_and(|map| map.values().any(|f| f.word_count() >= min_words))
    }

    /// Category of a token form, looked up in this unit's token list.
    /// Unknown forms default to nouns.
    #[must_use]
    pub fn category_of(&self, form: &str) -> Category {
        self.tokens
            .iter()
            .find(|t| t.form == form)
            .map_or(Category::Noun, |t| Category::from_pos(&t.pos))
    }

    /// Case-folded text with every non-alphanumeric character stripped,
    /// used for exact matching inside the adaptive search window.
    #[must_use]
    pub fn normalized_text(&self) -> String {
        self.text
            .to_lowercase()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect()
    }
}

#[inline]
fn has_alphanumeric(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_alphanumeric())
}
