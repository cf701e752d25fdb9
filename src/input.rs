//! Input loading
//!
//! Two input shapes: plain line-oriented text files (one unit per line,
//! tokenized here with a default noun tag), and an annotated JSON document
//! carrying per-unit tokens, POS tags and optional predicate frames as
//! produced by an external POS/SRL pipeline. A unit the pipeline failed to
//! annotate simply arrives without frames and degrades to the vector
//! strategy downstream.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use syncx_core::{Frame, Unit};

/// Annotated document holding both tracks.
#[derive(Debug, Deserialize)]
pub struct AnnotatedDocument {
    pub primary: Vec<AnnotatedUnit>,
    pub secondary: Vec<AnnotatedUnit>,
}

/// One externally annotated unit: raw text, (token, POS) pairs and optional
/// frames keyed by predicate form.
#[derive(Debug, Deserialize)]
pub struct AnnotatedUnit {
    pub text: String,
    pub tokens: Vec<(String, String)>,
    #[serde(default)]
    pub frames: Option<HashMap<String, HashMap<String, Vec<String>>>>,
}

impl AnnotatedUnit {
    fn into_unit(self) -> Unit {
        let unit = Unit::new(self.text, self.tokens);
        match self.frames {
            Some(frames) => unit.with_frames(frames.into_iter().map(|(predicate, roles)| {
                (predicate, Frame::from_roles(roles))
            })),
            None => unit,
        }
    }
}

/// Load a plain line-oriented file, one unit per line.
///
/// Tokens are split on whitespace and punctuation and tagged "NN"; real POS
/// tagging comes from the annotated input path.
pub fn load_plain<P: AsRef<Path>>(path: P) -> Result<Vec<Unit>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read input file {}", path.display()))?;
    Ok(raw.lines().map(plain_unit).collect())
}

fn plain_unit(line: &str) -> Unit {
    let tagged = line
        .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|token| !token.is_empty())
        .map(|token| (token.to_string(), "NN".to_string()));
    Unit::new(line, tagged)
}

/// Load an annotated JSON document holding both tracks.
pub fn load_annotated<P: AsRef<Path>>(path: P) -> Result<(Vec<Unit>, Vec<Unit>)> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read annotated input {}", path.display()))?;
    let document: AnnotatedDocument = serde_json::from_str(&raw)
        .with_context(|| format!("malformed annotated input {}", path.display()))?;
    let primary = document.primary.into_iter().map(AnnotatedUnit::into_unit).collect();
    let secondary = document
        .secondary
        .into_iter()
        .map(AnnotatedUnit::into_unit)
        .collect();
    Ok((primary, secondary))
}
