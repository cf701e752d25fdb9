use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty {0} sequence")]
    EmptySequence(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Lexicon error: {0}")]
    Lexicon(#[from] syncx_lexicon::LexiconError),
}
