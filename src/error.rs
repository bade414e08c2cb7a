// Typed failures for the analysis core.
//
// The scorers and the collocation detector return these instead of panicking
// or leaking NaN into results. The CLI wraps them in anyhow with context.

use std::io;

use thiserror::Error;

/// Which side of a keyness comparison an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSide {
    Target,
    Comparison,
}

impl std::fmt::Display for CountSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountSide::Target => write!(f, "target"),
            CountSide::Comparison => write!(f, "comparison"),
        }
    }
}

#[derive(Error, Debug)]
pub enum KeytermError {
    /// Collocation threshold must be a positive count.
    #[error("invalid collocation threshold {0}: min_count must be at least 1")]
    InvalidThreshold(usize),

    /// TF-IDF logarithm base outside (0, 1) ∪ (1, ∞).
    #[error("invalid log base {0}: must be positive and not equal to 1")]
    InvalidLogBase(f64),

    /// Two export keys that map to the same file name.
    #[error("export file {file} for {key:?} was already written for {existing:?}")]
    FileNameCollision {
        key: String,
        existing: String,
        file: String,
    },

    /// A keyness comparison where one side has no tokens at all.
    #[error("{side} term counts sum to zero; log-likelihood is undefined")]
    EmptyVocabulary { side: CountSide },

    #[error("document index {index} out of range (matrix has {len} documents)")]
    DocumentOutOfRange { index: usize, len: usize },

    #[error("no documents belong to group {0:?}")]
    UnknownGroup(String),

    /// Malformed line in a stopword list or lemma table.
    #[error("resource {path}, line {line}: {message}")]
    Resource {
        path: String,
        line: usize,
        message: String,
    },

    #[error("invalid token pattern: {0}")]
    Pattern(#[from] regex_lite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KeytermError>;
