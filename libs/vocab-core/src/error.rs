//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using VocabError.
pub type Result<T> = std::result::Result<T, VocabError>;

/// Errors that can occur while parsing an import file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("missing english word at line {line}")]
    MissingEnglish { line: usize },

    #[error("missing russian translation at line {line}")]
    MissingRussian { line: usize },
}

/// Failure reported by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read record {key}: {message}")]
    Read { key: String, message: String },

    #[error("failed to write record {key}: {message}")]
    Write { key: String, message: String },
}

/// Errors returned by the word repository and study engine.
#[derive(Debug, Error)]
pub enum VocabError {
    #[error("invalid import format: {0}")]
    ImportFormat(#[from] ImportError),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must not contain commas or line breaks")]
    InvalidCharacter { field: &'static str },

    #[error("word \"{english}\" already exists")]
    DuplicateWord { english: String },

    #[error("accuracy {0} is outside 0..=100")]
    InvalidAccuracy(f64),

    #[error("persistence error: {0}")]
    Persistence(#[from] StorageError),

    #[error("failed to encode record {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("corrupt record {key}: {source}")]
    CorruptRecord {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
