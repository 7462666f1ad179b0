//! Error types
//!
//! Only broken input data is an error here. A blank query or a word missing
//! from the table is a normal outcome and is modelled in the engine's result
//! types instead.

use std::path::PathBuf;
use thiserror::Error;

/// A dataset definition that cannot become a [`VectorStore`](crate::VectorStore).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("dataset has {words} words but {vectors} vectors")]
    LengthMismatch { words: usize, vectors: usize },

    #[error("vector {index} ('{word}') has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        index: usize,
        word: String,
        expected: usize,
        found: usize,
    },

    #[error("vector {index} ('{word}') contains a non-finite value")]
    NonFinite { index: usize, word: String },

    #[error("dataset has no dimensions")]
    EmptyDimension,
}

/// Failure while reading or writing a dataset file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("dataset file not found: {0}")]
    NotFound(PathBuf),

    #[error("unrecognised dataset format: {0} (expected .json or .bin)")]
    UnknownFormat(PathBuf),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid binary dataset: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("invalid dataset: {0}")]
    Invalid(#[from] DatasetError),
}

/// Failure resolving a named dataset through the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("unknown dataset: {0}")]
    UnknownDataset(String),

    #[error("failed to load dataset '{name}': {source}")]
    Load {
        name: String,
        #[source]
        source: LoadError,
    },
}

#[cfg(test)]
mod error_test {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = DatasetError::DimensionMismatch {
            index: 2,
            word: "fish".to_string(),
            expected: 25,
            found: 24,
        };
        assert_eq!(
            err.to_string(),
            "vector 2 ('fish') has 24 dimensions, expected 25"
        );
    }

    #[test]
    fn test_load_error_wraps_dataset_error() {
        let err: LoadError = DatasetError::LengthMismatch { words: 3, vectors: 2 }.into();
        assert_eq!(err.to_string(), "invalid dataset: dataset has 3 words but 2 vectors");
    }
}
