//! Error types for dataset loading.

use std::path::PathBuf;

use textline_blstm::NetworkError;
use thiserror::Error;

/// Errors raised while loading alphabets, images, ground truth or model
/// files.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// File could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token in the file did not parse as a number.
    #[error("{path:?}: invalid numeric value '{token}'")]
    Parse { path: PathBuf, token: String },

    /// Alphabet symbol count does not match the model's class count.
    #[error("alphabet has {actual} symbols, model expects {expected}")]
    AlphabetSize { expected: usize, actual: usize },

    /// A label index fell outside the alphabet.
    #[error("class label {label} out of range for {num_classes} classes")]
    ClassOutOfRange { label: usize, num_classes: usize },

    /// A model file block had the wrong element count.
    #[error("model file {path:?}: {what} expected {expected} values, got {actual}")]
    ModelBlockSize {
        path: PathBuf,
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Shape violation surfaced by the core crate.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;
