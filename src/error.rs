//! Error types for the somtour engine.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for somtour operations.
#[derive(Error, Debug)]
pub enum SomTourError {
    /// Empty input where a non-empty one is required.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dataset file not found.
    #[error("Dataset not found: {0:?}")]
    DatasetNotFound(PathBuf),

    /// Malformed dataset row.
    #[error("Parse error in {path:?} at line {line}: {message}")]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// One-based line number of the offending row.
        line: usize,
        /// What went wrong with the row.
        message: String,
    },

    /// Error while rendering or writing a snapshot.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for somtour operations.
pub type Result<T> = std::result::Result<T, SomTourError>;

impl From<image::ImageError> for SomTourError {
    fn from(err: image::ImageError) -> Self {
        SomTourError::Snapshot(err.to_string())
    }
}
