//! Error types for the Trendscope library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Trendscope operations.
///
/// The analysis core itself never fails; these errors come from the input
/// boundary (files, parsing, shape validation) and from configuration.
#[derive(Debug, Error)]
pub enum TrendscopeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Input has the wrong shape (duplicate names, ragged columns, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Trendscope operations.
pub type Result<T> = std::result::Result<T, TrendscopeError>;
