//! Error types for the Assay library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Assay operations.
///
/// Only conditions that abort a run live here; recoverable per-row events
/// (shape mismatches, amount fallbacks) are reported as
/// [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Debug, Error)]
pub enum AssayError {
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

    /// No candidate delimiter produced a consistent column count.
    #[error("Delimiter detection failed: {0}")]
    DelimiterDetection(String),

    /// Empty input or an unusable first row.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A transaction_date field matched none of the accepted formats.
    #[error("Unrecognized date format '{value}' at line {line}")]
    UnrecognizedDate { value: String, line: usize },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AssayError {
    /// Wrap an IO error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssayError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Assay operations.
pub type Result<T> = std::result::Result<T, AssayError>;
