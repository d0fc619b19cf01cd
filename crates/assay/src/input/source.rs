//! Source file metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sniffer::Dialect;

/// Provenance for one normalization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Whether the first row was detected as a header.
    pub has_header: bool,
    /// Number of data rows (excluding any header).
    pub row_count: usize,
    /// Number of columns in the resolved schema.
    pub column_count: usize,
    /// When the normalization was performed.
    pub normalized_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been normalized.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        dialect: Dialect,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format: dialect.format_label().to_string(),
            has_header: dialect.has_header,
            row_count,
            column_count,
            normalized_at: Utc::now(),
        }
    }
}
