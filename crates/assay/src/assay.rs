//! Main Assay struct and public API.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::builder::{NormalizerConfig, RecordBuilder};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use crate::error::{AssayError, Result};
use crate::input::{self, SnifferConfig, SourceMetadata};
use crate::record::Transaction;
use crate::schema::ResolvedSchema;

/// Configuration for a normalization run.
#[derive(Debug, Clone, Default)]
pub struct AssayConfig {
    /// Dialect sniffing configuration.
    pub sniffer: SnifferConfig,
    /// Per-field normalization configuration.
    pub normalizer: NormalizerConfig,
}

/// Result of normalizing one file.
///
/// The exported document carries only `records`; the rest is the observable
/// side channel for callers that want provenance and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// The resolved column layout.
    pub schema: ResolvedSchema,
    /// Normalized records, in input row order.
    pub records: Vec<Transaction>,
    /// Recoverable events, in input order.
    pub diagnostics: Vec<Diagnostic>,
    /// Run counts.
    pub summary: RunSummary,
}

/// Counts for one run. `records + skipped_rows == data_rows` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Data rows in the input (excluding any header).
    pub data_rows: usize,
    /// Records emitted.
    pub records: usize,
    /// Rows skipped (shape mismatches, plus date skips under that policy).
    pub skipped_rows: usize,
    /// Amounts replaced by zero.
    pub amount_fallbacks: usize,
}

/// The normalization engine: sniff, resolve, build, summarize.
pub struct Assay {
    config: AssayConfig,
}

impl Assay {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(AssayConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: AssayConfig) -> Self {
        Self { config }
    }

    /// Normalize one delimited transaction file.
    ///
    /// Reads the file into memory once; the sniffer works on the leading
    /// sample of that buffer and the row reader on the whole of it, so the
    /// input is never consumed twice.
    pub fn normalize_file(&self, path: impl AsRef<Path>) -> Result<NormalizeResult> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| AssayError::io(path, e))?;

        let dialect = input::sniff(&contents, &self.config.sniffer)?;
        let rows = input::read_rows(&contents, dialect.delimiter, self.config.sniffer.quote)?;

        let Some(first) = rows.first() else {
            return Err(AssayError::Schema("no rows in input".to_string()));
        };
        let schema = ResolvedSchema::resolve(&first.fields, dialect.has_header)?;

        // Without a header the first physical row is data.
        let data_rows = if dialect.has_header {
            &rows[1..]
        } else {
            &rows[..]
        };

        let mut diagnostics: Vec<Diagnostic> = schema
            .unrecognized()
            .map(|(pos, name)| {
                Diagnostic::new(
                    DiagnosticKind::UnrecognizedColumn,
                    Severity::Info,
                    format!("header column '{name}' at position {pos} is not a recognized field"),
                )
                .with_column(name)
            })
            .collect();

        let builder = RecordBuilder::new(&schema, &self.config.normalizer);
        let (records, mut row_diagnostics) = builder.build(data_rows, dialect.delimiter)?;
        diagnostics.append(&mut row_diagnostics);

        let summary = RunSummary {
            data_rows: data_rows.len(),
            records: records.len(),
            skipped_rows: data_rows.len() - records.len(),
            amount_fallbacks: diagnostics
                .iter()
                .filter(|d| d.kind == DiagnosticKind::AmountFallback)
                .count(),
        };

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            dialect,
            data_rows.len(),
            schema.width(),
        );

        Ok(NormalizeResult {
            source,
            schema,
            records,
            diagnostics,
            summary,
        })
    }
}

impl Default for Assay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_normalize_simple_csv() {
        let content = "transaction_date,description,amount,currency,status\n\
                       2024-03-05,Coffee,4.50,USD,Completed\n\
                       2024-03-06,Books,23.99,USD,Pending\n";
        let file = create_test_file(content);

        let result = Assay::new().normalize_file(file.path()).unwrap();

        assert_eq!(result.source.format, "csv");
        assert!(result.source.has_header);
        assert_eq!(result.source.row_count, 2);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.summary.skipped_rows, 0);
        assert_eq!(result.records[0].status.as_deref(), Some("completed"));
    }

    #[test]
    fn test_normalize_headerless_file_uses_fallback() {
        let content = "2024-03-05,Coffee,4.50,USD,Completed\n\
                       2024-03-06,Books,23.99,USD,Pending\n\
                       2024-03-07,Trains,12.00,EUR,Completed\n";
        let file = create_test_file(content);

        let result = Assay::new().normalize_file(file.path()).unwrap();

        assert!(!result.source.has_header);
        // The first physical row is data.
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.records[0].description.as_deref(), Some("Coffee"));
    }

    #[test]
    fn test_empty_file_fails_delimiter_detection() {
        let file = create_test_file("");
        assert!(matches!(
            Assay::new().normalize_file(file.path()),
            Err(AssayError::DelimiterDetection(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Assay::new().normalize_file("does/not/exist.csv"),
            Err(AssayError::Io { .. })
        ));
    }

    #[test]
    fn test_unknown_header_columns_reported_not_exported() {
        let content = "transaction_date,branch_code,amount\n\
                       2024-03-05,B-17,4.50\n\
                       2024-03-06,B-18,23.99\n";
        let file = create_test_file(content);

        let result = Assay::new().normalize_file(file.path()).unwrap();

        assert!(
            result
                .diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::UnrecognizedColumn)
        );
        assert!(result.records[0].description.is_none());
    }

    #[test]
    fn test_summary_accounts_for_every_row() {
        let content = "transaction_date,description,amount,currency,status\n\
                       2024-03-05,Coffee,4.50,USD,Completed\n\
                       2024-03-06,too,short\n\
                       2024-03-07,Books,23.99,USD,Pending\n";
        let file = create_test_file(content);

        let result = Assay::new().normalize_file(file.path()).unwrap();

        assert_eq!(
            result.summary.records + result.summary.skipped_rows,
            result.summary.data_rows
        );
        assert_eq!(result.summary.skipped_rows, 1);
    }
}
