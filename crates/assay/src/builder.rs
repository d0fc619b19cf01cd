//! Record building: row-shape validation plus per-field normalization.

use crate::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use crate::error::{AssayError, Result};
use crate::input::RawRow;
use crate::normalize::{self, AmountRules};
use crate::record::Transaction;
use crate::schema::{CanonicalColumn, ResolvedSchema};

/// Policy for rows whose transaction date matches no accepted format.
///
/// There is no safe default date, so the conservative policy aborts the run;
/// callers can opt into dropping the offending row instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePolicy {
    /// Abort the whole run.
    #[default]
    Abort,
    /// Drop the offending row and record a diagnostic.
    SkipRow,
}

/// Configuration for the per-field normalizers.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Accepted date formats, tried in order.
    pub date_formats: Vec<String>,
    /// What to do with unparseable dates.
    pub date_policy: DatePolicy,
    /// Amount separator heuristics.
    pub amount: AmountRules,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            date_formats: normalize::default_formats(),
            date_policy: DatePolicy::default(),
            amount: AmountRules::default(),
        }
    }
}

/// Builds normalized records from raw rows.
pub struct RecordBuilder<'a> {
    schema: &'a ResolvedSchema,
    config: &'a NormalizerConfig,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(schema: &'a ResolvedSchema, config: &'a NormalizerConfig) -> Self {
        Self { schema, config }
    }

    /// Build records from the data rows, preserving input order.
    ///
    /// Rows whose field count disagrees with the schema width are skipped
    /// with a diagnostic. Every record plus every skip accounts for exactly
    /// one input row.
    pub fn build(
        &self,
        rows: &[RawRow],
        delimiter: u8,
    ) -> Result<(Vec<Transaction>, Vec<Diagnostic>)> {
        let mut records = Vec::new();
        let mut diagnostics = Vec::new();

        for row in rows {
            if row.fields.len() != self.schema.width() {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::RowShapeMismatch,
                        Severity::Warning,
                        format!(
                            "expected {} fields, found {}; row skipped",
                            self.schema.width(),
                            row.fields.len()
                        ),
                    )
                    .with_line(row.line)
                    .with_raw(row.display(delimiter)),
                );
                continue;
            }

            if let Some(record) = self.build_record(row, &mut diagnostics)? {
                records.push(record);
            }
        }

        Ok((records, diagnostics))
    }

    /// Normalize one shape-valid row. Returns `Ok(None)` when the row is
    /// dropped under [`DatePolicy::SkipRow`].
    fn build_record(
        &self,
        row: &RawRow,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Option<Transaction>> {
        let mut record = Transaction::default();

        for (&column, &pos) in &self.schema.index {
            let raw = row.fields[pos].as_str();

            match column {
                CanonicalColumn::TransactionDate => {
                    match normalize::normalize_date(raw, &self.config.date_formats) {
                        Some(date) => record.transaction_date = Some(date),
                        None => match self.config.date_policy {
                            DatePolicy::Abort => {
                                return Err(AssayError::UnrecognizedDate {
                                    value: raw.trim().to_string(),
                                    line: row.line,
                                });
                            }
                            DatePolicy::SkipRow => {
                                diagnostics.push(
                                    Diagnostic::new(
                                        DiagnosticKind::DateSkip,
                                        Severity::Warning,
                                        "unrecognized date format; row skipped".to_string(),
                                    )
                                    .with_line(row.line)
                                    .with_column(column.as_str())
                                    .with_raw(raw.trim()),
                                );
                                return Ok(None);
                            }
                        },
                    }
                }
                CanonicalColumn::Amount => {
                    let outcome = normalize::clean_amount(raw, &self.config.amount);
                    if outcome.is_fallback() {
                        diagnostics.push(
                            Diagnostic::new(
                                DiagnosticKind::AmountFallback,
                                Severity::Warning,
                                "malformed amount; zero substituted".to_string(),
                            )
                            .with_line(row.line)
                            .with_column(column.as_str())
                            .with_raw(raw.trim()),
                        );
                    }
                    record.amount = Some(outcome.value());
                }
                CanonicalColumn::Status => {
                    record.status = Some(normalize::normalize_status(raw));
                }
                CanonicalColumn::Description => {
                    record.description = Some(normalize::normalize_text(raw));
                }
                CanonicalColumn::Currency => {
                    record.currency = Some(normalize::normalize_text(raw));
                }
            }
        }

        Ok(Some(record))
    }
}
