//! Non-fatal events reported alongside a run's output.
//!
//! Fatal conditions are [`AssayError`](crate::AssayError)s; everything a run
//! can recover from locally lands here, in input order, without altering the
//! structure of the normalized output.

use serde::{Deserialize, Serialize};

/// Kind of recoverable event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A data row's field count disagrees with the schema; the row was skipped.
    RowShapeMismatch,
    /// A malformed amount was replaced by the zero amount.
    AmountFallback,
    /// A row dropped for an unparseable date under the skip-row policy.
    DateSkip,
    /// A header column whose normalized name matches no recognized field.
    UnrecognizedColumn,
}

impl DiagnosticKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::RowShapeMismatch => "Row Shape Mismatch",
            DiagnosticKind::AmountFallback => "Amount Fallback",
            DiagnosticKind::DateSkip => "Date Skip",
            DiagnosticKind::UnrecognizedColumn => "Unrecognized Column",
        }
    }
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only, may not require action.
    Info,
    /// The output was affected; review recommended.
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
        }
    }
}

/// One recoverable event observed during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// 1-based physical line in the input, when row-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Canonical column name, when field-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub message: String,
    /// Raw input excerpt the event refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with no location attached.
    pub fn new(kind: DiagnosticKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            line: None,
            column: None,
            message: message.into(),
            raw: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods_attach_location() {
        let diag = Diagnostic::new(
            DiagnosticKind::AmountFallback,
            Severity::Warning,
            "malformed amount",
        )
        .with_line(7)
        .with_column("amount")
        .with_raw("12.34.56");

        assert_eq!(diag.line, Some(7));
        assert_eq!(diag.column.as_deref(), Some("amount"));
        assert_eq!(diag.raw.as_deref(), Some("12.34.56"));
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&DiagnosticKind::RowShapeMismatch).unwrap();
        assert_eq!(json, "\"row_shape_mismatch\"");
    }
}
