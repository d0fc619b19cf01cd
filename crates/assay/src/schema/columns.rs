//! Column identity resolution.
//!
//! Maps raw header text (or a fixed positional fallback) onto the canonical
//! transaction columns used by the record builder.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AssayError, Result};

// Runs of anything outside [a-z0-9], collapsed to a single underscore.
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// The recognized semantic transaction fields, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalColumn {
    TransactionDate,
    Description,
    Amount,
    Currency,
    Status,
}

impl CanonicalColumn {
    /// Positional fallback schema for headerless files.
    pub const FALLBACK: [CanonicalColumn; 5] = [
        CanonicalColumn::TransactionDate,
        CanonicalColumn::Description,
        CanonicalColumn::Amount,
        CanonicalColumn::Currency,
        CanonicalColumn::Status,
    ];

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalColumn::TransactionDate => "transaction_date",
            CanonicalColumn::Description => "description",
            CanonicalColumn::Amount => "amount",
            CanonicalColumn::Currency => "currency",
            CanonicalColumn::Status => "status",
        }
    }

    /// Look up a column by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "transaction_date" => Some(CanonicalColumn::TransactionDate),
            "description" => Some(CanonicalColumn::Description),
            "amount" => Some(CanonicalColumn::Amount),
            "currency" => Some(CanonicalColumn::Currency),
            "status" => Some(CanonicalColumn::Status),
            _ => None,
        }
    }
}

impl std::fmt::Display for CanonicalColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize raw header text to snake_case: trim, lower-case, collapse every
/// run of non-alphanumeric characters to a single underscore.
pub fn normalize_header(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    NON_ALNUM
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// The resolved column layout for one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedSchema {
    /// Ordered column names, one per position.
    pub columns: Vec<String>,
    /// Position of each recognized column, in canonical order.
    pub index: IndexMap<CanonicalColumn, usize>,
    /// Whether the names came from a detected header row.
    pub has_header: bool,
}

impl ResolvedSchema {
    /// Resolve the schema from the first row and the header-detection result.
    ///
    /// With a header, each token is normalized and recognized names join the
    /// index map (the last occurrence of a duplicate wins); unrecognized
    /// positions stay in `columns` for column-count purposes only. Without a
    /// header, the fixed fallback sequence is assigned positionally
    /// regardless of the actual row width; a width disagreement then rejects
    /// every row downstream rather than partially mapping.
    pub fn resolve(first_row: &[String], has_header: bool) -> Result<Self> {
        if has_header && first_row.is_empty() {
            return Err(AssayError::Schema("first row has no columns".to_string()));
        }

        let mut columns = Vec::new();
        let mut index = IndexMap::new();

        if has_header {
            for (pos, raw) in first_row.iter().enumerate() {
                let name = normalize_header(raw);
                if let Some(canonical) = CanonicalColumn::from_name(&name) {
                    index.insert(canonical, pos);
                }
                columns.push(name);
            }
        } else {
            for (pos, canonical) in CanonicalColumn::FALLBACK.iter().enumerate() {
                index.insert(*canonical, pos);
                columns.push(canonical.as_str().to_string());
            }
        }

        index.sort_keys();

        Ok(Self {
            columns,
            index,
            has_header,
        })
    }

    /// Expected field count for every valid row.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Header positions whose normalized name is not a recognized column.
    pub fn unrecognized(&self) -> impl Iterator<Item = (usize, &str)> {
        let mapped: Vec<usize> = self.index.values().copied().collect();
        self.columns
            .iter()
            .enumerate()
            .filter(move |(pos, _)| !mapped.contains(pos))
            .map(|(pos, name)| (pos, name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_header_variants() {
        assert_eq!(normalize_header("Transaction Date"), "transaction_date");
        assert_eq!(normalize_header("transaction-date"), "transaction_date");
        assert_eq!(normalize_header("TRANSACTION_DATE!!"), "transaction_date");
        assert_eq!(normalize_header("  Amount (EUR)  "), "amount_eur");
        assert_eq!(normalize_header("status"), "status");
    }

    #[test]
    fn test_resolve_from_header() {
        let schema = ResolvedSchema::resolve(
            &row(&["Transaction Date", "Description", "Amount", "Currency", "Status"]),
            true,
        )
        .unwrap();

        assert_eq!(schema.width(), 5);
        assert_eq!(schema.index[&CanonicalColumn::TransactionDate], 0);
        assert_eq!(schema.index[&CanonicalColumn::Status], 4);
        assert_eq!(schema.unrecognized().count(), 0);
    }

    #[test]
    fn test_resolve_header_with_unknown_columns() {
        let schema = ResolvedSchema::resolve(
            &row(&["Transaction Date", "Branch Code", "Amount"]),
            true,
        )
        .unwrap();

        assert_eq!(schema.width(), 3);
        assert_eq!(schema.index.len(), 2);
        let extras: Vec<_> = schema.unrecognized().collect();
        assert_eq!(extras, vec![(1, "branch_code")]);
    }

    #[test]
    fn test_resolve_duplicate_header_last_wins() {
        let schema =
            ResolvedSchema::resolve(&row(&["amount", "description", "AMOUNT"]), true).unwrap();
        assert_eq!(schema.index[&CanonicalColumn::Amount], 2);
    }

    #[test]
    fn test_resolve_fallback_positional() {
        let schema = ResolvedSchema::resolve(&row(&["2024-03-05", "Coffee", "4.50"]), false)
            .unwrap();

        // The fallback is assigned regardless of actual row width.
        assert_eq!(schema.width(), 5);
        assert_eq!(schema.columns[0], "transaction_date");
        assert_eq!(schema.index[&CanonicalColumn::Currency], 3);
        assert!(!schema.has_header);
    }

    #[test]
    fn test_resolve_empty_header_fails() {
        assert!(matches!(
            ResolvedSchema::resolve(&[], true),
            Err(AssayError::Schema(_))
        ));
    }

    #[test]
    fn test_index_iterates_in_canonical_order() {
        let schema = ResolvedSchema::resolve(
            &row(&["Status", "Amount", "Transaction Date"]),
            true,
        )
        .unwrap();
        let order: Vec<_> = schema.index.keys().copied().collect();
        assert_eq!(
            order,
            vec![
                CanonicalColumn::TransactionDate,
                CanonicalColumn::Amount,
                CanonicalColumn::Status,
            ]
        );
    }
}
