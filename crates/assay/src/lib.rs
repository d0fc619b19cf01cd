//! Assay: normalizer for delimited financial-transaction files of unknown
//! dialect.
//!
//! Bank and accounting exports rarely agree on a delimiter, a header
//! convention, or a number format. Assay sniffs the dialect from a leading
//! sample, resolves column identities against a fixed canonical set, and
//! normalizes each field to a typed value: `chrono` dates, exact
//! `rust_decimal` amounts, lower-cased statuses.
//!
//! # Core Principles
//!
//! - **Sniff, don't assume**: delimiter and header presence are inferred from
//!   the data itself
//! - **Recover locally**: malformed rows are skipped and reported, not fatal
//! - **Exact money**: amounts are arbitrary-precision decimals, never floats
//!
//! # Example
//!
//! ```no_run
//! use assay::Assay;
//!
//! let assay = Assay::new();
//! let result = assay.normalize_file("transactions.csv").unwrap();
//!
//! println!("Records: {}", result.records.len());
//! println!("Skipped: {}", result.summary.skipped_rows);
//! ```

pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod input;
pub mod normalize;
pub mod record;
pub mod schema;

mod assay;

pub use crate::assay::{Assay, AssayConfig, NormalizeResult, RunSummary};
pub use builder::{DatePolicy, NormalizerConfig, RecordBuilder};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::{AssayError, Result};
pub use input::{Dialect, RawRow, SnifferConfig, SourceMetadata};
pub use record::Transaction;
pub use schema::{CanonicalColumn, ResolvedSchema};
