//! Schema types: canonical columns and per-file column resolution.

mod columns;

pub use columns::{CanonicalColumn, ResolvedSchema, normalize_header};
