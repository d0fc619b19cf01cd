//! JSON export of normalized records.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{AssayError, Result};
use crate::record::Transaction;

/// Serialize records as a pretty-printed JSON array of objects.
pub fn to_json_string(records: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write records as a JSON document, creating the parent directory if absent.
pub fn write_json(records: &[Transaction], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| AssayError::io(path, e))?;
        }
    }

    let file = fs::File::create(path).map_err(|e| AssayError::io(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)?;

    Ok(())
}
