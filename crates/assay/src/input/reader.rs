//! Row reading on top of the `csv` crate.

use crate::error::Result;

/// A single raw input row: the split fields plus the 1-based physical line
/// number it came from, kept for diagnostics and error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    /// Render the row roughly as it appeared in the input.
    pub fn display(&self, delimiter: u8) -> String {
        self.fields.join(&(delimiter as char).to_string())
    }
}

/// Read every row from the buffered file contents.
///
/// The reader runs in flexible mode so ragged rows are delivered rather than
/// rejected; shape validation happens downstream. Header handling is ours,
/// so the reader treats every physical row as data.
pub fn read_rows(bytes: &[u8], delimiter: u8, quote: char) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .quote(quote as u8)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);
        rows.push(RawRow {
            line,
            fields: record.iter().map(|s| s.to_string()).collect(),
        });
    }

    Ok(rows)
}
