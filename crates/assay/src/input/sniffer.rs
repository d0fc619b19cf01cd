//! Dialect sniffing: delimiter detection and header inference.
//!
//! Both inferences work on a fixed-size leading sample of the raw bytes and
//! never touch the row reader used for full processing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AssayError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b',', b';', b'\t', b'|'];

// Shapes matching the accepted date formats, compiled once on first use.
static DATE_SHAPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), // ISO date
        Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap(), // European date
        Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(), // US date
    ]
});

/// Sniffer configuration.
#[derive(Debug, Clone)]
pub struct SnifferConfig {
    /// Number of leading bytes to sample.
    pub sample_size: usize,
    /// Candidate delimiters.
    pub candidates: Vec<u8>,
    /// Maximum data rows consulted by the header heuristic.
    pub header_rows: usize,
    /// Quote character.
    pub quote: char,
}

impl Default for SnifferConfig {
    fn default() -> Self {
        Self {
            sample_size: 1024,
            candidates: DELIMITERS.to_vec(),
            header_rows: 20,
            quote: '"',
        }
    }
}

/// The detected dialect of a delimited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    /// The field delimiter byte.
    pub delimiter: u8,
    /// Whether the first physical row is a header rather than data.
    pub has_header: bool,
}

impl Dialect {
    /// Short format label derived from the delimiter.
    pub fn format_label(&self) -> &'static str {
        match self.delimiter {
            b',' => "csv",
            b';' => "csv-semicolon",
            b'\t' => "tsv",
            b'|' => "psv",
            _ => "delimited",
        }
    }
}

/// Infer the dialect from a leading sample of the raw file bytes.
///
/// Fails with [`AssayError::DelimiterDetection`] when no candidate delimiter
/// yields a consistent column count across the sampled lines.
pub fn sniff(bytes: &[u8], config: &SnifferConfig) -> Result<Dialect> {
    let lines = sample_lines(bytes, config.sample_size);
    if lines.is_empty() {
        return Err(AssayError::DelimiterDetection(
            "no lines to analyze".to_string(),
        ));
    }

    let delimiter = detect_delimiter(&lines, config)?;
    let has_header = detect_header(&lines, delimiter, config);

    Ok(Dialect {
        delimiter,
        has_header,
    })
}

/// Extract complete non-empty lines from the leading sample.
fn sample_lines(bytes: &[u8], sample_size: usize) -> Vec<String> {
    let sample = &bytes[..bytes.len().min(sample_size)];
    let truncated = sample.len() < bytes.len();
    let text = String::from_utf8_lossy(sample);
    let ends_on_boundary = text.ends_with('\n');

    let mut lines: Vec<String> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.to_string())
        .collect();

    // The sample boundary usually cuts the last line mid-field.
    if truncated && !ends_on_boundary && lines.len() > 1 {
        lines.pop();
    }

    lines
}

/// Pick the candidate with the best quote-aware occurrence counts across the
/// sampled lines.
///
/// A perfectly consistent candidate scores highest; a candidate with low
/// count variance (an occasional ragged line) still wins over noise, so a
/// shape-mismatched row dents the score instead of vetoing the delimiter.
/// Row-level mismatches are handled downstream as skips.
fn detect_delimiter(lines: &[String], config: &SnifferConfig) -> Result<u8> {
    let mut best: Option<(usize, u8)> = None;

    for &delim in &config.candidates {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_unquoted(line, delim, config.quote))
            .collect();

        let first = counts[0];
        if first == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>()
                / counts.len() as f64
        } else {
            0.0
        };

        // Tabs are rare in natural data; give them a slight edge on ties.
        let score = if consistent {
            first * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else if variance < 1.0 {
            first * 100
        } else {
            first
        };

        if best.is_none_or(|(s, _)| score > s) {
            best = Some((score, delim));
        }
    }

    best.map(|(_, d)| d).ok_or_else(|| {
        AssayError::DelimiterDetection(
            "no candidate delimiter appears in the sample".to_string(),
        )
    })
}

/// Decide whether the first sampled row is a header.
///
/// One vote per column: if the data cells of a column agree on a numeric or
/// date shape, the column votes for a header when the first row's cell does
/// not share that shape. All-text columns with equal cell lengths vote by
/// comparing the first cell's length. Inconsistent columns abstain. Ties
/// resolve to "no header".
fn detect_header(lines: &[String], delimiter: u8, config: &SnifferConfig) -> bool {
    if lines.len() < 2 {
        return false;
    }

    let first = split_unquoted(&lines[0], delimiter, config.quote);
    let data: Vec<Vec<String>> = lines[1..]
        .iter()
        .take(config.header_rows)
        .map(|line| split_unquoted(line, delimiter, config.quote))
        .collect();

    let mut votes: i32 = 0;
    for (col, first_cell) in first.iter().enumerate() {
        let cells: Vec<&str> = data
            .iter()
            .filter_map(|row| row.get(col))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if cells.is_empty() {
            continue;
        }

        let shapes: Vec<CellShape> = cells.iter().map(|c| classify(c)).collect();
        let column_shape = shapes[0];
        let first_shape = classify(first_cell);

        match column_shape {
            CellShape::Numeric | CellShape::Date
                if shapes.iter().all(|&s| s == column_shape) =>
            {
                votes += if first_shape == column_shape { -1 } else { 1 };
            }
            CellShape::Text if shapes.iter().all(|&s| s == CellShape::Text) => {
                let len = cells[0].chars().count();
                if cells.iter().all(|c| c.chars().count() == len) {
                    votes += if first_cell.trim().chars().count() == len {
                        -1
                    } else {
                        1
                    };
                }
            }
            // Mixed or empty-shaped columns abstain.
            _ => {}
        }
    }

    votes > 0
}

/// Field shape classes used by the header heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellShape {
    Empty,
    Numeric,
    Date,
    Text,
}

fn classify(cell: &str) -> CellShape {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        CellShape::Empty
    } else if DATE_SHAPES.iter().any(|re| re.is_match(trimmed)) {
        CellShape::Date
    } else if trimmed.parse::<f64>().is_ok() {
        CellShape::Numeric
    } else {
        CellShape::Text
    }
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_unquoted(line: &str, delimiter: u8, quote: char) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == quote {
            in_quotes = !in_quotes;
        } else if ch == delim_char && !in_quotes {
            count += 1;
        }
    }

    count
}

/// Split a line on the delimiter, respecting quotes and dropping quote chars.
fn split_unquoted(line: &str, delimiter: u8, quote: char) -> Vec<String> {
    let delim_char = delimiter as char;
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == quote {
            in_quotes = !in_quotes;
        } else if ch == delim_char && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff_default(bytes: &[u8]) -> Result<Dialect> {
        sniff(bytes, &SnifferConfig::default())
    }

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(sniff_default(data).unwrap().delimiter, b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(sniff_default(data).unwrap().delimiter, b'\t');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        let data = b"2024-01-05;Rent;1.200,00;EUR;Completed\n2024-01-06;Food;15,50;EUR;Pending";
        assert_eq!(sniff_default(data).unwrap().delimiter, b';');
    }

    #[test]
    fn test_detect_delimiter_respects_quotes() {
        let data = b"a|\"x|y\"|c\n1|2|3";
        assert_eq!(sniff_default(data).unwrap().delimiter, b'|');
    }

    #[test]
    fn test_ragged_row_does_not_veto_delimiter() {
        // One row is missing a field; the comma must still win so the row
        // can be skipped downstream rather than aborting the run.
        let data = b"transaction_date,description,amount,currency,status\n\
                     2024-03-05,Coffee,4.50,USD,Completed\n\
                     2024-03-06,Books,23.99,USD\n\
                     03/07/2024,Trains,12.34.56,EUR,Pending\n";
        let dialect = sniff_default(data).unwrap();
        assert_eq!(dialect.delimiter, b',');
        assert!(dialect.has_header);
    }

    #[test]
    fn test_consistent_candidate_beats_noisy_one() {
        // Commas appear erratically inside the text; the semicolon count is
        // identical on every line and must win.
        let data = b"2024-03-05;Coffee, large;4.50;EUR;Done\n\
                     2024-03-06;Books;23.99;EUR;Done\n\
                     2024-03-07;Nuts, bolts, screws;12.00;EUR;Done\n";
        let dialect = sniff_default(data).unwrap();
        assert_eq!(dialect.delimiter, b';');
    }

    #[test]
    fn test_detect_delimiter_inconsistent_fails() {
        let data = b"plain text with no structure\nanother line entirely\nthird";
        assert!(matches!(
            sniff_default(data),
            Err(AssayError::DelimiterDetection(_))
        ));
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            sniff_default(b""),
            Err(AssayError::DelimiterDetection(_))
        ));
    }

    #[test]
    fn test_header_detected() {
        let data = b"transaction_date,description,amount,currency,status\n\
                     2024-03-05,Coffee,4.50,USD,Completed\n\
                     2024-03-06,Books,23.99,USD,Pending\n";
        let dialect = sniff_default(data).unwrap();
        assert!(dialect.has_header);
    }

    #[test]
    fn test_no_header_detected() {
        let data = b"2024-03-05,Coffee,4.50,USD,Completed\n\
                     2024-03-06,Books,23.99,USD,Pending\n\
                     2024-03-07,Trains,12.00,EUR,Completed\n";
        let dialect = sniff_default(data).unwrap();
        assert!(!dialect.has_header);
    }

    #[test]
    fn test_single_line_means_no_header() {
        let data = b"2024-03-05,Coffee,4.50,USD,Completed";
        let dialect = sniff_default(data).unwrap();
        assert!(!dialect.has_header);
    }

    #[test]
    fn test_truncated_trailing_line_dropped() {
        // Build input longer than the sample so the last sampled line is
        // cut mid-field; detection must still succeed on the full lines.
        let mut data = String::new();
        for i in 0..60 {
            data.push_str(&format!("2024-03-05,Item number {i},4.50,USD,Done\n"));
        }
        let dialect = sniff_default(data.as_bytes()).unwrap();
        assert_eq!(dialect.delimiter, b',');
    }

    #[test]
    fn test_format_labels() {
        let label = |d: u8| Dialect { delimiter: d, has_header: true }.format_label();
        assert_eq!(label(b','), "csv");
        assert_eq!(label(b';'), "csv-semicolon");
        assert_eq!(label(b'\t'), "tsv");
        assert_eq!(label(b'|'), "psv");
    }
}
