//! Transaction date parsing against an ordered list of accepted formats.

use chrono::NaiveDate;

/// Accepted date formats, tried in order: ISO, European, US.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y"];

/// The default format list as owned strings, for configuration.
pub fn default_formats() -> Vec<String> {
    DATE_FORMATS.iter().map(|f| f.to_string()).collect()
}

/// Parse a raw date field; the first matching format wins.
///
/// Returns `None` when no format matches; the caller decides whether that
/// aborts the run or skips the row.
pub fn normalize_date(raw: &str, formats: &[String]) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}
