//! Pure per-field normalizers: amounts, dates, and strings.

mod amount;
mod date;

pub use amount::{AmountOutcome, AmountRules, clean_amount, zero};
pub use date::{DATE_FORMATS, default_formats, normalize_date};

/// Trim and lower-case a status field.
pub fn normalize_status(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Trimmed pass-through for fields with no typed normalization.
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lowercased_and_trimmed() {
        assert_eq!(normalize_status("  Completed "), "completed");
        assert_eq!(normalize_status("PENDING"), "pending");
    }

    #[test]
    fn test_text_passes_through_trimmed() {
        assert_eq!(normalize_text("  Coffee shop  "), "Coffee shop");
    }
}
