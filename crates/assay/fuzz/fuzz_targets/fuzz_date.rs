//! Fuzz target for date parsing.
//!
//! Verifies that format-list parsing never panics on malformed or
//! pathological date strings.

#![no_main]

use assay::normalize::{default_formats, normalize_date};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let _ = normalize_date(raw, &default_formats());
    }
});
