//! Fuzz target for amount cleaning.
//!
//! This fuzzer tests that the separator disambiguation:
//! 1. Never panics on any input string
//! 2. Always produces a value, even for pathological separator runs

#![no_main]

use assay::normalize::{AmountRules, clean_amount};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let rules = AmountRules::default();
        let outcome = clean_amount(raw, &rules);
        // Every outcome must carry a usable value.
        let _ = outcome.value();
    }
});
