//! Fuzz target for the end-to-end normalization pipeline.
//!
//! This fuzzer tests that sniffing, schema resolution, and record building:
//! 1. Never panic on any file contents
//! 2. Fail with structured errors rather than crashing on undelimited input

#![no_main]

use assay::Assay;
use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs
    if data.len() > 10_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::with_suffix(".csv") {
        if temp_file.write_all(data).is_ok() {
            let assay = Assay::new();
            let _ = assay.normalize_file(temp_file.path());
        }
    }
});
