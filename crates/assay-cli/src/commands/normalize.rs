//! Normalize command - run the full pipeline and export JSON.

use std::path::PathBuf;

use assay::{Assay, AssayConfig, DatePolicy, NormalizerConfig, Severity, export};
use colored::Colorize;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    skip_bad_dates: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate input file exists
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Normalizing".cyan().bold(),
        file.display().to_string().white()
    );

    let config = AssayConfig {
        normalizer: NormalizerConfig {
            date_policy: if skip_bad_dates {
                DatePolicy::SkipRow
            } else {
                DatePolicy::Abort
            },
            ..NormalizerConfig::default()
        },
        ..AssayConfig::default()
    };

    let result = Assay::with_config(config).normalize_file(&file)?;

    if verbose {
        println!();
        println!("{}", "Schema:".yellow().bold());
        println!(
            "  format {} ({} header)",
            result.source.format,
            if result.source.has_header { "with" } else { "no" }
        );
        for (column, pos) in &result.schema.index {
            println!("  {:18} column {}", column.to_string(), pos);
        }
        println!();
    }

    for diag in &result.diagnostics {
        let label = match diag.severity {
            Severity::Warning => diag.kind.label().yellow().bold(),
            Severity::Info => diag.kind.label().blue(),
        };
        let line = diag
            .line
            .map(|l| format!(" (line {l})"))
            .unwrap_or_default();
        println!("{}{}: {}", label, line, diag.message);
    }

    // Determine output path
    let output_path = output.unwrap_or_else(|| {
        let mut p = file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}.normalized.json", stem));
        p
    });

    export::write_json(&result.records, &output_path)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    println!();
    println!(
        "Normalized {} of {} data rows ({} skipped, {} amount fallbacks)",
        result.summary.records.to_string().white().bold(),
        result.summary.data_rows,
        result.summary.skipped_rows.to_string().yellow(),
        result.summary.amount_fallbacks.to_string().yellow()
    );

    if result.diagnostics.is_empty() {
        println!("{}", "No issues found - file normalized cleanly!".green());
    }

    Ok(())
}
