//! Sniff command - report the detected dialect and column layout.

use std::path::PathBuf;

use assay::input::{SnifferConfig, read_rows, sniff};
use assay::schema::ResolvedSchema;
use colored::Colorize;

pub fn run(file: PathBuf, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let contents = std::fs::read(&file)?;
    let config = SnifferConfig::default();
    let dialect = sniff(&contents, &config)?;

    let rows = read_rows(&contents, dialect.delimiter, config.quote)?;
    let first = rows
        .first()
        .ok_or_else(|| format!("No rows in {}", file.display()))?;
    let schema = ResolvedSchema::resolve(&first.fields, dialect.has_header)?;

    if json {
        let doc = serde_json::json!({
            "file": file,
            "dialect": {
                "delimiter": (dialect.delimiter as char).to_string(),
                "format": dialect.format_label(),
                "has_header": dialect.has_header,
            },
            "schema": schema,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Sniffed".cyan().bold(),
        file.display().to_string().white()
    );
    println!(
        "  delimiter {:?} ({}), {}",
        dialect.delimiter as char,
        dialect.format_label(),
        if dialect.has_header {
            "header row detected".green()
        } else {
            "no header row".yellow()
        }
    );

    println!("  {} columns:", schema.width());
    for (pos, name) in schema.columns.iter().enumerate() {
        let recognized = schema.index.values().any(|&p| p == pos);
        if recognized {
            println!("    {:2}  {}", pos, name.white());
        } else {
            println!("    {:2}  {} {}", pos, name, "(unrecognized)".yellow());
        }
    }

    if verbose {
        println!("  {} data rows", rows.len() - usize::from(dialect.has_header));
    }

    Ok(())
}
