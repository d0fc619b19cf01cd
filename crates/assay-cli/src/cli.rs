//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Assay: normalizer for delimited transaction exports
#[derive(Parser)]
#[command(name = "assay")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a transaction file and export it as JSON
    Normalize {
        /// Path to the delimited transaction file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the JSON document (default: <file>.normalized.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip rows with unparseable dates instead of aborting the run
        #[arg(long)]
        skip_bad_dates: bool,
    },

    /// Detect the file's delimiter, header, and column layout without normalizing
    Sniff {
        /// Path to the delimited transaction file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
