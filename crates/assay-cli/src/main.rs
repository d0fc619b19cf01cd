//! Assay CLI - normalize delimited transaction exports.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Normalize {
            file,
            output,
            skip_bad_dates,
        } => commands::normalize::run(file, output, skip_bad_dates, cli.verbose),

        Commands::Sniff { file, json } => commands::sniff::run(file, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
