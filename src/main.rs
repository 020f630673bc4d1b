//! sheetpeek - structural inspection of spreadsheet files

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use sheetpeek::config::Config;
use sheetpeek::output::render_to_stdout;
use sheetpeek::parser::ParserFactory;

/// Print a spreadsheet's column names, first rows, and column data types
#[derive(Parser, Debug)]
#[command(name = "sheetpeek")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Spreadsheet file to inspect (xlsx, xlsm, xls, ods)
    file: PathBuf,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // One diagnostic line, on stdout with the summaries, never a panic
            println!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::new(cli.file);

    let factory = ParserFactory::new();
    let table = factory
        .parse(&config.file)
        .with_context(|| format!("Failed to load spreadsheet: {}", config.file.display()))?;

    render_to_stdout(&table, config.preview_rows)
}
