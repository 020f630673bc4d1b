//! Configuration handling for sheetpeek

use std::path::PathBuf;

/// How many data rows the preview section shows by default
pub const DEFAULT_PREVIEW_ROWS: usize = 3;

/// Configuration for an inspection run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the spreadsheet file to inspect
    pub file: PathBuf,
    /// Number of data rows to render in the preview section
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::new(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl Config {
    /// Create a new Config for the given file
    pub fn new(file: PathBuf) -> Self {
        Self {
            file,
            ..Default::default()
        }
    }
}
