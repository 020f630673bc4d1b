//! Parser layer for reading spreadsheet files

mod excel;

use std::path::Path;

use anyhow::{bail, Result};
use thiserror::Error;

use crate::model::Table;

pub use self::excel::ExcelParser;

/// Failures in parser selection and workbook layout
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("No sheets found in workbook")]
    NoSheets,
    #[error("Sheet is empty")]
    EmptySheet,
}

/// Trait for parsing spreadsheet files
pub trait Parser: Send + Sync + std::fmt::Debug {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for resolving a parser from a file path
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(ExcelParser)],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        for parser in &self.parsers {
            if parser.supports_extension(&ext) {
                return Ok(parser.as_ref());
            }
        }

        // Unrecognized extension: sniff the container's magic bytes
        if let Some(detected) = detect_format(path) {
            for parser in &self.parsers {
                if parser.supports_extension(detected) {
                    return Ok(parser.as_ref());
                }
            }
        }

        bail!(ParseError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string()
        ))
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path) -> Result<Table> {
        let parser = self.get_parser(path)?;
        parser.parse(path)
    }
}

/// Detect spreadsheet container format from content (for files without a
/// recognized extension)
fn detect_format(path: &Path) -> Option<&'static str> {
    use std::fs::File;
    use std::io::Read;

    let mut file = File::open(path).ok()?;
    let mut buffer = [0u8; 4];
    file.read_exact(&mut buffer).ok()?;

    // ZIP container (xlsx, xlsm, ods)
    if &buffer == b"PK\x03\x04" {
        return Some("xlsx");
    }

    // OLE compound file (legacy xls)
    if &buffer == b"\xD0\xCF\x11\xE0" {
        return Some("xls");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_get_parser_by_extension() {
        let factory = ParserFactory::new();
        assert!(factory.get_parser(Path::new("book.xlsx")).is_ok());
        assert!(factory.get_parser(Path::new("book.XLSX")).is_ok());
        assert!(factory.get_parser(Path::new("legacy.xls")).is_ok());
        assert!(factory.get_parser(Path::new("sheet.ods")).is_ok());
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let factory = ParserFactory::new();
        let err = factory.get_parser(Path::new("notes.txt")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));
    }

    #[test]
    fn test_sniffs_zip_container_without_extension() {
        let factory = ParserFactory::new();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"PK\x03\x04rest-of-archive").unwrap();
        assert!(factory.get_parser(file.path()).is_ok());
    }
}
