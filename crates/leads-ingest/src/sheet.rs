//! Shared sheet types and the file-level entry point.

use std::path::Path;

use tracing::warn;

use leads_model::RawRow;

use crate::csv_sheet::parse_csv;
use crate::xlsx_sheet::parse_xlsx;

/// Result of parsing one source file.
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    /// Data rows in source order, headers normalized.
    pub rows: Vec<RawRow>,
    /// Row-level and file-level problems, as human-readable strings.
    pub errors: Vec<String>,
}

impl ParsedSheet {
    /// An empty sheet carrying a single explanatory error.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            errors: vec![message.into()],
        }
    }
}

/// Supported source file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Comma-separated text.
    Csv,
    /// Spreadsheet binary (xlsx family).
    Xlsx,
}

impl SheetFormat {
    /// Picks a format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" | "txt" | "tsv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xls" => Some(Self::Xlsx),
            _ => None,
        }
    }
}

/// Normalizes a header cell: BOM stripped, trimmed, inner whitespace
/// collapsed, lower-cased. Idempotent.
#[must_use]
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut normalized = String::new();
    for part in trimmed.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(part);
    }
    normalized.to_lowercase()
}

/// Normalizes a data cell: BOM stripped, trimmed, empty becomes `None`.
pub(crate) fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses raw file content in the given format.
#[must_use]
pub fn parse_bytes(format: SheetFormat, bytes: &[u8]) -> ParsedSheet {
    match format {
        SheetFormat::Csv => parse_csv(bytes),
        SheetFormat::Xlsx => parse_xlsx(bytes),
    }
}

/// Reads and parses a source file, choosing the format by extension.
///
/// I/O failures and unknown extensions produce an empty sheet with one
/// error string.
#[must_use]
pub fn parse_file(path: &Path) -> ParsedSheet {
    let Some(format) = SheetFormat::from_path(path) else {
        return ParsedSheet::failed(format!(
            "unsupported file format: {}",
            path.display()
        ));
    };
    match std::fs::read(path) {
        Ok(bytes) => parse_bytes(format, &bytes),
        Err(err) => {
            warn!("could not read {}: {err}", path.display());
            ParsedSheet::failed(format!("could not read file {}: {err}", path.display()))
        }
    }
}
