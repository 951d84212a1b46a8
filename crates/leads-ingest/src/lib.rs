//! Lead sheet ingestion.
//!
//! Reads a spreadsheet-like file (delimited text or spreadsheet binary)
//! into an ordered sequence of [`leads_model::RawRow`]s. Both formats
//! normalize headers to trimmed lower-case, treat empty cells as null, and
//! skip fully empty rows.
//!
//! This boundary never propagates errors: unreadable files, malformed
//! records, and empty workbooks all surface as error strings on the
//! returned [`ParsedSheet`], because the caller must still report partial
//! progress for the other files in a multi-file upload.

mod csv_sheet;
mod sheet;
mod xlsx_sheet;

pub use csv_sheet::parse_csv;
pub use sheet::{ParsedSheet, SheetFormat, normalize_header, parse_bytes, parse_file};
pub use xlsx_sheet::parse_xlsx;
