//! Delimited-text sheet parsing.

use csv::ReaderBuilder;
use tracing::debug;

use leads_model::RawRow;

use crate::sheet::{ParsedSheet, normalize_cell, normalize_header};

/// Parses comma-separated content.
///
/// The first successfully parsed record is the header row. Malformed
/// records (for example, broken quoting) become row-tagged error strings;
/// every record the reader can recover is still returned. Short rows are
/// padded with nulls and long rows truncated to the header width, so every
/// [`RawRow`] carries exactly the header set.
#[must_use]
pub fn parse_csv(bytes: &[u8]) -> ParsedSheet {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut sheet = ParsedSheet::default();
    let mut headers: Option<Vec<String>> = None;
    let mut record_number = 0usize;

    for record in reader.records() {
        record_number += 1;
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                let row = err
                    .position()
                    .map_or(record_number as u64, |pos| pos.line());
                sheet.errors.push(format!("row {row}: {err}"));
                continue;
            }
        };

        let header_names = match headers {
            Some(ref names) => names,
            None => {
                headers = Some(record.iter().map(normalize_header).collect());
                continue;
            }
        };

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut row = RawRow::new();
        for (idx, header) in header_names.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = record.get(idx).and_then(normalize_cell);
            row.insert(header.clone(), value);
        }
        sheet.rows.push(row);
    }

    debug!(
        rows = sheet.rows.len(),
        errors = sheet.errors.len(),
        "parsed csv sheet"
    );
    sheet
}
