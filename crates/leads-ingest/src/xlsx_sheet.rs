//! Spreadsheet-binary sheet parsing.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use tracing::debug;

use leads_model::RawRow;

use crate::sheet::{ParsedSheet, normalize_cell, normalize_header};

/// Parses xlsx content, reading only the first sheet.
///
/// A workbook with zero sheets, or a first sheet with zero rows, produces
/// an empty row set with one explanatory error. This boundary never
/// panics.
#[must_use]
pub fn parse_xlsx(bytes: &[u8]) -> ParsedSheet {
    let mut workbook = match Xlsx::new(Cursor::new(bytes)) {
        Ok(workbook) => workbook,
        Err(err) => return ParsedSheet::failed(format!("could not read spreadsheet: {err}")),
    };

    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return ParsedSheet::failed("spreadsheet contains no sheets");
    };

    let range = match workbook.worksheet_range(&sheet_name) {
        Ok(range) => range,
        Err(err) => {
            return ParsedSheet::failed(format!(
                "could not read sheet '{sheet_name}': {err}"
            ));
        }
    };

    let mut rows_iter = range.rows();
    let Some(header_cells) = rows_iter.next() else {
        return ParsedSheet::failed(format!("sheet '{sheet_name}' contains no rows"));
    };
    let headers: Vec<String> = header_cells
        .iter()
        .map(|cell| normalize_header(&render_cell(cell).unwrap_or_default()))
        .collect();

    let mut sheet = ParsedSheet::default();
    for cells in rows_iter {
        if cells.iter().all(is_blank_cell) {
            continue;
        }
        let mut row = RawRow::new();
        for (idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = cells
                .get(idx)
                .and_then(render_cell)
                .and_then(|text| normalize_cell(&text));
            row.insert(header.clone(), value);
        }
        sheet.rows.push(row);
    }

    debug!(sheet = %sheet_name, rows = sheet.rows.len(), "parsed xlsx sheet");
    sheet
}

fn is_blank_cell(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

/// Renders a cell to text.
///
/// Integral floats render without a decimal point: xlsx stores phone
/// numbers and ids as floats, and `11987654321.0` would otherwise leak
/// into downstream digit handling.
fn render_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(text) => Some(text.clone()),
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) => Some(format_float(*value)),
        Data::Bool(value) => Some(value.to_string()),
        Data::DateTime(value) => Some(format_float(value.as_f64())),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Some(text.clone()),
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
