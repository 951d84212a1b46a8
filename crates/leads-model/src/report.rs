//! Batch-level reporting types.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::fields::CanonicalField;

/// The field a validation error refers to, or `general` for row-level
/// problems that have no single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorField {
    Field(CanonicalField),
    General,
}

impl ErrorField {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Field(field) => field.as_str(),
            Self::General => "general",
        }
    }
}

impl From<CanonicalField> for ErrorField {
    fn from(field: CanonicalField) -> Self {
        Self::Field(field)
    }
}

impl fmt::Display for ErrorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One row- or field-level problem found during validation or import.
///
/// Errors accumulate per batch; they never halt processing of sibling rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Spreadsheet row number: the header is row 1, the first data row 2.
    pub row: usize,
    /// Field the error refers to.
    pub field: ErrorField,
    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(row: usize, field: impl Into<ErrorField>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.into(),
            message: message.into(),
        }
    }

    /// A row-level error not tied to a single field.
    #[must_use]
    pub fn general(row: usize, message: impl Into<String>) -> Self {
        Self::new(row, ErrorField::General, message)
    }
}

/// Batch-level contract returned to the caller of an import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportResult {
    /// True if at least one lead was persisted.
    pub success: bool,
    /// Data rows seen in the source batch.
    pub total_rows: usize,
    /// Rows actually inserted by the store.
    pub imported: usize,
    /// `total_rows - imported`.
    pub skipped: usize,
    /// Accumulated row/field errors, advisory and fatal alike.
    pub errors: Vec<ValidationError>,
    /// Human-readable summary of the batch outcome.
    pub message: String,
}

impl ImportResult {
    /// A failed batch that imported nothing.
    #[must_use]
    pub fn failure(total_rows: usize, errors: Vec<ValidationError>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            total_rows,
            imported: 0,
            skipped: total_rows,
            errors,
            message: message.into(),
        }
    }
}
