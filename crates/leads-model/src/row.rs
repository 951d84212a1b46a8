//! Raw spreadsheet row representation.

use std::collections::BTreeMap;

use serde::Serialize;

/// One parsed spreadsheet row: normalized header → cell value.
///
/// Headers are trimmed and lower-cased by the parser before insertion;
/// empty cells are stored as `None`. Rows are ephemeral: each one is
/// consumed by mapping/validation immediately after parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawRow {
    #[serde(flatten)]
    cells: BTreeMap<String, Option<String>>,
}

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a cell under an already-normalized header.
    pub fn insert(&mut self, header: impl Into<String>, value: Option<String>) {
        self.cells.insert(header.into(), value);
    }

    /// Returns the trimmed, non-empty value under `header`, if any.
    #[must_use]
    pub fn value(&self, header: &str) -> Option<&str> {
        let value = self.cells.get(header)?.as_deref()?;
        let trimmed = value.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }

    /// True if the header exists in the row, even with a null cell.
    #[must_use]
    pub fn contains(&self, header: &str) -> bool {
        self.cells.contains_key(header)
    }

    /// Iterates over `(header, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.cells
            .iter()
            .map(|(header, value)| (header.as_str(), value.as_deref()))
    }

    /// True if every cell is null or blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells
            .values()
            .all(|value| value.as_deref().is_none_or(|v| v.trim().is_empty()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
