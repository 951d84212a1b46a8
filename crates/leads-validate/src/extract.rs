//! Field extraction from raw rows.
//!
//! Two extraction modes coexist: direct alias lookup against the canonical
//! alias catalogue (the standard import path), and mapping-driven lookup
//! using an externally supplied [`FieldMapping`] set (the AI-assisted
//! path). Both apply the same rule when several columns feed one target
//! field: the first non-empty value wins.

use leads_model::{CanonicalField, FieldMapping, RawRow};

/// Pulls the value for `field` out of `row`.
///
/// With a mapping, usable entries targeting `field` are tried in order;
/// without one, the field's alias catalogue is scanned instead.
#[must_use]
pub fn extract(row: &RawRow, field: CanonicalField, mapping: Option<&[FieldMapping]>) -> Option<String> {
    match mapping {
        Some(mapping) => extract_mapped(row, field, mapping),
        None => extract_direct(row, field),
    }
}

fn extract_mapped(row: &RawRow, field: CanonicalField, mapping: &[FieldMapping]) -> Option<String> {
    for entry in mapping {
        if entry.target_field != field || !entry.is_usable() {
            continue;
        }
        // Mappings produced by the AI collaborator may carry the header's
        // original casing; row keys are normalized.
        let value = row
            .value(&entry.source_field)
            .or_else(|| row.value(&entry.source_field.trim().to_lowercase()));
        if let Some(value) = value {
            return Some(value.to_string());
        }
    }
    None
}

fn extract_direct(row: &RawRow, field: CanonicalField) -> Option<String> {
    for alias in field.aliases() {
        if let Some(value) = row.value(alias) {
            return Some(value.to_string());
        }
    }
    None
}
