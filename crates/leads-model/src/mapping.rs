//! Header-to-field mapping types.

use serde::{Deserialize, Serialize};

use crate::fields::CanonicalField;

/// Minimum confidence for a mapping to be usable downstream.
pub const MIN_MAPPING_CONFIDENCE: f32 = 0.5;

/// A proposed correspondence between one source column and one canonical
/// field.
///
/// A set of these (at most one per `source_field`) describes how an entire
/// sheet's columns line up with the canonical schema. Serialized in
/// camelCase because that is the wire shape the AI mapping collaborator
/// produces and consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// Header as it appears in the source sheet (normalized form).
    pub source_field: String,
    /// Canonical field the column maps to.
    pub target_field: CanonicalField,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
}

impl FieldMapping {
    #[must_use]
    pub fn new(source_field: impl Into<String>, target_field: CanonicalField, confidence: f32) -> Self {
        Self {
            source_field: source_field.into(),
            target_field,
            confidence,
        }
    }

    /// True if the mapping clears the usability threshold.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.confidence >= MIN_MAPPING_CONFIDENCE
    }
}
