//! Deterministic alias-table header mapping.

use tracing::debug;

use leads_model::{CanonicalField, FieldMapping, RawRow};

use crate::error::Result;
use crate::HeaderMapper;

/// Confidence assigned when a header matches one of the field's exact
/// name spellings (the first entries of its alias list).
const EXACT_NAME_CONFIDENCE: f32 = 0.9;

/// Confidence assigned for looser alias matches.
const ALIAS_CONFIDENCE: f32 = 0.7;

/// Alias entries per field treated as exact name spellings.
const EXACT_NAME_ALIASES: usize = 2;

/// Always-available, synchronous header mapper backed by the alias
/// catalogue on [`CanonicalField`].
///
/// The scan is per header, not per field: each header is compared against
/// every field's alias list in catalogue order and the first matching
/// alias wins. Because alias lists put the canonical name first, a
/// canonical-name header outranks an alias header for the same target.
/// Two headers may still map to the same target field; the validator's
/// first-non-empty rule resolves that later.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMapper;

impl HeuristicMapper {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolves a single header, if any alias matches.
    #[must_use]
    pub fn resolve(header: &str) -> Option<(CanonicalField, f32)> {
        let needle = header.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        for field in CanonicalField::ALL {
            for (idx, alias) in field.aliases().iter().enumerate() {
                if *alias == needle {
                    let confidence = if idx < EXACT_NAME_ALIASES {
                        EXACT_NAME_CONFIDENCE
                    } else {
                        ALIAS_CONFIDENCE
                    };
                    return Some((field, confidence));
                }
            }
        }
        None
    }
}

impl HeaderMapper for HeuristicMapper {
    fn map_headers(&self, headers: &[String], _sample_rows: &[RawRow]) -> Result<Vec<FieldMapping>> {
        let mut mappings = Vec::new();
        for header in headers {
            if let Some((field, confidence)) = Self::resolve(header) {
                mappings.push(FieldMapping::new(header.clone(), field, confidence));
            }
        }
        debug!(
            headers = headers.len(),
            mapped = mappings.len(),
            "heuristic header mapping"
        );
        Ok(mappings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(headers: &[&str]) -> Vec<FieldMapping> {
        let headers: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
        HeuristicMapper::new().map_headers(&headers, &[]).unwrap()
    }

    #[test]
    fn every_alias_maps_to_its_field() {
        for field in CanonicalField::ALL {
            for alias in field.aliases() {
                let mappings = map(&[alias]);
                assert_eq!(mappings.len(), 1, "alias {alias} did not map");
                assert_eq!(mappings[0].target_field, field);
                assert!(mappings[0].confidence >= 0.7);
            }
        }
    }

    #[test]
    fn canonical_names_score_higher_than_loose_aliases() {
        let mappings = map(&["Nome", "Razão Social"]);
        assert_eq!(mappings[0].confidence, 0.9);
        assert_eq!(mappings[1].confidence, 0.7);
        assert_eq!(mappings[0].target_field, CanonicalField::Name);
        assert_eq!(mappings[1].target_field, CanonicalField::Name);
    }

    #[test]
    fn unknown_headers_are_omitted() {
        let mappings = map(&["cnpj", "endereço"]);
        assert!(mappings.is_empty());
    }

    #[test]
    fn sample_scenario() {
        let mappings = map(&["Nome", "E-mail", "Whatsapp"]);
        let targets: Vec<_> = mappings.iter().map(|m| m.target_field).collect();
        assert_eq!(
            targets,
            [CanonicalField::Name, CanonicalField::Email, CanonicalField::Whatsapp]
        );
        assert!(mappings.iter().all(|m| (m.confidence - 0.9).abs() < f32::EPSILON));
    }
}
