//! AI-assisted header mapping.
//!
//! Wraps a [`CompletionClient`] and asks it to map sheet headers to the
//! canonical schema. The upstream service returns free text around JSON:
//! code fences are stripped, and if the whole payload does not parse, the
//! first balanced `[...]` substring is tried. Every
//! failure path falls back to the wrapped [`HeuristicMapper`]; the only
//! hard failure is when the heuristic fallback maps nothing either.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde_json::Value;
use tracing::{debug, warn};

use leads_model::{CanonicalField, FieldMapping, RawRow};

use crate::completion::CompletionClient;
use crate::error::{MapError, Result};
use crate::heuristic::HeuristicMapper;
use crate::{HeaderMapper, MAX_SAMPLE_ROWS};

/// Header mapper backed by a text-completion service, with heuristic
/// fallback.
pub struct AiMapper<C> {
    client: C,
    fallback: HeuristicMapper,
}

impl<C: CompletionClient> AiMapper<C> {
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            fallback: HeuristicMapper::new(),
        }
    }

    fn heuristic_fallback(
        &self,
        headers: &[String],
        sample_rows: &[RawRow],
    ) -> Result<Vec<FieldMapping>> {
        let mappings = self.fallback.map_headers(headers, sample_rows)?;
        if mappings.is_empty() {
            return Err(MapError::NoFieldsMapped);
        }
        Ok(mappings)
    }
}

impl<C: CompletionClient> HeaderMapper for AiMapper<C> {
    fn map_headers(&self, headers: &[String], sample_rows: &[RawRow]) -> Result<Vec<FieldMapping>> {
        let prompt = build_prompt(headers, sample_rows);
        let mappings = match self.client.complete(&prompt) {
            Ok(text) => parse_completion(&text),
            Err(err) => {
                warn!("completion service failed, using heuristic mapping: {err}");
                return self.heuristic_fallback(headers, sample_rows);
            }
        };
        if mappings.is_empty() {
            debug!("completion yielded no usable mappings, using heuristic mapping");
            return self.heuristic_fallback(headers, sample_rows);
        }
        Ok(mappings)
    }
}

/// Builds the mapping prompt: header list, up to [`MAX_SAMPLE_ROWS`]
/// sample rows, and the canonical-field alias catalogue.
#[must_use]
pub fn build_prompt(headers: &[String], sample_rows: &[RawRow]) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Map the spreadsheet columns below to the canonical lead fields. \
         Respond with ONLY a JSON array of objects shaped \
         {\"sourceField\": string, \"targetField\": string, \"confidence\": number between 0 and 1}. \
         Omit columns that match no field. No prose, no code fences.\n\n",
    );

    prompt.push_str("Canonical fields and known aliases:\n");
    for field in CanonicalField::ALL {
        let _ = writeln!(prompt, "- {}: {}", field.as_str(), field.aliases().join(", "));
    }

    let _ = writeln!(prompt, "\nColumns: {}", headers.join(", "));

    if !sample_rows.is_empty() {
        prompt.push_str("\nSample rows:\n");
        for row in sample_rows.iter().take(MAX_SAMPLE_ROWS) {
            if let Ok(json) = serde_json::to_string(row) {
                let _ = writeln!(prompt, "{json}");
            }
        }
    }
    prompt
}

/// Parses completion output into usable mappings.
///
/// Discards non-object entries, entries missing `sourceField` or
/// `targetField`, unknown target fields, entries below the confidence
/// threshold, and duplicate source fields (first wins). Returns an empty
/// vector on any unrecoverable parse failure; the caller decides whether
/// to fall back.
#[must_use]
pub fn parse_completion(text: &str) -> Vec<FieldMapping> {
    let stripped = strip_code_fences(text);
    let parsed = serde_json::from_str::<Value>(stripped).ok().or_else(|| {
        extract_json_array(stripped).and_then(|slice| serde_json::from_str::<Value>(slice).ok())
    });
    let Some(Value::Array(entries)) = parsed else {
        return Vec::new();
    };

    let mut seen_sources = BTreeSet::new();
    let mut mappings = Vec::new();
    for entry in entries {
        let Value::Object(map) = entry else { continue };
        let Some(source) = map.get("sourceField").and_then(Value::as_str) else {
            continue;
        };
        let Some(target) = map
            .get("targetField")
            .and_then(Value::as_str)
            .and_then(CanonicalField::parse)
        else {
            continue;
        };
        let confidence = map.get("confidence").and_then(Value::as_f64).unwrap_or(0.0) as f32;
        let mapping = FieldMapping::new(source, target, confidence);
        if !mapping.is_usable() {
            continue;
        }
        if seen_sources.insert(source.to_string()) {
            mappings.push(mapping);
        }
    }
    mappings
}

/// Removes a leading and trailing Markdown code fence, if present.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json", "JSON", …) up to the first newline.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Finds the first balanced top-level `[...]` substring, skipping
/// brackets inside JSON strings.
fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}
