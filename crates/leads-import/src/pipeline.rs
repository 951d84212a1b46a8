//! End-to-end pipeline facade: parse → map → validate → import.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use leads_ingest::{ParsedSheet, parse_file};
use leads_map::{CompletionClient, HeaderMapper, MapperPolicy, select_mapper};
use leads_model::{ImportResult, ValidationError};
use leads_validate::validate_rows;

use crate::config::PipelineConfig;
use crate::importer::Importer;
use crate::traits::{LeadStore, Throttle, VerificationClient};

/// Sample rows handed to the header mapper.
const MAPPER_SAMPLE_ROWS: usize = 5;

/// One import invocation's worth of wiring.
///
/// The pipeline owns no long-lived state: every call parses, maps,
/// validates, and imports one file as a single logical unit and returns a
/// structured [`ImportResult`]. Raw errors never escape.
pub struct ImportPipeline<S, V, T> {
    importer: Importer<S, V, T>,
    mapper: Box<dyn HeaderMapper>,
    config: PipelineConfig,
}

impl<S: LeadStore, V: VerificationClient, T: Throttle> ImportPipeline<S, V, T> {
    /// Wires the pipeline from explicit collaborators and configuration.
    pub fn new(
        config: PipelineConfig,
        store: S,
        verifier: V,
        throttle: T,
        completion: Option<Arc<dyn CompletionClient>>,
    ) -> Self {
        let policy = MapperPolicy {
            ai_enabled: config.ai_mapping_enabled,
        };
        Self {
            importer: Importer::new(store, verifier, throttle),
            mapper: select_mapper(policy, completion),
            config,
        }
    }

    /// Imports one source file.
    pub fn import_file(&self, path: &Path) -> ImportResult {
        debug!(path = %path.display(), "importing lead sheet");
        self.import_sheet(parse_file(path))
    }

    /// Imports an already-parsed sheet.
    pub fn import_sheet(&self, sheet: ParsedSheet) -> ImportResult {
        let total_rows = sheet.rows.len();
        let mut errors: Vec<ValidationError> = sheet
            .errors
            .iter()
            .map(|message| ValidationError::general(0, message.clone()))
            .collect();

        if sheet.rows.is_empty() {
            let message = "sheet contains no data rows";
            if errors.is_empty() {
                errors.push(ValidationError::general(0, message));
            }
            return ImportResult::failure(0, errors, message);
        }

        let headers: Vec<String> = sheet.rows[0]
            .iter()
            .map(|(header, _)| header.to_string())
            .collect();
        let samples = &sheet.rows[..sheet.rows.len().min(MAPPER_SAMPLE_ROWS)];
        let mapping = match self.mapper.map_headers(&headers, samples) {
            Ok(mapping) => mapping,
            Err(err) => {
                errors.push(ValidationError::general(0, err.to_string()));
                return ImportResult::failure(total_rows, errors, err.to_string());
            }
        };
        // An empty heuristic mapping is not fatal: validation falls back
        // to direct alias lookup against the row headers.
        let mapping = if mapping.is_empty() {
            None
        } else {
            Some(mapping.as_slice())
        };

        let batch = validate_rows(&sheet.rows, mapping);
        errors.extend(batch.errors);

        let result = self.importer.import_leads(
            batch.leads,
            &self.config.organization_id,
            self.config.skip_verification,
        );
        errors.extend(result.errors);

        ImportResult {
            success: result.success,
            total_rows,
            imported: result.imported,
            skipped: total_rows - result.imported,
            errors,
            message: result.message,
        }
    }
}
