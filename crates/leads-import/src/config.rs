//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Explicit runtime configuration for the import pipeline.
///
/// Everything the pipeline used to read from ambient state is a field
/// here, so tests and hosts control behavior directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Tenant/scope identifier every imported record is keyed by.
    pub organization_id: String,

    /// Allow the AI-assisted header mapper. Hosts enable this only in
    /// restricted runtime contexts (typically local development).
    #[serde(default)]
    pub ai_mapping_enabled: bool,

    /// Skip phone verification even when an instance is connected.
    #[serde(default)]
    pub skip_verification: bool,
}

impl PipelineConfig {
    /// Configuration with defaults: heuristic mapping, verification on.
    #[must_use]
    pub fn new(organization_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            ai_mapping_enabled: false,
            skip_verification: false,
        }
    }
}
