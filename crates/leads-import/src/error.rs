//! Error types for import collaborators.

use thiserror::Error;

/// Errors surfaced by the record store and verification collaborators.
///
/// These never escape the orchestrator: store failures become a failed
/// [`leads_model::ImportResult`], and verification failures are recovered
/// per chunk.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The record store rejected or failed the bulk insert.
    #[error("store error: {0}")]
    Store(String),

    /// The verification collaborator failed.
    #[error("verification error: {0}")]
    Verification(String),
}

impl From<reqwest::Error> for ImportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Verification(err.to_string())
    }
}

/// Result type alias for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;
