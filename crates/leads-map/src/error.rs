//! Error types for mapping operations.

use thiserror::Error;

/// Errors from header mapping.
#[derive(Debug, Error)]
pub enum MapError {
    /// No header could be resolved to a canonical field, even after
    /// heuristic fallback. The only hard failure in the mapper.
    #[error("no field could be mapped from the sheet headers")]
    NoFieldsMapped,

    /// The completion collaborator failed (transport, auth, or quota).
    #[error("completion service error: {0}")]
    Completion(String),
}

impl From<reqwest::Error> for MapError {
    fn from(err: reqwest::Error) -> Self {
        Self::Completion(err.to_string())
    }
}

/// Result type alias for mapping operations.
pub type Result<T> = std::result::Result<T, MapError>;
