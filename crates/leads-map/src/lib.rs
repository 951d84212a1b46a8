//! Header-to-field mapping.
//!
//! Resolves arbitrary spreadsheet column headers to the canonical lead
//! schema. Two interchangeable strategies implement [`HeaderMapper`]:
//!
//! - [`HeuristicMapper`]: deterministic alias-table matching, always
//!   available.
//! - [`AiMapper`]: asks an external completion service for mappings with
//!   confidence scores. It owns a [`HeuristicMapper`] and falls back to it
//!   on any failure.
//!
//! Strategy selection is an explicit policy value ([`MapperPolicy`]) passed
//! in by the host, never an ambient environment check.

mod ai;
mod completion;
mod error;
mod heuristic;
mod policy;

pub use ai::AiMapper;
pub use completion::{CompletionClient, CompletionConfig, HttpCompletionClient};
pub use error::{MapError, Result};
pub use heuristic::HeuristicMapper;
pub use policy::{MapperPolicy, select_mapper};

use leads_model::{FieldMapping, RawRow};

/// Maximum sample rows embedded in a mapping request.
pub const MAX_SAMPLE_ROWS: usize = 5;

/// A strategy that resolves sheet headers to canonical fields.
pub trait HeaderMapper: Send + Sync {
    /// Proposes one mapping per resolvable header.
    ///
    /// `sample_rows` carries up to [`MAX_SAMPLE_ROWS`] data rows to give
    /// content-aware strategies something to look at; the heuristic
    /// strategy ignores it. Headers that cannot be resolved are omitted,
    /// never guessed.
    fn map_headers(&self, headers: &[String], sample_rows: &[RawRow]) -> Result<Vec<FieldMapping>>;
}
