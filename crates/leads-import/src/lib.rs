//! Batch lead import.
//!
//! This crate owns the back half of the ingestion pipeline: the
//! [`Importer`] performs chunked, throttled phone verification and a
//! single bulk insert with partial-success semantics, and the
//! [`ImportPipeline`] facade wires parser, mapper, validator, and importer
//! together for the host application.
//!
//! External collaborators (record store, verification gateway) sit behind
//! traits; HTTP implementations live in [`http`] and in-memory fakes back
//! the tests.

mod config;
mod error;
pub mod http;
mod importer;
mod pipeline;
mod traits;

pub use config::PipelineConfig;
pub use error::{ImportError, Result};
pub use importer::{Importer, VERIFICATION_CHUNK_SIZE};
pub use pipeline::ImportPipeline;
pub use traits::{
    ChannelInstance, FixedDelay, LeadStore, NoPause, NumberCheck, Throttle, VerificationClient,
};
