//! Lead data model definitions.
//!
//! This crate provides the shared types for the lead-ingestion pipeline:
//! the canonical field schema, lead status enums, raw row and mapping
//! types, validated lead records, and the batch import report types.

pub mod enums;
pub mod error;
pub mod fields;
pub mod lead;
pub mod mapping;
pub mod report;
pub mod row;

pub use enums::{LeadStatus, PaymentStatus};
pub use error::{LeadError, Result};
pub use fields::CanonicalField;
pub use lead::{LeadRecord, ValidatedLead};
pub use mapping::FieldMapping;
pub use report::{ErrorField, ImportResult, ValidationError};
pub use row::RawRow;
