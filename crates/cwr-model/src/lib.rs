//! Shared domain types for CWR generation and validation.
//!
//! The generation side consumes [`WorkRow`]s (already resolved from whatever
//! column naming the source table used) and the validation side produces
//! [`Finding`]s. Both live here so the builder, validator and CLI agree on
//! one vocabulary.

pub mod finding;
pub mod work;

pub use finding::{Finding, FindingCounts, Severity, ValidationStats};
pub use work::{PublisherInput, RecordingInput, WorkRow, WriterInput};
