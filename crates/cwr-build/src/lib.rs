//! CWR transaction builder.
//!
//! Each [`WorkRow`](cwr_model::WorkRow) becomes one transaction:
//!
//! 1. the work record (NWR or REV)
//! 2. per publisher, the triad original SPU, administrator SPU and SPT
//! 3. per writer, SWR and SWT, plus PWR when the writer names a publisher of
//!    the same work
//! 4. REC and ORN when the row carries release or library data
//!
//! The transmission is framed by HDR/GRH and GRT/TRL, whose counters are
//! taken from what was actually emitted.

mod builder;
mod error;
mod party_ids;
mod transmission;
mod work;

pub use builder::{CwrBuilder, GeneratedFile, LINE_ENDING};
pub use error::BuildError;
