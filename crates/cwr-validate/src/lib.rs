//! CWR file validation.
//!
//! [`validate`] reads a transmission line by line and reports [`Finding`]s:
//!
//! - positional checks driven by the same geometry the builder writes with
//!   (mandatory fields present, numeric fields all digits)
//! - record-level business checks (version type, zero duration, ISWC/ISRC
//!   shape, share bounds)
//! - transaction tracking: every transaction needs at least one SPU and one
//!   SWR, sequences must be contiguous, administrator territories collect
//!   100% of MR and SR
//! - GRT and TRL counters against what the file actually contains
//!
//! Findings are data. Validation never fails and never panics, whatever the
//! input looks like.
//!
//! ```
//! let outcome = cwr_validate::validate("HDR\r\nTRL000010000000000000002\r\n");
//! assert_eq!(outcome.stats.lines_read, 2);
//! ```

mod checks;
mod outcome;
pub mod report;
mod state;
mod validator;

pub use cwr_model::{Finding, FindingCounts, Severity, ValidationStats};
pub use outcome::ValidationOutcome;
pub use report::{DEFAULT_MAX_DISPLAY, render_text, sorted_findings};
pub use validator::{split_lines, validate};
