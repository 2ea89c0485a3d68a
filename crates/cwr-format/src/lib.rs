//! CWR (Common Works Registration) fixed-width record geometry.
//!
//! Every CWR record is a line of text whose fields live at exact character
//! offsets. This crate owns that geometry and the one primitive that writes
//! into a line:
//!
//! - [`FixedWidthBuffer`]: a space-filled character array with
//!   `write(offset, text, width, pad)`
//! - [`FieldDescriptor`] / [`RecordTemplate`]: ordered field lists per record
//!   type, shared by the assembler and the validator
//! - [`layout`]: the canonical table for HDR, GRH, NWR/REV, SPU, SPT, SWR,
//!   SWT, PWR, REC, ORN, GRT and TRL
//! - [`format_share`], [`format_duration`], [`format_ipi`], [`format_date`]:
//!   value normalization with documented fallbacks
//!
//! # Example
//!
//! ```
//! use cwr_format::{FieldValues, RecordType, keys};
//!
//! let mut values = FieldValues::new();
//! values.set(keys::TRANSACTION_SEQ, 0u32);
//! values.set(keys::RECORD_SEQ, 0u32);
//! values.set(keys::WORK_TITLE, "Dust Mites");
//! values.set(keys::WORK_ID, "LUM00000001");
//!
//! let line = RecordType::Nwr.template().build(&values);
//! assert!(line.starts_with("NWR0000000000000000DUST MITES"));
//! assert_eq!(&line[142..145], "ORI");
//! ```

mod buffer;
mod error;
mod field;
mod format;
pub mod keys;
pub mod layout;
mod template;
mod values;

pub use buffer::{FixedWidthBuffer, LINE_BUFFER_WIDTH, PadMode};
pub use error::{Result, TemplateError};
pub use field::{FieldDescriptor, FieldFormat, FieldSource, field_text};
pub use format::{
    SHARE_WIDTH, Share, ShareInput, format_date, format_duration, format_ipi, format_share,
    normalize_value, parse_duration_seconds,
};
pub use layout::{RecordType, validate_layouts};
pub use template::{RecordTemplate, build};
pub use values::{FieldValue, FieldValues};
