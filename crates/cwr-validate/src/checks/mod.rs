//! Validation check modules.
//!
//! Line checks see one record at a time. Transaction and trailer checks need
//! the validator's running state and are called from it directly.

mod business;
mod positional;
pub(crate) mod trailer;
pub(crate) mod transaction;

use cwr_format::RecordType;
use cwr_model::Finding;

/// Run every single-line check on one record.
pub(crate) fn run_all(number: usize, record: RecordType, line: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    // 1. Geometry: mandatory fields, numeric fields, possible truncation
    findings.extend(positional::check(number, record, line));

    // 2. Record content: version type, duration, code shapes, share bounds
    findings.extend(business::check(number, record, line));

    findings
}

/// Trimmed value of a field, empty when the line ends before it.
pub(crate) fn value(field: &cwr_format::FieldDescriptor, line: &str) -> String {
    field.read(line).map(str::trim).unwrap_or_default().to_string()
}

/// A zero-padded counter, `None` when absent or not all digits.
pub(crate) fn number(field: &cwr_format::FieldDescriptor, line: &str) -> Option<u64> {
    let value = value(field, line);
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
