//! Field presence and format, read from the record geometry.

use cwr_format::{FieldFormat, RecordType};
use cwr_model::Finding;

pub(super) fn check(number: usize, record: RecordType, line: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    for field in record.template().checked_fields() {
        let raw = field.read(line);
        let value = raw.map(str::trim).unwrap_or_default();

        if value.is_empty() {
            if field.required {
                let message = match raw {
                    None => format!("Line truncated. Missing {}", field.name),
                    Some(_) => format!("Missing mandatory field: {}", field.name),
                };
                findings.push(Finding::error(number, message, line));
            }
            continue;
        }

        if field.format == FieldFormat::Numeric && !value.bytes().all(|b| b.is_ascii_digit()) {
            findings.push(Finding::error(
                number,
                format!("{} must be numeric, found '{value}'", field.name),
                line,
            ));
        }

        let fills_field = raw.is_some_and(|raw| {
            raw.chars().count() == field.length && !raw.ends_with(' ')
        });
        if field.watch_truncation && fills_field {
            findings.push(Finding::info(
                number,
                format!(
                    "{} fills all {} characters and may have been truncated",
                    field.name, field.length
                ),
                line,
            ));
        }
    }
    findings
}
