use cwr_format::layout::TAG_WIDTH;
use cwr_format::{RecordType, field_text};
use cwr_model::{Finding, Severity, ValidationStats};
use tracing::{debug, info};

use crate::checks::trailer::{self, Expected};
use crate::checks::{self, transaction};
use crate::outcome::ValidationOutcome;
use crate::state::{GroupState, OpenTransaction, TransactionState};

/// Non-blank lines of `text`, with `\r\n` and `\n` both accepted.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Validate a whole CWR file.
///
/// Line numbers in findings count non-blank lines from 1.
pub fn validate(text: &str) -> ValidationOutcome {
    let lines = split_lines(text);
    let mut validator = Validator::new(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        validator.line(idx + 1, line);
    }
    validator.finish(&lines)
}

struct Validator {
    findings: Vec<Finding>,
    stats: ValidationStats,
    state: TransactionState,
    group: GroupState,
    groups: usize,
    trailer_seen: bool,
}

impl Validator {
    fn new(lines_read: usize) -> Self {
        Self {
            findings: Vec::new(),
            stats: ValidationStats {
                lines_read,
                transactions: 0,
            },
            state: TransactionState::Idle,
            group: GroupState::default(),
            groups: 0,
            trailer_seen: false,
        }
    }

    fn line(&mut self, number: usize, line: &str) {
        let tag = match field_text(line, 0, TAG_WIDTH) {
            Some(tag) if tag.chars().count() == TAG_WIDTH => tag,
            _ => {
                self.findings.push(Finding::error(
                    number,
                    "Line too short to carry a record type",
                    line,
                ));
                return;
            }
        };
        let Some(record) = RecordType::from_tag(tag) else {
            self.findings.push(Finding::warning(
                number,
                format!("Unknown record type '{tag}'"),
                line,
            ));
            return;
        };

        self.findings.extend(checks::run_all(number, record, line));

        match record {
            RecordType::Hdr => {
                if number != 1 {
                    self.findings.push(Finding::warning(
                        number,
                        "HDR record after the first line",
                        line,
                    ));
                }
            }
            RecordType::Grh => {
                self.close_transaction();
                self.groups += 1;
                self.group = GroupState {
                    start_line: Some(number),
                    ..GroupState::default()
                };
            }
            RecordType::Nwr | RecordType::Rev => self.open_transaction(number, line),
            RecordType::Grt => {
                self.close_transaction();
                let start = self.group.start_line.unwrap_or(1);
                let expected = Expected {
                    groups: self.groups,
                    transactions: self.group.transactions,
                    records: number + 1 - start.min(number),
                };
                self.findings
                    .extend(trailer::check_group(number, line, expected));
                self.group = GroupState::default();
            }
            RecordType::Trl => {
                self.close_transaction();
                self.trailer_seen = true;
                let expected = Expected {
                    groups: self.groups,
                    transactions: self.stats.transactions,
                    records: self.stats.lines_read,
                };
                self.findings
                    .extend(trailer::check_file(number, line, expected));
            }
            RecordType::Spu
            | RecordType::Spt
            | RecordType::Swr
            | RecordType::Swt
            | RecordType::Pwr
            | RecordType::Rec
            | RecordType::Orn => self.detail(number, record, line),
        }
    }

    fn open_transaction(&mut self, number: usize, line: &str) {
        self.close_transaction();
        self.stats.transactions += 1;
        self.group.transactions += 1;
        let (sequence, findings) = transaction::work_sequence(number, line, &self.group);
        self.findings.extend(findings);
        if sequence.is_some() {
            self.group.last_sequence = sequence;
        }
        self.state
            .open(OpenTransaction::new(number, line, sequence));
    }

    fn detail(&mut self, number: usize, record: RecordType, line: &str) {
        match self.state.current() {
            Some(open) => {
                let findings = transaction::detail(number, record, line, open);
                self.findings.extend(findings);
            }
            None => self.findings.push(Finding::error(
                number,
                format!("{record} record outside a transaction"),
                line,
            )),
        }
    }

    fn close_transaction(&mut self) {
        if let Some(open) = self.state.close() {
            debug!(
                line = open.line,
                publishers = open.publishers,
                writers = open.writers,
                "transaction closed"
            );
            self.findings.extend(transaction::completeness(&open));
        }
    }

    fn finish(mut self, lines: &[&str]) -> ValidationOutcome {
        self.close_transaction();

        match (lines.first(), lines.last()) {
            (Some(first), Some(last)) => {
                if !first.starts_with(RecordType::Hdr.tag()) {
                    self.findings.push(Finding::warning(
                        1,
                        "File does not start with an HDR record",
                        *first,
                    ));
                }
                if !self.trailer_seen {
                    self.findings.push(Finding::critical(
                        lines.len(),
                        "No TRL record; trailer counts cannot be checked",
                        *last,
                    ));
                } else if !last.starts_with(RecordType::Trl.tag()) {
                    self.findings.push(Finding::warning(
                        lines.len(),
                        "File does not end with a TRL record",
                        *last,
                    ));
                }
            }
            _ => self
                .findings
                .push(Finding::critical(0, "File contains no records", "")),
        }

        let outcome = ValidationOutcome {
            findings: self.findings,
            stats: self.stats,
        };
        info!(
            lines = outcome.stats.lines_read,
            transactions = outcome.stats.transactions,
            critical = outcome.count(Severity::Critical),
            errors = outcome.count(Severity::Error),
            warnings = outcome.count(Severity::Warning),
            "validation finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_accepts_both_line_endings_and_drops_blanks() {
        assert_eq!(
            split_lines("HDR\r\nGRH\n\n   \r\nTRL\r\n"),
            vec!["HDR", "GRH", "TRL"]
        );
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn empty_input_is_critical() {
        let outcome = validate("\r\n");
        assert_eq!(outcome.stats, ValidationStats::default());
        assert_eq!(outcome.count(Severity::Critical), 1);
    }

    #[test]
    fn short_and_unknown_lines_are_findings() {
        let outcome = validate("HD\nXYZ123\n");
        let levels: Vec<(Severity, usize)> = outcome
            .findings
            .iter()
            .map(|finding| (finding.level, finding.line))
            .collect();
        assert_eq!(
            levels,
            vec![
                (Severity::Error, 1),
                (Severity::Warning, 2),
                (Severity::Warning, 1),
                (Severity::Critical, 2),
            ]
        );
    }
}
