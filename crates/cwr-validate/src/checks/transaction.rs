//! Checks that span the records of one transaction.

use cwr_format::layout::{RECORD_SEQ, TRANSACTION_SEQ, spt, spu};
use cwr_format::{RecordType, Share};
use cwr_model::Finding;

use super::{number, value};
use crate::state::{GroupState, OpenTransaction, PublisherRef};

/// A transaction needs at least one publisher and one writer.
pub(crate) fn completeness(open: &OpenTransaction) -> Vec<Finding> {
    let mut findings = Vec::new();
    if open.publishers == 0 {
        findings.push(Finding::critical(
            open.line,
            "Transaction has no publisher (SPU) record",
            &open.content,
        ));
    }
    if open.writers == 0 {
        findings.push(Finding::critical(
            open.line,
            "Transaction has no writer (SWR) record",
            &open.content,
        ));
    }
    findings
}

/// Sequence numbers of a work record. The first transaction of a group is 0;
/// each later one is the previous plus one.
pub(crate) fn work_sequence(
    line_number: usize,
    line: &str,
    group: &GroupState,
) -> (Option<u64>, Vec<Finding>) {
    let mut findings = Vec::new();
    let sequence = number(&TRANSACTION_SEQ, line);
    if let Some(sequence) = sequence {
        let expected = group.last_sequence.map_or(0, |last| last + 1);
        if sequence != expected {
            findings.push(Finding::error(
                line_number,
                format!("Transaction sequence {sequence} out of order, expected {expected}"),
                line,
            ));
        }
    }
    if let Some(record_seq) = number(&RECORD_SEQ, line).filter(|seq| *seq != 0) {
        findings.push(Finding::error(
            line_number,
            format!("Work record sequence is {record_seq}, expected 0"),
            line,
        ));
    }
    (sequence, findings)
}

/// A detail record inside `open`: sequences, party counts and the
/// administrator territory rule.
pub(crate) fn detail(
    line_number: usize,
    record: RecordType,
    line: &str,
    open: &mut OpenTransaction,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let (Some(expected), Some(found)) = (open.sequence, number(&TRANSACTION_SEQ, line)) {
        if found != expected {
            findings.push(Finding::error(
                line_number,
                format!("Transaction sequence {found} differs from its work record ({expected})"),
                line,
            ));
        }
    }
    if let Some(found) = number(&RECORD_SEQ, line) {
        if found != open.next_record_seq {
            findings.push(Finding::error(
                line_number,
                format!(
                    "Record sequence {found} out of order, expected {}",
                    open.next_record_seq
                ),
                line,
            ));
        }
        open.next_record_seq = found + 1;
    } else {
        open.next_record_seq += 1;
    }

    match record {
        RecordType::Spu => {
            open.publishers += 1;
            open.last_publisher = Some(PublisherRef {
                role: value(&spu::ROLE, line),
                party_id: value(&spu::PARTY_ID, line),
            });
        }
        RecordType::Swr => open.writers += 1,
        RecordType::Spt => {
            let administered = open.last_publisher.as_ref().is_some_and(|publisher| {
                publisher.role == spu::ADMINISTRATOR
                    && publisher.party_id == value(&spt::PARTY_ID, line)
            });
            if administered {
                findings.extend(administrator_shares(line_number, line));
            }
        }
        _ => {}
    }
    findings
}

/// The administrator collects all mechanical and synchronization income in
/// its territory.
fn administrator_shares(line_number: usize, line: &str) -> Vec<Finding> {
    [spt::MR_SHARE, spt::SR_SHARE]
        .into_iter()
        .filter_map(|field| {
            let share = value(&field, line);
            (Share::from_field(&share) != Some(Share::FULL)).then(|| {
                Finding::warning(
                    line_number,
                    format!(
                        "Administrator {} is '{share}', expected '{}'",
                        field.name,
                        Share::FULL.to_field()
                    ),
                    line,
                )
            })
        })
        .collect()
}
