//! GRT and TRL counters against what the file actually holds.

use cwr_format::layout::{grt, trl};
use cwr_model::Finding;

use super::number;

/// Counts a trailer is compared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Expected {
    pub groups: usize,
    pub transactions: usize,
    pub records: usize,
}

/// GRT: transactions in the group and lines from GRH to GRT inclusive.
pub(crate) fn check_group(line_number: usize, line: &str, expected: Expected) -> Vec<Finding> {
    let (Some(transactions), Some(records)) = (
        number(&grt::TRANSACTION_COUNT, line),
        number(&grt::RECORD_COUNT, line),
    ) else {
        return vec![Finding::critical(
            line_number,
            "Group trailer numeric parsing failed",
            line,
        )];
    };
    let mut findings = Vec::new();
    compare(
        line_number,
        line,
        "Group Transaction Count",
        transactions,
        expected.transactions,
        &mut findings,
    );
    compare(
        line_number,
        line,
        "Group Record Count",
        records,
        expected.records,
        &mut findings,
    );
    findings
}

/// TRL: groups, transactions and every line of the file.
pub(crate) fn check_file(line_number: usize, line: &str, expected: Expected) -> Vec<Finding> {
    let (Some(groups), Some(transactions), Some(records)) = (
        number(&trl::GROUP_COUNT, line),
        number(&trl::TRANSACTION_COUNT, line),
        number(&trl::RECORD_COUNT, line),
    ) else {
        return vec![Finding::critical(
            line_number,
            "Trailer numeric parsing failed",
            line,
        )];
    };
    let mut findings = Vec::new();
    compare(
        line_number,
        line,
        "Group Count",
        groups,
        expected.groups,
        &mut findings,
    );
    compare(
        line_number,
        line,
        "Transaction Count",
        transactions,
        expected.transactions,
        &mut findings,
    );
    compare(
        line_number,
        line,
        "Total Record Count",
        records,
        expected.records,
        &mut findings,
    );
    findings
}

fn compare(
    line_number: usize,
    line: &str,
    what: &str,
    declared: u64,
    found: usize,
    findings: &mut Vec<Finding>,
) {
    if usize::try_from(declared).ok() != Some(found) {
        findings.push(Finding::critical(
            line_number,
            format!("{what} Mismatch. Trailer says {declared}, found {found}"),
            line,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: Expected = Expected {
        groups: 1,
        transactions: 2,
        records: 14,
    };

    #[test]
    fn matching_trailer_is_silent() {
        assert!(check_file(14, "TRL000010000000200000014", EXPECTED).is_empty());
    }

    #[test]
    fn each_counter_is_compared() {
        let findings = check_file(14, "TRL000020000000300000014", EXPECTED);
        let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Group Count Mismatch. Trailer says 2, found 1",
                "Transaction Count Mismatch. Trailer says 3, found 2",
            ]
        );
    }

    #[test]
    fn unreadable_group_trailer_is_critical() {
        let findings = check_group(13, "GRT00001000000XX", EXPECTED);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Group trailer numeric parsing failed");
    }
}
