use cwr_format::{FieldValues, RecordType, keys};
use cwr_validate::{Finding, Severity, render_text, validate};
use proptest::prelude::*;

fn record(record: RecordType, fields: &[(&'static str, &str)]) -> String {
    let values: FieldValues = fields.iter().copied().collect();
    record.template().build(&values)
}

/// One transaction: NWR, then the publisher triad and the writer group when
/// asked for.
fn transaction(seq: u32, publisher: bool, writer: bool) -> Vec<String> {
    let mut record_seq = 0u32;
    let mut detail = |kind: RecordType, fields: &[(&'static str, &str)]| {
        record_seq += 1;
        let mut values: FieldValues = fields.iter().copied().collect();
        values
            .set(keys::TRANSACTION_SEQ, seq)
            .set(keys::RECORD_SEQ, record_seq);
        kind.template().build(&values)
    };

    let mut work: FieldValues = [
        (keys::WORK_TITLE, "Salt Road"),
        (keys::WORK_ID, "LUM00000001"),
        (keys::DURATION, "000345"),
    ]
    .into_iter()
    .collect();
    work.set(keys::TRANSACTION_SEQ, seq).set(keys::RECORD_SEQ, 0u32);
    let mut lines = vec![RecordType::Nwr.template().build(&work)];

    if publisher {
        lines.push(detail(
            RecordType::Spu,
            &[
                (keys::CHAIN_ID, "1"),
                (keys::PARTY_ID, "PUB000001"),
                (keys::PUBLISHER_NAME, "Harbour Songs"),
                (keys::PUBLISHER_ROLE, "E"),
                (keys::PR_SHARE, "05000"),
                (keys::MR_SHARE, "10000"),
                (keys::SR_SHARE, "10000"),
            ],
        ));
        lines.push(detail(
            RecordType::Spu,
            &[
                (keys::CHAIN_ID, "1"),
                (keys::PARTY_ID, "000000012"),
                (keys::PUBLISHER_NAME, "Lumina Publishing UK"),
                (keys::PUBLISHER_ROLE, "SE"),
                (keys::PR_SHARE, "00000"),
                (keys::MR_SHARE, "00000"),
                (keys::SR_SHARE, "00000"),
            ],
        ));
        lines.push(detail(
            RecordType::Spt,
            &[
                (keys::PARTY_ID, "000000012"),
                (keys::PR_SHARE, "05000"),
                (keys::MR_SHARE, "10000"),
                (keys::SR_SHARE, "10000"),
                (keys::TERRITORY, "0826"),
                (keys::TERRITORY_SEQ, "1"),
            ],
        ));
    }
    if writer {
        lines.push(detail(
            RecordType::Swr,
            &[
                (keys::PARTY_ID, "WRI000001"),
                (keys::LAST_NAME, "Wheeler"),
                (keys::CAPACITY, "CA"),
                (keys::PR_SHARE, "05000"),
                (keys::MR_SHARE, "00000"),
                (keys::SR_SHARE, "00000"),
            ],
        ));
        lines.push(detail(
            RecordType::Swt,
            &[
                (keys::PARTY_ID, "WRI000001"),
                (keys::PR_SHARE, "05000"),
                (keys::MR_SHARE, "00000"),
                (keys::SR_SHARE, "00000"),
                (keys::TERRITORY, "2136"),
                (keys::TERRITORY_SEQ, "1"),
            ],
        ));
        if publisher {
            lines.push(detail(
                RecordType::Pwr,
                &[
                    (keys::PARTY_ID, "PUB000001"),
                    (keys::PUBLISHER_NAME, "Harbour Songs"),
                    (keys::WRITER_PARTY_ID, "WRI000001"),
                    (keys::CHAIN_ID, "1"),
                ],
            ));
        }
    }
    lines
}

/// HDR, GRH, the transactions, and trailers whose counts match.
fn file_lines(transactions: &[Vec<String>]) -> Vec<String> {
    let body = transactions.concat();
    let count = transactions.len().to_string();
    let group_records = (body.len() + 2).to_string();
    let total_records = (body.len() + 4).to_string();

    let mut lines = vec![
        record(
            RecordType::Hdr,
            &[
                (keys::SENDER_IPI, "01254514077"),
                (keys::SENDER_NAME, "Lumina Publishing UK"),
                (keys::CREATION_DATE, "20261016"),
                (keys::CREATION_TIME, "093000"),
                (keys::TRANSMISSION_DATE, "20261016"),
            ],
        ),
        record(
            RecordType::Grh,
            &[(keys::TRANSACTION_TYPE, "NWR"), (keys::GROUP_ID, "1")],
        ),
    ];
    lines.extend(body);
    lines.push(record(
        RecordType::Grt,
        &[
            (keys::GROUP_ID, "1"),
            (keys::TRANSACTION_COUNT, &count),
            (keys::RECORD_COUNT, &group_records),
        ],
    ));
    lines.push(record(
        RecordType::Trl,
        &[
            (keys::GROUP_COUNT, "1"),
            (keys::TRANSACTION_COUNT, &count),
            (keys::RECORD_COUNT, &total_records),
        ],
    ));
    lines
}

fn join(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\r\n")).collect()
}

fn messages(findings: &[Finding], level: Severity) -> Vec<&str> {
    findings
        .iter()
        .filter(|finding| finding.level == level)
        .map(|finding| finding.message.as_str())
        .collect()
}

#[test]
fn well_formed_file_is_clean() {
    let lines = file_lines(&[transaction(0, true, true), transaction(1, true, true)]);
    let outcome = validate(&join(&lines));

    assert_eq!(outcome.findings, Vec::<Finding>::new());
    assert_eq!(outcome.stats.lines_read, 18);
    assert_eq!(outcome.stats.transactions, 2);
}

#[test]
fn lf_only_input_validates_the_same() {
    let lines = file_lines(&[transaction(0, true, true)]);
    let outcome = validate(&lines.join("\n"));
    assert!(outcome.is_clean());
    assert_eq!(outcome.stats.lines_read, 9 + 2);
}

#[test]
fn transaction_without_writer_is_critical() {
    let lines = file_lines(&[transaction(0, true, false)]);
    let outcome = validate(&join(&lines));

    assert_eq!(outcome.findings.len(), 1);
    let finding = &outcome.findings[0];
    assert_eq!(finding.level, Severity::Critical);
    assert_eq!(finding.line, 3);
    assert_eq!(finding.message, "Transaction has no writer (SWR) record");
    assert!(finding.content.starts_with("NWR"));
}

#[test]
fn transaction_without_publisher_is_critical() {
    let lines = file_lines(&[transaction(0, true, true), transaction(1, false, true)]);
    let outcome = validate(&join(&lines));

    assert_eq!(
        messages(&outcome.findings, Severity::Critical),
        vec!["Transaction has no publisher (SPU) record"]
    );
    // HDR, GRH, seven records of the first transaction, then the second NWR.
    assert_eq!(outcome.findings[0].line, 10);
}

#[test]
fn dropped_record_breaks_counts_and_sequence() {
    let mut lines = file_lines(&[transaction(0, true, true)]);
    // HDR GRH NWR SPU SPU SPT SWR SWT PWR GRT TRL
    let removed = lines.remove(7);
    assert!(removed.starts_with("SWT"));
    let outcome = validate(&join(&lines));

    assert_eq!(
        messages(&outcome.findings, Severity::Critical),
        vec![
            "Group Record Count Mismatch. Trailer says 9, found 8",
            "Total Record Count Mismatch. Trailer says 11, found 10",
        ]
    );
    assert_eq!(
        messages(&outcome.findings, Severity::Error),
        vec!["Record sequence 6 out of order, expected 5"]
    );
}

#[test]
fn unreadable_trailer_is_critical() {
    let mut lines = file_lines(&[transaction(0, true, true)]);
    let last = lines.len() - 1;
    lines[last] = "TRL00001ABCDEFGH00000011".to_string();
    let outcome = validate(&join(&lines));

    assert_eq!(
        messages(&outcome.findings, Severity::Critical),
        vec!["Trailer numeric parsing failed"]
    );
    assert_eq!(
        messages(&outcome.findings, Severity::Error),
        vec!["Transaction Count must be numeric, found 'ABCDEFGH'"]
    );
}

#[test]
fn administrator_territory_must_collect_everything() {
    let mut lines = file_lines(&[transaction(0, true, true)]);
    assert!(lines[5].starts_with("SPT"));
    lines[5].replace_range(44..49, "05000");
    let outcome = validate(&join(&lines));

    assert_eq!(
        messages(&outcome.findings, Severity::Warning),
        vec!["Administrator SR Collection Share is '05000', expected '10000'"]
    );
    assert!(!outcome.has_blocking());
}

#[test]
fn version_type_and_duration_are_warnings() {
    let mut lines = file_lines(&[transaction(0, true, true)]);
    lines[2].replace_range(129..135, "000000");
    lines[2].replace_range(142..145, "MOD");
    let outcome = validate(&join(&lines));

    assert_eq!(
        messages(&outcome.findings, Severity::Warning),
        vec!["Version Type is 'MOD', expected 'ORI'", "Zero duration"]
    );
}

#[test]
fn transaction_sequence_must_not_skip() {
    let lines = file_lines(&[transaction(0, true, true), transaction(2, true, true)]);
    let outcome = validate(&join(&lines));

    assert_eq!(
        messages(&outcome.findings, Severity::Error),
        vec!["Transaction sequence 2 out of order, expected 1"]
    );
}

#[test]
fn detail_before_any_work_is_an_error() {
    let mut lines = file_lines(&[transaction(0, true, true)]);
    let spu = lines[3].clone();
    lines.insert(2, spu);
    let outcome = validate(&join(&lines));

    assert!(
        messages(&outcome.findings, Severity::Error).contains(&"SPU record outside a transaction")
    );
}

#[test]
fn full_width_title_is_reported_as_possible_truncation() {
    let mut lines = file_lines(&[transaction(0, true, true)]);
    lines[2].replace_range(19..79, &"X".repeat(60));
    let outcome = validate(&join(&lines));

    assert_eq!(
        messages(&outcome.findings, Severity::Info),
        vec!["Work Title fills all 60 characters and may have been truncated"]
    );
}

#[test]
fn report_lists_most_severe_first() {
    let outcome = validate("HD\nXYZ123\n");
    let text = render_text(&outcome, 3);

    insta::assert_snapshot!(text, @r"
    Lines read: 2
    Transactions: 0
    CRITICAL: 1, ERROR: 1, WARNING: 2, INFO: 0
    [CRITICAL] line 2: No TRL record; trailer counts cannot be checked
        XYZ123
    [ERROR] line 1: Line too short to carry a record type
        HD
    [WARNING] line 1: File does not start with an HDR record
        HD
    ... 1 more findings not shown
    ");
}

#[test]
fn stats_serialize_for_json_output() {
    let lines = file_lines(&[transaction(0, true, true)]);
    let outcome = validate(&join(&lines));

    insta::assert_json_snapshot!(outcome.stats, @r#"
    {
      "lines_read": 11,
      "transactions": 1
    }
    "#);
}

proptest! {
    #[test]
    fn validation_is_total_and_deterministic(text in "\\PC{0,300}") {
        let first = validate(&text);
        let second = validate(&text);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn record_like_lines_never_panic(
        lines in prop::collection::vec("(HDR|GRH|NWR|SPU|SPT|SWR|SWT|PWR|GRT|TRL)[0-9A-Z ]{0,160}", 0..24)
    ) {
        let text = lines.join("\r\n");
        let outcome = validate(&text);
        prop_assert_eq!(outcome.stats.lines_read, cwr_validate::split_lines(&text).len());
    }

    #[test]
    fn completeness_flags_exactly_the_incomplete_transactions(
        shape in prop::collection::vec((any::<bool>(), any::<bool>()), 1..6)
    ) {
        let transactions: Vec<Vec<String>> = shape
            .iter()
            .zip(0u32..)
            .map(|(&(publisher, writer), seq)| transaction(seq, publisher, writer))
            .collect();
        let outcome = validate(&join(&file_lines(&transactions)));

        let missing = shape
            .iter()
            .map(|&(publisher, writer)| usize::from(!publisher) + usize::from(!writer))
            .sum::<usize>();
        prop_assert_eq!(outcome.count(Severity::Critical), missing);
        prop_assert_eq!(outcome.stats.transactions, shape.len());
    }
}
