use chrono::{NaiveDate, NaiveDateTime};
use cwr_build::{BuildError, CwrBuilder, GeneratedFile, LINE_ENDING};
use cwr_config::{CwrConfig, TransactionType};
use cwr_format::layout::{self, trl};
use cwr_model::{PublisherInput, RecordingInput, Severity, WorkRow, WriterInput};
use cwr_validate::validate;
use proptest::prelude::*;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .expect("valid timestamp")
}

fn config() -> CwrConfig {
    CwrConfig::embedded().expect("embedded configuration")
}

fn builder_with(config: CwrConfig) -> CwrBuilder {
    CwrBuilder::new(config)
        .expect("valid builder")
        .with_timestamp(timestamp())
}

fn builder() -> CwrBuilder {
    builder_with(config())
}

fn dust_mites() -> WorkRow {
    WorkRow {
        row_number: 1,
        duration: Some("3:45".to_string()),
        ..WorkRow::new("Dust Mites")
    }
    .with_publisher(
        PublisherInput::new("Tarmac 1331 Publishing").with_shares("50.0", "50.0", "50.0"),
    )
    .with_writer(
        WriterInput::new("Wheeler")
            .with_shares("16.5", "0", "0")
            .controlled_by("Tarmac 1331 Publishing"),
    )
}

fn lines(file: &GeneratedFile) -> Vec<&str> {
    file.lines().collect()
}

fn tags(file: &GeneratedFile) -> Vec<&str> {
    file.lines().map(|line| &line[..3]).collect()
}

#[test]
fn dust_mites_scenario() {
    let file = builder().generate(&[dust_mites()]);
    let lines = lines(&file);

    assert_eq!(
        tags(&file),
        vec!["HDR", "GRH", "NWR", "SPU", "SPU", "SPT", "SWR", "SWT", "PWR", "GRT", "TRL"]
    );
    assert_eq!(&lines[2][19..79], format!("{:<60}", "DUST MITES"));
    assert_eq!(&lines[2][129..135], "000345");
    assert_eq!(&lines[3][87..98], "00356296239");
    assert_eq!(&lines[3][21..30], "010000001");
    assert_eq!(&lines[6][28..35], "WHEELER");
    assert_eq!(&lines[6][129..134], "01650");
    assert_eq!(file.transactions, 1);
    assert_eq!(file.records, 11);
    assert!(file.notes.is_empty());

    let outcome = validate(&file.text);
    assert_eq!(outcome.count(Severity::Critical), 0);
    assert_eq!(outcome.stats.transactions, 1);
    assert!(outcome.is_clean(), "{:#?}", outcome.findings);
}

#[test]
fn every_line_ends_with_crlf() {
    let file = builder().generate(&[dust_mites()]);
    assert!(file.text.ends_with(LINE_ENDING));
    assert_eq!(file.text.matches(LINE_ENDING).count(), file.records);
    assert_eq!(builder().build_file(&[dust_mites()]), file.text);
}

#[test]
fn header_carries_sender_and_timestamp() {
    let file = builder().generate(&[dust_mites()]);
    let hdr = lines(&file)[0];
    assert_eq!(&hdr[3..14], "01254514077");
    assert_eq!(hdr[14..59].trim_end(), "LUMINA PUBLISHING UK");
    assert_eq!(&hdr[59..64], "01.10");
    assert_eq!(&hdr[64..86], "2026101609300020261016");

    let grh = lines(&file)[1];
    assert_eq!(grh, "GRHNWR0000102.100000000000");
}

#[test]
fn administrator_triad_follows_every_publisher() {
    let row = dust_mites().with_publisher(
        PublisherInput::new("Harbour Songs").with_shares("25", "40", "40"),
    );
    let file = builder().generate(&[row]);
    let lines = lines(&file);

    let spts: Vec<&str> = lines.iter().copied().filter(|l| l.starts_with("SPT")).collect();
    assert_eq!(spts.len(), 2);
    for spt in &spts {
        assert_eq!(&spt[19..28], "000000012");
        assert_eq!(&spt[39..44], "10000");
        assert_eq!(&spt[44..49], "10000");
        assert_eq!(&spt[50..54], "0826");
    }
    assert_eq!(&spts[0][34..39], "05000");
    assert_eq!(&spts[1][34..39], "02500");

    let admins: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| l.starts_with("SPU") && &l[76..78] == "SE")
        .collect();
    assert_eq!(admins.len(), 2);
    assert!(admins.iter().all(|l| &l[115..120] == "00000"));

    let unknown = lines[6];
    assert!(unknown.starts_with("SPU"));
    assert_eq!(&unknown[21..30], "PUB000001");
    assert_eq!(&unknown[19..21], "02");
}

#[test]
fn missing_title_uses_placeholder_and_notes_it() {
    let row = WorkRow {
        row_number: 4,
        ..dust_mites()
    };
    let row = WorkRow { title: None, ..row };
    let file = builder().generate(&[row]);

    assert_eq!(lines(&file)[2][19..79].trim_end(), "UNKNOWN TITLE");
    assert_eq!(file.notes.len(), 1);
    assert_eq!(file.notes[0].level, Severity::Warning);
    assert_eq!(file.notes[0].line, 4);
}

#[test]
fn row_without_publishers_is_flagged_by_the_validator() {
    let row = WorkRow {
        publishers: Vec::new(),
        ..dust_mites()
    };
    let file = builder().generate(&[row]);

    assert!(!tags(&file).contains(&"SPU"));
    // The writer names a publisher that is not on the work.
    assert!(!tags(&file).contains(&"PWR"));
    assert_eq!(file.note_counts().warning, 1);
    assert_eq!(file.note_counts().info, 1);

    let outcome = validate(&file.text);
    assert_eq!(outcome.count(Severity::Critical), 1);
    assert_eq!(
        outcome.findings[0].message,
        "Transaction has no publisher (SPU) record"
    );
}

#[test]
fn fallback_publisher_fills_empty_rows() {
    let mut config = config();
    config.defaults.fallback_publisher = Some("Pashalina Publishing".to_string());
    let row = WorkRow {
        publishers: Vec::new(),
        ..dust_mites()
    };
    let file = builder_with(config).generate(&[row]);
    let spu = lines(&file)[3];

    assert_eq!(spu[30..75].trim_end(), "PASHALINA PUBLISHING");
    assert_eq!(&spu[87..98], "00498578867");
    assert_eq!(validate(&file.text).count(Severity::Critical), 0);
}

#[test]
fn publishers_beyond_the_limit_are_dropped_with_a_note() {
    let mut row = dust_mites();
    row.publishers = (1..=5)
        .map(|n| PublisherInput::new(format!("Publisher {n}")).with_shares("20", "20", "20"))
        .collect();
    let file = builder().generate(&[row]);

    let spus = tags(&file).iter().filter(|tag| **tag == "SPU").count();
    assert_eq!(spus, 8);
    assert!(
        file.notes
            .iter()
            .any(|note| note.message == "5 publishers declared; only the first 4 were written")
    );
}

#[test]
fn bad_share_writes_zero_and_warns() {
    let mut row = dust_mites();
    row.writers[0].pr_share = Some("half".to_string());
    let file = builder().generate(&[row]);

    assert_eq!(&lines(&file)[6][129..134], "00000");
    assert_eq!(file.note_counts().warning, 1);
    assert!(file.notes[0].message.contains("'half' is not a percentage"));
}

#[test]
fn line_breaks_in_values_stay_on_one_record() {
    let mut row = dust_mites();
    row.title = Some("Dust\nMites".to_string());
    row.writers[0].first_name = Some("Sam\r\nJr\t".to_string());
    let file = builder().generate(&[row]);
    let lines = lines(&file);

    assert_eq!(lines.len(), file.records);
    assert_eq!(file.records, 11);
    assert_eq!(&lines[2][19..79], format!("{:<60}", "DUST MITES"));
    assert_eq!(&lines[6][73..103], format!("{:<30}", "SAM  JR"));
    assert!(!file.text.replace(LINE_ENDING, "").chars().any(char::is_control));

    let outcome = validate(&file.text);
    assert!(outcome.is_clean(), "{:#?}", outcome.findings);
}

#[test]
fn duration_beyond_two_digit_hours_is_noted() {
    let mut row = dust_mites();
    row.duration = Some("100:00:00".to_string());
    let file = builder().generate(&[row]);

    assert_eq!(&lines(&file)[2][129..135], "000000");
    assert_eq!(file.note_counts().warning, 1);
    assert_eq!(
        file.notes[0].message,
        "duration '100:00:00' is longer than 99:59:59; wrote 000000"
    );
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log lock")).into_owned()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn warnings_name_the_field_not_the_party() {
    let mut row = dust_mites();
    row.publishers[0].pr_share = Some("lots".to_string());
    row.writers[0].ipi = Some("IPI-X".to_string());
    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();

    let file = tracing::subscriber::with_default(subscriber, || builder().generate(&[row]));

    let text = log.text();
    assert!(text.contains("publisher PR share"), "{text}");
    assert!(text.contains("writer IPI"), "{text}");
    assert!(!text.to_uppercase().contains("TARMAC"), "{text}");
    assert!(!text.to_uppercase().contains("WHEELER"), "{text}");
    assert_eq!(file.note_counts().warning, 2);
    assert!(file.notes.iter().any(|note| note.message.contains("Tarmac 1331 Publishing")));
}

#[test]
fn writer_ids_are_stable_across_transactions() {
    let second = WorkRow {
        row_number: 2,
        ..WorkRow::new("Salt Road")
    }
    .with_publisher(PublisherInput::new("Tarmac 1331 Publishing"))
    .with_writer(WriterInput::new("Okafor"))
    .with_writer(WriterInput::new("Wheeler"));
    let file = builder().generate(&[dust_mites(), second]);

    let swr_ids: Vec<&str> = file
        .lines()
        .filter(|line| line.starts_with("SWR"))
        .map(|line| &line[19..28])
        .collect();
    assert_eq!(swr_ids, vec!["WRI000001", "WRI000002", "WRI000001"]);

    let work_ids: Vec<&str> = file
        .lines()
        .filter(|line| line.starts_with("NWR"))
        .map(|line| line[81..95].trim_end())
        .collect();
    assert_eq!(work_ids, vec!["LUM00000001", "LUM00000002"]);
}

#[test]
fn recording_and_library_rows_get_rec_and_orn() {
    let mut row = dust_mites();
    row.recording = RecordingInput {
        release_date: Some("2024-03-01".to_string()),
        album_title: Some("Night Drive".to_string()),
        catalog_number: Some("LUM042".to_string()),
        track_number: Some("7".to_string()),
        library: Some("Lumina Library".to_string()),
        ..RecordingInput::default()
    };
    let file = builder().generate(&[row]);
    let lines = lines(&file);

    assert_eq!(&lines[2][135..136], "Y");
    let rec = lines[9];
    assert!(rec.starts_with("REC00000000"));
    assert_eq!(&rec[19..27], "20240301");
    assert_eq!(&rec[87..93], "000345");
    assert_eq!(rec[98..158].trim_end(), "NIGHT DRIVE");

    let orn = lines[10];
    assert!(orn.starts_with("ORN"));
    assert_eq!(&orn[19..22], "LIB");
    assert_eq!(orn[97..101].trim_end(), "7");
    assert_eq!(orn[101..].trim_end(), "LUMINA LIBRARY");

    let outcome = validate(&file.text);
    assert!(!outcome.has_blocking(), "{:#?}", outcome.findings);
}

#[test]
fn revision_files_use_rev_records() {
    let mut config = config();
    config.defaults.transaction_type = TransactionType::Rev;
    let file = builder_with(config).generate(&[dust_mites()]);

    assert!(lines(&file)[1].starts_with("GRHREV"));
    assert!(lines(&file)[2].starts_with("REV"));
    assert_eq!(validate(&file.text).stats.transactions, 1);
}

#[test]
fn file_name_follows_registrant_convention() {
    assert_eq!(builder().file_name(1), "CW260001LUM_052.V21");
    assert_eq!(builder().file_name(123), "CW260123LUM_052.V21");
}

#[test]
fn invalid_configuration_fails_construction() {
    let mut config = config();
    config.administrator.territory = "82".to_string();
    assert!(matches!(
        CwrBuilder::new(config),
        Err(BuildError::Config(_))
    ));
}

#[test]
fn empty_input_still_frames_the_file() {
    let file = builder().generate(&[]);
    assert_eq!(tags(&file), vec!["HDR", "GRH", "GRT", "TRL"]);
    assert_eq!(lines(&file)[3], "TRL000010000000000000004");
    assert!(validate(&file.text).is_clean());
}

fn share() -> impl Strategy<Value = String> {
    (0u32..=10_000).prop_map(|hundredths| format!("{}.{:02}", hundredths / 100, hundredths % 100))
}

fn row_strategy() -> impl Strategy<Value = WorkRow> {
    (
        "[A-Za-z][A-Za-z ]{0,70}",
        prop::collection::vec(("[A-Z][a-z]{2,12}", share()), 1..4),
        prop::collection::vec(("[A-Z][a-z]{1,20}", share()), 1..5),
    )
        .prop_map(|(title, publishers, writers)| {
            let mut row = WorkRow::new(title);
            row.duration = Some("2:30".to_string());
            row.publishers = publishers
                .into_iter()
                .map(|(name, pr)| PublisherInput::new(name).with_shares(pr, "50", "50"))
                .collect();
            row.writers = writers
                .into_iter()
                .map(|(name, pr)| WriterInput::new(name).with_shares(pr, "0", "0"))
                .collect();
            row
        })
}

proptest! {
    #[test]
    fn generated_files_validate_with_matching_counts(
        rows in prop::collection::vec(row_strategy(), 0..6)
    ) {
        let file = builder().generate(&rows);
        let outcome = validate(&file.text);

        prop_assert_eq!(outcome.stats.transactions, rows.len());
        prop_assert_eq!(outcome.count(Severity::Critical), 0);
        prop_assert!(!outcome.has_blocking());

        let lines = lines(&file);
        let trailer = lines.last().copied().unwrap_or_default();
        let declared = trl::RECORD_COUNT.read(trailer).unwrap_or_default();
        prop_assert_eq!(declared, format!("{:08}", lines.len()));
        prop_assert_eq!(file.records, lines.len());

        let work_seqs: Vec<&str> = lines
            .iter()
            .filter(|line| line.starts_with("NWR"))
            .filter_map(|line| layout::TRANSACTION_SEQ.read(line))
            .collect();
        let expected: Vec<String> = (0..rows.len()).map(|seq| format!("{seq:08}")).collect();
        prop_assert_eq!(work_seqs, expected);
    }
}
