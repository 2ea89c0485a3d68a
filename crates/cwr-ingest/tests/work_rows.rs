use std::fs;

use cwr_ingest::{ScanLimits, load_work_rows, parse_csv_table, resolve_column, work_rows};

const CATALOG: &str = "\
TRACK: Title,CODE: Work ID,TRACK: Duration,PUBLISHER 1: Name,PUBLISHER 1: PR Share,WRITER 1: Last Name,WRITER 1: First Name,WRITER 1: PR Share,WRITER 1: Original Publisher,WRITER 2: Last Name,ALBUM: Title
Dust Mites,LUM00000001,3:45,Tarmac 1331 Publishing,50,Wheeler,Sam,16.5,Tarmac 1331 Publishing,,Night Shift
Low Tide,,,,,Okafor,,,,Lind,
";

#[test]
fn reads_canonical_columns() {
    let table = parse_csv_table(CATALOG.as_bytes()).expect("parse");
    let rows = work_rows(&table, ScanLimits::default());
    assert_eq!(rows.len(), 2);

    let dust = &rows[0];
    assert_eq!(dust.row_number, 1);
    assert_eq!(dust.title.as_deref(), Some("Dust Mites"));
    assert_eq!(dust.work_id.as_deref(), Some("LUM00000001"));
    assert_eq!(dust.duration.as_deref(), Some("3:45"));
    assert_eq!(dust.publishers.len(), 1);
    assert_eq!(dust.publishers[0].name, "Tarmac 1331 Publishing");
    assert_eq!(dust.publishers[0].pr_share.as_deref(), Some("50"));
    assert_eq!(dust.writers.len(), 1);
    assert_eq!(dust.writers[0].last_name, "Wheeler");
    assert_eq!(dust.writers[0].pr_share.as_deref(), Some("16.5"));
    assert_eq!(
        dust.writers[0].original_publisher.as_deref(),
        Some("Tarmac 1331 Publishing")
    );
    assert_eq!(dust.recording.album_title.as_deref(), Some("Night Shift"));

    let tide = &rows[1];
    assert!(tide.publishers.is_empty());
    assert_eq!(tide.work_id, None);
    assert!(tide.recording.is_empty());
}

#[test]
fn writer_scan_stops_at_first_gap() {
    let text = "\
TRACK: Title,WRITER 1: Last Name,WRITER 2: Last Name,WRITER 3: Last Name
Gap In Front,,Lind,Okafor
Gap In Middle,Wheeler,,Okafor
";
    let table = parse_csv_table(text.as_bytes()).expect("parse");
    let rows = work_rows(&table, ScanLimits::default());
    assert!(rows[0].writers.is_empty());
    assert_eq!(rows[1].writers.len(), 1);
    assert_eq!(rows[1].writers[0].last_name, "Wheeler");
}

#[test]
fn scan_respects_limits() {
    let table = parse_csv_table(CATALOG.as_bytes()).expect("parse");
    let limits = ScanLimits {
        max_publishers: 4,
        max_writers: 1,
    };
    let rows = work_rows(&table, limits);
    assert_eq!(rows[1].writers.len(), 1);
}

#[test]
fn resolves_other_dialects_and_aliases() {
    let text = "\
Work Title,Original Publisher,PUBLISHER 1: Owner Performance Share %,PUBLISHER 2: Name,PUBLISHER 2: Owner Performance Share %,PUBLISHER 2: Owner Mechanical Share %,Publisher 2 Owner Sync Share,writer1_last_name,Writer 1 IPI,writer 1 role,Writer 2 Last Name
Harbour Lights,Manny G Music,50,Tarmac 1331 Publishing,25,100,12.5,Ode,356296239.0,CA,Ambrose
";
    let table = parse_csv_table(text.as_bytes()).expect("parse");
    let row = table.row(0).expect("row");
    assert_eq!(resolve_column(&row, "TRACK: Title"), Some("Harbour Lights"));
    assert_eq!(resolve_column(&row, "CODE: ISWC"), None);

    let rows = work_rows(&table, ScanLimits::default());
    let work = &rows[0];
    assert_eq!(work.title.as_deref(), Some("Harbour Lights"));
    assert_eq!(work.publishers[0].name, "Manny G Music");
    assert_eq!(work.publishers[0].pr_share.as_deref(), Some("50"));
    assert_eq!(work.publishers.len(), 2);
    assert_eq!(work.publishers[1].pr_share.as_deref(), Some("25"));
    assert_eq!(work.publishers[1].mr_share.as_deref(), Some("100"));
    assert_eq!(work.publishers[1].sr_share.as_deref(), Some("12.5"));
    assert_eq!(work.writers.len(), 2);
    assert_eq!(work.writers[0].last_name, "Ode");
    assert_eq!(work.writers[0].ipi.as_deref(), Some("356296239.0"));
    assert_eq!(work.writers[0].capacity.as_deref(), Some("CA"));
    assert_eq!(work.writers[1].last_name, "Ambrose");
}

#[test]
fn loads_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("catalog.csv");
    fs::write(&path, CATALOG).expect("write csv");

    let rows = load_work_rows(&path, ScanLimits::default()).expect("load rows");
    assert_eq!(rows.len(), 2);

    let missing = load_work_rows(&dir.path().join("absent.csv"), ScanLimits::default());
    let err = missing.expect_err("missing file");
    assert!(format!("{err:#}").contains("absent.csv"));
}
