//! Table rows -> [`WorkRow`]s.

use std::path::Path;

use anyhow::Result;
use cwr_model::{PublisherInput, RecordingInput, WorkRow, WriterInput};
use tracing::{debug, info};

use crate::columns::{self, Party, party_column, resolve_column};
use crate::csv_table::{CsvTable, TableRow, read_csv_table};

/// How many indexed publishers and writers to look for per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    pub max_publishers: usize,
    pub max_writers: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_publishers: 4,
            max_writers: 6,
        }
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn party_value(row: &TableRow<'_>, party: Party, index: usize, field: &str) -> Option<String> {
    owned(resolve_column(row, &party_column(party, index, field)))
}

fn read_publisher(row: &TableRow<'_>, index: usize) -> Option<PublisherInput> {
    let field = |name: &str| party_value(row, Party::Publisher, index, name);
    Some(PublisherInput {
        name: field("Name")?,
        ipi: field("IPI"),
        agreement: field("Agreement"),
        pr_society: field("PR Society"),
        mr_society: field("MR Society"),
        sr_society: field("SR Society"),
        pr_share: field("PR Share"),
        mr_share: field("MR Share"),
        sr_share: field("SR Share"),
    })
}

fn read_writer(row: &TableRow<'_>, index: usize) -> Option<WriterInput> {
    let field = |name: &str| party_value(row, Party::Writer, index, name);
    Some(WriterInput {
        last_name: field("Last Name")?,
        first_name: field("First Name"),
        ipi: field("IPI"),
        capacity: field("Capacity"),
        pr_society: field("PR Society"),
        mr_society: field("MR Society"),
        sr_society: field("SR Society"),
        pr_share: field("PR Share"),
        mr_share: field("MR Share"),
        sr_share: field("SR Share"),
        original_publisher: field("Original Publisher"),
    })
}

/// Resolve one table row. Publisher and writer scans stop at the first
/// index whose name is missing or empty.
pub fn work_row(row: &TableRow<'_>, limits: ScanLimits) -> WorkRow {
    let publishers: Vec<PublisherInput> = (1..=limits.max_publishers)
        .map_while(|index| read_publisher(row, index))
        .collect();
    let writers: Vec<WriterInput> = (1..=limits.max_writers)
        .map_while(|index| read_writer(row, index))
        .collect();
    let value = |canonical: &str| owned(resolve_column(row, canonical));

    debug!(
        row = row.number(),
        publishers = publishers.len(),
        writers = writers.len(),
        "resolved row"
    );
    WorkRow {
        row_number: row.number(),
        title: value(columns::TITLE),
        work_id: value(columns::WORK_ID),
        iswc: value(columns::ISWC),
        language: value(columns::LANGUAGE),
        duration: value(columns::DURATION),
        publishers,
        writers,
        recording: RecordingInput {
            release_date: value(columns::RELEASE_DATE),
            album_title: value(columns::ALBUM_TITLE),
            label: value(columns::ALBUM_LABEL),
            catalog_number: value(columns::CATALOG_NUMBER),
            ean: value(columns::EAN),
            isrc: value(columns::ISRC),
            track_number: value(columns::TRACK_NUMBER),
            library: value(columns::LIBRARY),
        },
    }
}

/// Every data row of `table`, in order.
pub fn work_rows(table: &CsvTable, limits: ScanLimits) -> Vec<WorkRow> {
    table.iter_rows().map(|row| work_row(&row, limits)).collect()
}

/// Read a CSV file straight into work rows.
pub fn load_work_rows(path: &Path, limits: ScanLimits) -> Result<Vec<WorkRow>> {
    let table = read_csv_table(path)?;
    let rows = work_rows(&table, limits);
    info!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = rows.len(),
        "loaded work rows"
    );
    Ok(rows)
}
