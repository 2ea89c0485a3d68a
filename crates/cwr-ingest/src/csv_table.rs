use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::columns::column_key;

/// A CSV file as trimmed text cells under one header row.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Normalized header key -> column index (first occurrence wins).
    index: HashMap<String, usize>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            index.entry(column_key(header)).or_insert(idx);
        }
        Self {
            headers,
            rows,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column index for a header, ignoring case, spaces and punctuation.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.index.get(&column_key(header)).copied()
    }

    pub fn row(&self, idx: usize) -> Option<TableRow<'_>> {
        self.rows.get(idx).map(|values| TableRow {
            table: self,
            values,
            number: idx + 1,
        })
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = TableRow<'_>> + '_ {
        self.rows.iter().enumerate().map(|(idx, values)| TableRow {
            table: self,
            values,
            number: idx + 1,
        })
    }
}

/// One data row with access by header name.
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    table: &'a CsvTable,
    values: &'a [String],
    number: usize,
}

impl<'a> TableRow<'a> {
    /// 1-based position among the data rows.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Non-empty cell under `header`.
    pub fn get(&self, header: &str) -> Option<&'a str> {
        let idx = self.table.column_index(header)?;
        self.values
            .get(idx)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a CSV file. The first non-blank row is the header.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let file = std::fs::File::open(path).with_context(|| format!("read csv: {}", path.display()))?;
    parse_csv_table(file).with_context(|| format!("parse csv: {}", path.display()))
}

/// Parse CSV text from any reader.
pub fn parse_csv_table(input: impl Read) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read record {}", idx + 1))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut raw_rows = raw_rows.into_iter();
    let Some(header_row) = raw_rows.next() else {
        return Ok(CsvTable::default());
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    let rows = raw_rows
        .map(|record| {
            (0..headers.len())
                .map(|idx| record.get(idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    Ok(CsvTable::new(headers, rows))
}
