//! CSV ingestion for CWR generation.
//!
//! Loads a CSV export, resolves its loosely named columns and hands the
//! builder typed [`cwr_model::WorkRow`]s. Values stay as the text the file
//! carried; formatting happens downstream.

pub mod columns;
pub mod csv_table;
pub mod rows;

pub use columns::{column_aliases, column_key, publisher_column, resolve_column, writer_column};
pub use csv_table::{CsvTable, TableRow, parse_csv_table, read_csv_table};
pub use rows::{ScanLimits, load_work_rows, work_row, work_rows};
