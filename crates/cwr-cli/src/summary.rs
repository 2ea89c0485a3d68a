use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use cwr_cli::types::{ConfigResult, GenerateResult, ValidateResult};
use cwr_model::{Finding, FindingCounts, Severity};
use cwr_validate::{ValidationOutcome, render_text, sorted_findings};
use serde::Serialize;

use crate::cli::{ReportArgs, ReportFormatArg};

pub fn print_generate(result: &GenerateResult, report: &ReportArgs) {
    match report.format {
        ReportFormatArg::Json => print_json(result),
        ReportFormatArg::Text => {
            print_generate_header(result);
            for note in sorted_findings(&result.notes).iter().take(report.max_display) {
                println!("{note}");
            }
            if let Some(outcome) = &result.validation {
                println!();
                print!("{}", render_text(outcome, report.max_display));
            }
        }
        ReportFormatArg::Table => {
            print_generate_header(result);
            let mut table = Table::new();
            table.set_header(vec![
                header_cell("Rows"),
                header_cell("Transactions"),
                header_cell("Records"),
                header_cell("Notes"),
            ]);
            apply_summary_table_style(&mut table);
            for index in 0..4 {
                align_column(&mut table, index, CellAlignment::Right);
            }
            table.add_row(vec![
                Cell::new(result.rows),
                Cell::new(result.transactions),
                Cell::new(result.records),
                count_cell(result.note_counts.total(), Color::Yellow),
            ]);
            println!("{table}");
            if !result.notes.is_empty() {
                println!();
                println!("Generation notes:");
                print_finding_table(&result.notes, report.max_display);
            }
            if let Some(outcome) = &result.validation {
                println!();
                println!("Validation:");
                print_outcome_tables(outcome, report.max_display);
            }
        }
    }
}

pub fn print_validation(result: &ValidateResult, report: &ReportArgs) {
    match report.format {
        ReportFormatArg::Json => print_json(result),
        ReportFormatArg::Text => {
            println!("File: {}", result.path.display());
            print!("{}", render_text(&result.outcome, report.max_display));
        }
        ReportFormatArg::Table => {
            println!("File: {}", result.path.display());
            print_outcome_tables(&result.outcome, report.max_display);
        }
    }
}

pub fn print_config(result: &ConfigResult) {
    match &result.written {
        Some(path) => println!("Wrote {} ({})", path.display(), result.source),
        None => {
            println!("# source: {}", result.source);
            print!("{}", result.text);
        }
    }
}

fn print_generate_header(result: &GenerateResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: {} (dry run, not written)", result.file_name),
    }
    println!("Config: {}", result.config_source);
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(error) => eprintln!("error: failed to render JSON: {error}"),
    }
}

fn print_outcome_tables(outcome: &ValidationOutcome, max_display: usize) {
    let counts = outcome.counts();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Lines"),
        header_cell("Transactions"),
        header_cell("Critical"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Info"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(outcome.stats.lines_read),
        Cell::new(outcome.stats.transactions),
        severity_count_cell(&counts, Severity::Critical),
        severity_count_cell(&counts, Severity::Error),
        severity_count_cell(&counts, Severity::Warning),
        severity_count_cell(&counts, Severity::Info),
    ]);
    println!("{table}");
    if !outcome.findings.is_empty() {
        print_finding_table(&outcome.findings, max_display);
    }
}

fn print_finding_table(findings: &[Finding], max_display: usize) {
    let sorted = sorted_findings(findings);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Line"),
        header_cell("Message"),
        header_cell("Record"),
    ]);
    apply_finding_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Right);
    for finding in sorted.iter().take(max_display) {
        table.add_row(vec![
            severity_cell(finding.level),
            Cell::new(finding.line),
            Cell::new(&finding.message),
            record_cell(&finding.content),
        ]);
    }
    println!("{table}");
    if sorted.len() > max_display {
        println!("... {} more findings not shown", sorted.len() - max_display);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_finding_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(10)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ColumnConstraint::UpperBoundary(Width::Percentage(40)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    let cell = Cell::new(severity.as_str()).fg(severity_color(severity));
    match severity {
        Severity::Critical => cell.add_attribute(Attribute::Bold),
        _ => cell,
    }
}

fn severity_count_cell(counts: &FindingCounts, severity: Severity) -> Cell {
    count_cell(counts.get(severity), severity_color(severity))
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical | Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

/// Records are wide; the table shows their start.
fn record_cell(content: &str) -> Cell {
    const SHOWN: usize = 40;
    if content.is_empty() {
        return dim_cell("-");
    }
    let shown: String = content.chars().take(SHOWN).collect();
    if content.chars().count() > SHOWN {
        dim_cell(format!("{}...", shown.trim_end()))
    } else {
        dim_cell(shown.trim_end())
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
