//! Report rendering for validation findings.

use anyhow::Result;
use chrono::Utc;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use csvlint_model::{Diagnostic, render_diagnostic};
use csvlint_validate::Validation;

/// Report style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Table,
    Json,
}

const REPORT_SCHEMA: &str = "csvlint.report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct ReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    source: &'a str,
    delimiter: char,
    lazy_quotes: bool,
    valid: bool,
    halted: bool,
    fatal: Option<String>,
    diagnostics: &'a [Diagnostic],
}

/// Print the report for one checked source.
pub fn print_report(
    source: &str,
    delimiter: char,
    lazy_quotes: bool,
    validation: &Validation,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Text => print!("{}", render_text(source, validation)),
        ReportFormat::Table => print_table(source, validation),
        ReportFormat::Json => {
            println!("{}", render_json(source, delimiter, lazy_quotes, validation)?);
        }
    }
    Ok(())
}

/// One line per diagnostic, then the verdict (or the stream failure).
pub fn render_text(source: &str, validation: &Validation) -> String {
    let mut out = String::new();
    for diagnostic in &validation.diagnostics {
        out.push_str(&render_diagnostic(diagnostic));
        out.push('\n');
    }
    match &validation.fatal {
        Some(fatal) => {
            out.push_str(&format!("error reading {source}: {fatal}\n"));
        }
        None => {
            out.push_str(&format!("{source} is {}\n", verdict(validation)));
        }
    }
    out
}

/// Machine-readable report with a versioned schema.
pub fn render_json(
    source: &str,
    delimiter: char,
    lazy_quotes: bool,
    validation: &Validation,
) -> Result<String> {
    let payload = ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        source,
        delimiter,
        lazy_quotes,
        valid: validation.is_clean(),
        halted: validation.halted,
        fatal: validation.fatal.as_ref().map(|error| error.to_string()),
        diagnostics: &validation.diagnostics,
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Findings as a table, one row per diagnostic.
pub fn diagnostics_table(diagnostics: &[Diagnostic]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell("Line"),
        header_cell("Column"),
        header_cell("Problem"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for diagnostic in diagnostics {
        let column = match diagnostic.column {
            Some(column) => Cell::new(column),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(format!("#{}", diagnostic.record_number)),
            Cell::new(diagnostic.line),
            column,
            Cell::new(diagnostic.kind).fg(Color::Red),
        ]);
    }
    table
}

fn print_table(source: &str, validation: &Validation) {
    if !validation.diagnostics.is_empty() {
        println!("{}", diagnostics_table(&validation.diagnostics));
    }
    match &validation.fatal {
        Some(fatal) => eprintln!("error reading {source}: {fatal}"),
        None => println!("{source} is {}", verdict(validation)),
    }
}

fn verdict(validation: &Validation) -> &'static str {
    if validation.diagnostics.is_empty() && !validation.halted {
        "valid"
    } else {
        "invalid"
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
