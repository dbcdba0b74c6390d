//! Result summaries printed after each command.
//!
//! Summaries go to stderr so CSV on stdout stays clean.

use std::path::PathBuf;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Outcome of `pedgene fetch`.
#[derive(Debug, Clone)]
pub struct FetchSummary {
    pub dataset: String,
    pub split: String,
    pub rows: usize,
    pub columns: usize,
    pub output: Option<PathBuf>,
}

/// Outcome of `pedgene remap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapSummary {
    pub rows_in: usize,
    pub rows_out: usize,
    pub unmapped: usize,
    pub output: Option<PathBuf>,
}

pub fn print_fetch_summary(summary: &FetchSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Split"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(&summary.dataset),
        Cell::new(&summary.split),
        Cell::new(summary.rows),
        Cell::new(summary.columns),
        output_cell(summary.output.as_ref()),
    ]);
    eprintln!("{table}");
}

pub fn print_remap_summary(summary: &RemapSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows in"),
        header_cell("Unmapped"),
        header_cell("Rows out"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let unmapped = if summary.unmapped > 0 {
        Cell::new(summary.unmapped).fg(Color::Yellow)
    } else {
        Cell::new(summary.unmapped).fg(Color::DarkGrey)
    };
    table.add_row(vec![
        Cell::new(summary.rows_in),
        unmapped,
        Cell::new(summary.rows_out).add_attribute(Attribute::Bold),
        output_cell(summary.output.as_ref()),
    ]);
    eprintln!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn output_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(path) => Cell::new(path.display()),
        None => Cell::new("stdout").fg(Color::DarkGrey),
    }
}
