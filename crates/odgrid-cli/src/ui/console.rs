//! Plain console rendering of rows as a fitted table.

use is_terminal::IsTerminal;
use odgrid_engine::{CellRenderer, DefaultRenderer, LookupSet};
use odgrid_types::{ColumnSpec, DatasetSpec, Row};
use owo_colors::OwoColorize;

const MIN_WIDTH: usize = 4;
const MAX_WIDTH: usize = 40;

/// Print a header line plus one line per row, columns fitted to content
/// and capped so a wide terminal isn't required. Colors only when stdout
/// is a terminal.
pub fn print_rows(dataset: &DatasetSpec, rows: &[Row], lookups: &LookupSet) {
    let color = std::io::stdout().is_terminal();
    let renderer = DefaultRenderer::new(lookups);

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            dataset
                .columns
                .iter()
                .map(|column| renderer.display(column, row))
                .collect()
        })
        .collect();

    let widths = column_widths(&dataset.columns, &cells);

    let header = dataset
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(&column.header, *width))
        .collect::<Vec<_>>()
        .join("  ");
    if color {
        println!("{}", header.bold());
    } else {
        println!("{}", header);
    }

    for record in &cells {
        let line = record
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    }

    let summary = format!("{} row(s)", rows.len());
    if color {
        println!("{}", summary.bright_black());
    } else {
        println!("{}", summary);
    }
}

/// One row as `Field = value` lines, for write-command output.
pub fn print_fields(row: &Row) {
    for (field, value) in row.fields() {
        println!("  {} = {}", field, odgrid_engine::value_text(Some(value)));
    }
}

fn column_widths(columns: &[ColumnSpec], cells: &[Vec<String>]) -> Vec<usize> {
    let budget = terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(usize::MAX);

    let mut widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let content = cells
                .iter()
                .map(|record| record[i].chars().count())
                .max()
                .unwrap_or(0);
            let declared = column.width.map(usize::from).unwrap_or(0);
            content
                .max(column.header.chars().count())
                .max(declared)
                .clamp(MIN_WIDTH, MAX_WIDTH)
        })
        .collect();

    // Shrink right-to-left when the full table would wrap
    let mut total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    for width in widths.iter_mut().rev() {
        if total <= budget {
            break;
        }
        let shrink = (*width - MIN_WIDTH).min(total - budget);
        *width -= shrink;
        total -= shrink;
    }
    widths
}

fn pad(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let truncated: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}
