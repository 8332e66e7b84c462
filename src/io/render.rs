//! Human-readable grid rendering for verbose output

use crate::spatial::cell::CellView;
use crate::spatial::grid::Grid;
use std::fmt::Write;

/// Text shown for a cell in the kind table
pub const fn view_symbol(view: CellView) -> &'static str {
    match view {
        CellView::Grass => ".",
        CellView::Tent => "T",
        CellView::Tree => "t",
        CellView::MatchedTree => "t*",
        CellView::Undecided => "?",
    }
}

/// Render the grid as a boxed table
///
/// The header row lists column targets and each body row starts with its
/// row target. With `show_labels` the cells show component labels
/// instead of kinds, blank where a cell is unlabeled.
pub fn render_table(grid: &Grid, show_labels: bool) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(grid.rows() + 1);

    let mut header = vec![String::new()];
    header.extend(grid.col_sums().iter().map(ToString::to_string));
    rows.push(header);

    for row in 0..grid.rows() {
        let mut line = vec![
            grid.row_sums()
                .get(row)
                .map(ToString::to_string)
                .unwrap_or_default(),
        ];
        for col in 0..grid.cols() {
            let text = match grid.cell(row, col) {
                Some(cell) if show_labels && cell.label != 0 => cell.label.to_string(),
                Some(_) if show_labels => String::new(),
                Some(cell) => view_symbol(cell.view()).to_string(),
                None => String::new(),
            };
            line.push(text);
        }
        rows.push(line);
    }

    let widths: Vec<usize> = (0..=grid.cols())
        .map(|col| {
            rows.iter()
                .filter_map(|line| line.get(col))
                .map(|text| text.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = widths.iter().fold(String::from("+"), |mut acc, width| {
        acc.push_str(&"-".repeat(width + 2));
        acc.push('+');
        acc
    });

    let mut out = String::new();
    out.push_str(&separator);
    out.push('\n');
    for line in &rows {
        out.push('|');
        for (text, width) in line.iter().zip(&widths) {
            let _ = write!(out, " {text:<width$} |");
        }
        out.push('\n');
        out.push_str(&separator);
        out.push('\n');
    }

    out
}

/// Single-line marker dump, one bracketed list per row
pub fn flat_string(grid: &Grid) -> String {
    let mut out = String::from("Grid solution ");

    for line in grid.markers() {
        let quoted: Vec<String> = line.iter().map(|marker| format!("\"{marker}\"")).collect();
        let _ = write!(out, "[{}],", quoted.join(","));
    }

    out
}
