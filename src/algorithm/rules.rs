//! Deduction rules applied once per solve-loop iteration
//!
//! Each rule sweeps the grid in raster order and only ever moves cells out
//! of `Undecided` or sets `matched` on trees, never the reverse. The solve
//! loop runs them as grass, relabel, tents, trees; the tent rule depends on
//! labels computed after the grass rule of the same iteration.

use std::collections::HashMap;

use crate::io::error::Result;
use crate::spatial::cell::{CellKind, Label};
use crate::spatial::grid::Grid;

/// Why a cell was forced to grass, in the order the checks run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrassReason {
    /// The row needs no tents at all
    EmptyRow,
    /// The column needs no tents at all
    EmptyColumn,
    /// The row or column already holds all its tents
    LineFull,
    /// No edge-sharing tree is still waiting for a tent
    NoUnmatchedTree,
    /// A surrounding cell already holds a tent
    TouchesTent,
}

/// First grass check that holds for an undecided cell, if any
///
/// `tents_by_row` and `tents_by_col` are the placed-tent tallies the
/// caller computed for this pass.
pub fn grass_reason(
    grid: &Grid,
    row: usize,
    col: usize,
    tents_by_row: &[usize],
    tents_by_col: &[usize],
) -> Option<GrassReason> {
    let row_target = grid.row_sums().get(row).copied().unwrap_or(0);
    let col_target = grid.col_sums().get(col).copied().unwrap_or(0);

    if row_target == 0 {
        return Some(GrassReason::EmptyRow);
    }
    if col_target == 0 {
        return Some(GrassReason::EmptyColumn);
    }

    let row_full = tents_by_row.get(row).is_some_and(|&placed| placed == row_target);
    let col_full = tents_by_col.get(col).is_some_and(|&placed| placed == col_target);
    if row_full || col_full {
        return Some(GrassReason::LineFull);
    }

    // A tent must belong to a tree that does not have one yet
    if grid.adjacent_unmatched_trees(row, col).is_empty() {
        return Some(GrassReason::NoUnmatchedTree);
    }

    if !grid.adjacent_tents(row, col).is_empty() {
        return Some(GrassReason::TouchesTent);
    }

    None
}

/// Rule G: turn every undecided cell that cannot hold a tent into grass
///
/// Returns the number of cells marked.
pub fn mark_grass(grid: &mut Grid) -> usize {
    let (tents_by_row, tents_by_col) = grid.count_tents_by_row_and_col();
    let mut marked = 0;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if grid.kind(row, col) != Some(CellKind::Undecided) {
                continue;
            }

            if grass_reason(grid, row, col, &tents_by_row, &tents_by_col).is_some() {
                if let Some(cell) = grid.cell_mut(row, col) {
                    cell.kind = CellKind::Grass;
                    marked += 1;
                }
            }
        }
    }

    marked
}

/// Whether a line forces a tent on a cell of component `label`
///
/// The line's remaining tents must equal its number of distinct components
/// and the component must have exactly one cell in the line.
pub fn line_forces_tent(
    target: usize,
    placed: usize,
    histogram: &HashMap<Label, usize>,
    label: Label,
) -> bool {
    target.checked_sub(placed) == Some(histogram.len()) && histogram.get(&label) == Some(&1)
}

/// Rule T: place tents on cells whose row or column leaves no alternative
///
/// Tallies and component histograms are taken once before the sweep, so
/// labels must be current. Returns the number of tents placed.
///
/// # Errors
///
/// Propagates the `place_tent` failure that stopped the sweep; tents placed
/// before it stay placed
pub fn mark_tents(grid: &mut Grid) -> Result<usize> {
    let (tents_by_row, tents_by_col) = grid.count_tents_by_row_and_col();
    let (labels_by_row, labels_by_col) = grid.undecided_label_histogram();
    let empty = HashMap::new();
    let mut placed = 0;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let Some(cell) = grid.cell(row, col).copied() else {
                continue;
            };
            if cell.kind != CellKind::Undecided {
                continue;
            }

            let forced_by_row = line_forces_tent(
                grid.row_sums().get(row).copied().unwrap_or(0),
                tents_by_row.get(row).copied().unwrap_or(0),
                labels_by_row.get(row).unwrap_or(&empty),
                cell.label,
            );
            let forced_by_col = line_forces_tent(
                grid.col_sums().get(col).copied().unwrap_or(0),
                tents_by_col.get(col).copied().unwrap_or(0),
                labels_by_col.get(col).unwrap_or(&empty),
                cell.label,
            );

            if forced_by_row || forced_by_col {
                grid.place_tent(row, col)?;
                placed += 1;
            }
        }
    }

    Ok(placed)
}

/// Rule C: record trees whose tent question is settled
///
/// A tree with no undecided cell among its eight surrounding cells is
/// matched, and a tent touching exactly one unmatched tree claims it.
/// Matches made earlier in the sweep are visible to later cells. Returns
/// the number of trees newly matched.
pub fn match_trees(grid: &mut Grid) -> usize {
    let mut matched = 0;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            match grid.kind(row, col) {
                Some(CellKind::Tree) => {
                    if grid.adjacent_undecided_count(row, col) == 0 {
                        matched += usize::from(set_matched(grid, row, col));
                    }
                }
                Some(CellKind::Tent) => {
                    if let [tree] = grid.adjacent_unmatched_trees(row, col).as_slice() {
                        matched += usize::from(set_matched(grid, tree.row, tree.col));
                    }
                }
                _ => {}
            }
        }
    }

    matched
}

fn set_matched(grid: &mut Grid, row: usize, col: usize) -> bool {
    grid.cell_mut(row, col).is_some_and(|cell| {
        let newly = !cell.matched;
        cell.matched = true;
        newly
    })
}
