//! Connected-component labeling of undecided cells
//!
//! Classic two-pass labeling with 4-connectivity: a raster pass hands out
//! provisional labels and records equivalences in a fresh [`DisjointSet`],
//! then a resolution pass rewrites every provisional label to its set's
//! representative. Nothing survives between calls.

use ndarray::Array2;

use crate::algorithm::union_find::DisjointSet;
use crate::io::error::Result;
use crate::spatial::cell::{CellKind, Label};
use crate::spatial::grid::Grid;

/// Canonical component label for every cell (0 where the cell is not undecided)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Array2<Label>,
    component_count: usize,
}

impl LabelMap {
    /// Label at a position, 0 when unlabeled or out of bounds
    pub fn get(&self, row: usize, col: usize) -> Label {
        self.labels.get([row, col]).copied().unwrap_or(0)
    }

    /// Number of distinct components
    pub const fn component_count(&self) -> usize {
        self.component_count
    }

    /// Underlying label matrix
    pub const fn labels(&self) -> &Array2<Label> {
        &self.labels
    }

    /// Write the labels into the grid's cells, clearing labels everywhere else
    pub fn apply_to(&self, grid: &mut Grid) {
        for cell in grid.cells_mut() {
            cell.label = self.labels.get([cell.row, cell.col]).copied().unwrap_or(0);
        }
    }
}

/// Label the 4-connected components of the grid's undecided cells
///
/// # Errors
///
/// Returns `MissingElement` if an equivalence references a label that was
/// never registered, which indicates a labeling bug
pub fn label_components(grid: &Grid) -> Result<LabelMap> {
    let mut provisional: Array2<Label> = Array2::zeros(grid.dimensions());
    let mut equivalences = DisjointSet::new();
    let mut next_label: Label = 1;

    let is_undecided =
        |row: usize, col: usize| grid.kind(row, col) == Some(CellKind::Undecided);

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if !is_undecided(row, col) {
                continue;
            }

            // Only the up and left neighbors have been visited in raster order
            let mut prior = Vec::with_capacity(2);
            if row > 0 && is_undecided(row - 1, col) {
                prior.extend(provisional.get([row - 1, col]).copied());
            }
            if col > 0 && is_undecided(row, col - 1) {
                prior.extend(provisional.get([row, col - 1]).copied());
            }

            let assigned = if let Some(&min_label) = prior.iter().min() {
                for &other in prior.iter().filter(|&&label| label != min_label) {
                    equivalences.union(min_label, other)?;
                }
                min_label
            } else {
                let fresh = next_label;
                equivalences.make_set(fresh);
                next_label += 1;
                fresh
            };

            if let Some(slot) = provisional.get_mut([row, col]) {
                *slot = assigned;
            }
        }
    }

    let labels = Array2::from_shape_fn(grid.dimensions(), |(row, col)| {
        let label = provisional.get([row, col]).copied().unwrap_or(0);
        if label == 0 {
            return 0;
        }
        equivalences
            .find_set(label)
            .and_then(|handle| equivalences.representative(handle))
            .unwrap_or(label)
    });

    Ok(LabelMap {
        labels,
        component_count: equivalences.set_count(),
    })
}
