//! Puzzle state: cell matrix, line targets and the queries the deduction rules run on
//!
//! All neighbor queries hand back copies of cells so a rule can never write
//! through a stale alias; mutation goes through [`Grid::cell_mut`] or
//! [`Grid::place_tent`] only.

use ndarray::Array2;
use std::collections::HashMap;

use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::spatial::cell::{Cell, CellKind, CellView, Label};
use crate::spatial::neighborhood::{ORTHOGONAL_OFFSETS, SURROUNDING_OFFSETS, neighbors};

/// Per-line map from component label to the number of its Undecided cells in that line
pub type LabelHistogram = Vec<HashMap<Label, usize>>;

/// Tents and Trees puzzle state
///
/// Row and column targets are fixed for the lifetime of the grid. Cells
/// are stored row-major so iteration order is the raster order every rule
/// depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
    row_sums: Vec<usize>,
    col_sums: Vec<usize>,
}

impl Grid {
    /// Build a grid from a kind matrix and its line targets
    ///
    /// Any kind is accepted so partially solved states can be reconstructed;
    /// puzzle input normally only carries trees and undecided cells.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPuzzle` if the matrix is empty or the target counts
    /// do not match its dimensions
    pub fn from_kinds(
        row_sums: Vec<usize>,
        col_sums: Vec<usize>,
        kinds: &Array2<CellKind>,
    ) -> Result<Self> {
        let (rows, cols) = kinds.dim();

        if rows == 0 || cols == 0 {
            return Err(PuzzleError::InvalidPuzzle {
                reason: "grid has no cells".to_string(),
            });
        }
        if row_sums.len() != rows {
            return Err(PuzzleError::InvalidPuzzle {
                reason: format!("{} row targets for {rows} rows", row_sums.len()),
            });
        }
        if col_sums.len() != cols {
            return Err(PuzzleError::InvalidPuzzle {
                reason: format!("{} column targets for {cols} columns", col_sums.len()),
            });
        }

        let cells = Array2::from_shape_fn((rows, cols), |(row, col)| {
            let kind = kinds.get([row, col]).copied().unwrap_or(CellKind::Undecided);
            Cell::new(row, col, kind)
        });

        Ok(Self {
            cells,
            row_sums,
            col_sums,
        })
    }

    /// Build a grid from a table of input markers (`"t"` is a tree, anything else undecided)
    ///
    /// # Errors
    ///
    /// Returns `InvalidPuzzle` if the table is empty or ragged, or the
    /// target counts do not match its dimensions
    pub fn from_markers(
        row_sums: Vec<usize>,
        col_sums: Vec<usize>,
        table: &[Vec<String>],
    ) -> Result<Self> {
        let rows = table.len();
        let cols = table.first().map_or(0, Vec::len);

        if let Some(row) = table.iter().position(|line| line.len() != cols) {
            return Err(PuzzleError::InvalidPuzzle {
                reason: format!("row {row} has a different width than row 0"),
            });
        }

        let kinds = Array2::from_shape_fn((rows, cols), |(row, col)| {
            table
                .get(row)
                .and_then(|line| line.get(col))
                .map_or(CellKind::Undecided, |marker| CellKind::from_marker(marker))
        });

        Self::from_kinds(row_sums, col_sums, &kinds)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid dimensions (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Required tent count per row
    pub fn row_sums(&self) -> &[usize] {
        &self.row_sums
    }

    /// Required tent count per column
    pub fn col_sums(&self) -> &[usize] {
        &self.col_sums
    }

    /// Cell at a position
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get([row, col])
    }

    /// Mutable access to a cell; the only way rules write cell state besides `place_tent`
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut([row, col])
    }

    /// Kind of the cell at a position
    pub fn kind(&self, row: usize, col: usize) -> Option<CellKind> {
        self.cell(row, col).map(|cell| cell.kind)
    }

    /// Externally visible state of the cell at a position
    pub fn cell_view(&self, row: usize, col: usize) -> Option<CellView> {
        self.cell(row, col).map(Cell::view)
    }

    /// All cells in raster order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Mutable cells in raster order
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// View matrix of the whole grid
    pub fn views(&self) -> Array2<CellView> {
        self.cells.map(Cell::view)
    }

    /// Solution markers per cell, row by row
    pub fn markers(&self) -> Vec<Vec<String>> {
        self.cells
            .rows()
            .into_iter()
            .map(|line| line.iter().map(|cell| cell.view().marker().to_string()).collect())
            .collect()
    }

    fn collect_neighbors(
        &self,
        row: usize,
        col: usize,
        offsets: &[[isize; 2]],
        keep: impl Fn(&Cell) -> bool,
    ) -> Vec<Cell> {
        neighbors(row, col, offsets, self.dimensions())
            .filter_map(|(r, c)| self.cell(r, c).copied())
            .filter(|cell| keep(cell))
            .collect()
    }

    /// Edge-sharing tree neighbors in up, down, left, right order
    pub fn adjacent_trees(&self, row: usize, col: usize) -> Vec<Cell> {
        self.collect_neighbors(row, col, &ORTHOGONAL_OFFSETS, |cell| {
            cell.kind == CellKind::Tree
        })
    }

    /// Edge-sharing tree neighbors that are not matched yet
    pub fn adjacent_unmatched_trees(&self, row: usize, col: usize) -> Vec<Cell> {
        self.adjacent_trees(row, col)
            .into_iter()
            .filter(|cell| !cell.matched)
            .collect()
    }

    /// Tents among the eight surrounding cells
    pub fn adjacent_tents(&self, row: usize, col: usize) -> Vec<Cell> {
        self.collect_neighbors(row, col, &SURROUNDING_OFFSETS, |cell| {
            cell.kind == CellKind::Tent
        })
    }

    /// Number of undecided cells among the eight surrounding cells
    pub fn adjacent_undecided_count(&self, row: usize, col: usize) -> usize {
        neighbors(row, col, &SURROUNDING_OFFSETS, self.dimensions())
            .filter(|&(r, c)| self.kind(r, c).is_some_and(CellKind::is_undecided))
            .count()
    }

    /// Count cells of one kind per row and per column
    pub fn count_kind(&self, kind: CellKind) -> (Vec<usize>, Vec<usize>) {
        let mut by_row = vec![0; self.rows()];
        let mut by_col = vec![0; self.cols()];

        for cell in self.cells().filter(|cell| cell.kind == kind) {
            if let Some(count) = by_row.get_mut(cell.row) {
                *count += 1;
            }
            if let Some(count) = by_col.get_mut(cell.col) {
                *count += 1;
            }
        }

        (by_row, by_col)
    }

    /// Tents placed so far per row and per column
    pub fn count_tents_by_row_and_col(&self) -> (Vec<usize>, Vec<usize>) {
        self.count_kind(CellKind::Tent)
    }

    /// Total number of undecided cells
    pub fn undecided_count(&self) -> usize {
        self.cells().filter(|cell| cell.kind.is_undecided()).count()
    }

    /// Whether every cell has a definite kind
    pub fn is_filled(&self) -> bool {
        self.undecided_count() == 0
    }

    /// Per-row and per-column component sizes of the labeled undecided cells
    ///
    /// A line with no labeled undecided cells keeps an empty map, which
    /// does not allocate.
    pub fn undecided_label_histogram(&self) -> (LabelHistogram, LabelHistogram) {
        let mut by_row: LabelHistogram = vec![HashMap::new(); self.rows()];
        let mut by_col: LabelHistogram = vec![HashMap::new(); self.cols()];

        for cell in self
            .cells()
            .filter(|cell| cell.kind.is_undecided() && cell.label != 0)
        {
            if let Some(histogram) = by_row.get_mut(cell.row) {
                *histogram.entry(cell.label).or_insert(0) += 1;
            }
            if let Some(histogram) = by_col.get_mut(cell.col) {
                *histogram.entry(cell.label).or_insert(0) += 1;
            }
        }

        (by_row, by_col)
    }

    /// Turn an undecided cell into a tent
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `InvalidParameter` if the position is outside the grid
    /// - `NotUndecided` if the cell already has a definite kind
    /// - `NoAdjacentTree` if no edge-sharing neighbor is a tree
    /// - `AdjacentTentConflict` if any surrounding cell is already a tent
    pub fn place_tent(&mut self, row: usize, col: usize) -> Result<()> {
        let kind = self.kind(row, col).ok_or_else(|| {
            invalid_parameter(
                "position",
                &format!("{row},{col}"),
                &format!("outside {}x{} grid", self.rows(), self.cols()),
            )
        })?;

        if kind != CellKind::Undecided {
            return Err(PuzzleError::NotUndecided { row, col });
        }
        if self.adjacent_trees(row, col).is_empty() {
            return Err(PuzzleError::NoAdjacentTree { row, col });
        }
        if !self.adjacent_tents(row, col).is_empty() {
            return Err(PuzzleError::AdjacentTentConflict { row, col });
        }

        if let Some(cell) = self.cell_mut(row, col) {
            cell.kind = CellKind::Tent;
        }

        Ok(())
    }

    /// Fully decided and locally consistent: every tent touches a tree and no other tent
    ///
    /// Line targets are not checked; see [`Grid::meets_targets`].
    pub fn is_valid(&self) -> bool {
        self.cells().all(|cell| match cell.kind {
            CellKind::Grass | CellKind::Tree => true,
            CellKind::Tent => {
                !self.adjacent_trees(cell.row, cell.col).is_empty()
                    && self.adjacent_tents(cell.row, cell.col).is_empty()
            }
            CellKind::Undecided => false,
        })
    }

    /// Whether every row and column holds exactly its target number of tents
    pub fn meets_targets(&self) -> bool {
        let (by_row, by_col) = self.count_tents_by_row_and_col();
        by_row == self.row_sums && by_col == self.col_sums
    }
}
