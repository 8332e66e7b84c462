//! Compact record of the grid state the rules can change

use bitvec::{bitvec, vec::BitVec};

use crate::spatial::grid::Grid;

/// One bit per cell for "undecided" and one for "matched", in raster order
///
/// Rules only ever clear undecided bits and set matched bits, so two
/// snapshots that compare equal mean an iteration made no progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSnapshot {
    undecided: BitVec,
    matched: BitVec,
}

impl GridSnapshot {
    /// Capture the current grid state
    pub fn capture(grid: &Grid) -> Self {
        let cell_count = grid.rows() * grid.cols();
        let mut undecided = bitvec![0; cell_count];
        let mut matched = bitvec![0; cell_count];

        for (index, cell) in grid.cells().enumerate() {
            undecided.set(index, cell.kind.is_undecided());
            matched.set(index, cell.matched);
        }

        Self { undecided, matched }
    }

    /// Number of undecided cells
    pub fn undecided_count(&self) -> usize {
        self.undecided.count_ones()
    }

    /// Number of matched trees
    pub fn matched_count(&self) -> usize {
        self.matched.count_ones()
    }

    /// Whether `later` only moved forward from this snapshot
    ///
    /// No undecided bit may reappear and no matched bit may be lost.
    pub fn is_monotone_to(&self, later: &Self) -> bool {
        self.undecided.len() == later.undecided.len()
            && later
                .undecided
                .iter_ones()
                .all(|index| self.undecided.get(index).as_deref() == Some(&true))
            && self
                .matched
                .iter_ones()
                .all(|index| later.matched.get(index).as_deref() == Some(&true))
    }
}
