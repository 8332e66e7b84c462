//! Cell kinds, per-cell state and the marker alphabet used by puzzle files

use crate::io::configuration::{GRASS_MARKER, TENT_MARKER, TREE_MARKER, UNDECIDED_MARKER};

/// Connected-component label; 0 means unlabeled
pub type Label = u32;

/// What occupies a cell
///
/// Trees are fixed at construction. Every other cell starts `Undecided`
/// and moves exactly once, to either `Grass` or `Tent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Definitely empty
    Grass,
    /// Definitely holds a tent
    Tent,
    /// Fixed tree
    Tree,
    /// Not yet determined
    Undecided,
}

impl CellKind {
    /// Parse an input marker; only the tree marker is meaningful, anything else is undecided
    pub fn from_marker(marker: &str) -> Self {
        if marker == TREE_MARKER {
            Self::Tree
        } else {
            Self::Undecided
        }
    }

    /// Marker written to solution tables
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Grass => GRASS_MARKER,
            Self::Tent => TENT_MARKER,
            Self::Tree => TREE_MARKER,
            Self::Undecided => UNDECIDED_MARKER,
        }
    }

    /// Whether the kind can still change
    pub const fn is_undecided(self) -> bool {
        matches!(self, Self::Undecided)
    }
}

/// A single grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
    /// Current occupant
    pub kind: CellKind,
    /// Tree only: paired with a tent or otherwise needs no further attention
    pub matched: bool,
    /// Undecided only: canonical component label from the latest labeling pass
    pub label: Label,
}

impl Cell {
    /// Create an unmatched, unlabeled cell
    pub const fn new(row: usize, col: usize, kind: CellKind) -> Self {
        Self {
            row,
            col,
            kind,
            matched: false,
            label: 0,
        }
    }

    /// Read-only view of the cell for callers outside the engine
    pub const fn view(&self) -> CellView {
        match self.kind {
            CellKind::Grass => CellView::Grass,
            CellKind::Tent => CellView::Tent,
            CellKind::Tree if self.matched => CellView::MatchedTree,
            CellKind::Tree => CellView::Tree,
            CellKind::Undecided => CellView::Undecided,
        }
    }
}

/// Externally visible state of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellView {
    /// Empty cell
    Grass,
    /// Tent
    Tent,
    /// Tree not yet matched
    Tree,
    /// Tree whose placement ambiguity is resolved
    MatchedTree,
    /// Still open; only seen in unsolved grids
    Undecided,
}

impl CellView {
    /// Marker written to solution tables; matched and unmatched trees share one marker
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Grass => GRASS_MARKER,
            Self::Tent => TENT_MARKER,
            Self::Tree | Self::MatchedTree => TREE_MARKER,
            Self::Undecided => UNDECIDED_MARKER,
        }
    }
}
