//! Puzzle grid and cell types
//!
//! This module contains:
//! - Cell kinds and their display views
//! - The grid with its row and column targets
//! - Neighborhood offsets and bounds-checked lookups

/// Cell kinds, labels and views
pub mod cell;
/// Puzzle grid state and queries
pub mod grid;
/// Orthogonal and surrounding neighbor lookups
pub mod neighborhood;

pub use grid::Grid;
