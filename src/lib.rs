//! Tents and Trees puzzle solver using pure constraint propagation
//!
//! Each iteration marks forced grass, labels the connected regions of
//! undecided cells, places tents forced by row and column targets, and
//! matches trees to tents. The loop repeats until the grid is decided or
//! stops changing; it never guesses or backtracks.

#![forbid(unsafe_code)]

/// Deduction rules, component labeling and the solve loop
pub mod algorithm;
/// Puzzle files, CLI, rendering and error handling
pub mod io;
/// Grid, cells and neighborhoods
pub mod spatial;

pub use io::error::{PuzzleError, Result};
