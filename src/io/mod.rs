//! Puzzle files, command-line handling and everything the solver shows or writes

/// Command-line parsing and batch puzzle processing
pub mod cli;
/// Markers, limits and palette constants
pub mod configuration;
/// Error types and context wrapping
pub mod error;
/// Terminal progress bars
pub mod progress;
/// Puzzle definitions and solution records
pub mod puzzle;
/// Text rendering of grids
pub mod render;
/// Solve animation capture and GIF export
pub mod visualization;
