//! Puzzle definition loading, validation and solution records

use crate::algorithm::solver::{SolveReport, SolveStatus};
use crate::io::configuration::{GRASS_MARKER, TENT_MARKER, TREE_MARKER};
use crate::io::error::{PuzzleError, Result};
use crate::spatial::grid::Grid;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

/// Puzzle as stored on disk
///
/// `inputTable` holds one marker per cell; `"t"` is a tree and every other
/// marker starts undecided. Tables exported from a solved puzzle still
/// carry their tents, and serve as the reference solution when no
/// explicit `solution` is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PuzzleDefinition {
    /// Required tents per row
    pub row_sums: Vec<usize>,
    /// Required tents per column
    pub col_sums: Vec<usize>,
    /// Cell markers, row by row
    pub input_table: Vec<Vec<String>>,
    /// Known solution markers, row by row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Vec<Vec<String>>>,
}

impl PuzzleDefinition {
    /// Parse and validate a puzzle from JSON text
    ///
    /// # Errors
    ///
    /// Returns `PuzzleLoad` for malformed JSON or unknown fields and
    /// `InvalidPuzzle` if the shapes are inconsistent
    pub fn from_json_str(json: &str) -> Result<Self> {
        let puzzle: Self = serde_json::from_str(json)?;
        puzzle.validate()?;
        Ok(puzzle)
    }

    /// Parse and validate a puzzle streamed from `reader`
    ///
    /// # Errors
    ///
    /// Returns `PuzzleLoad` for unreadable or malformed JSON and
    /// `InvalidPuzzle` if the shapes are inconsistent
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let puzzle: Self = serde_json::from_reader(reader)?;
        puzzle.validate()?;
        Ok(puzzle)
    }

    /// Read, parse and validate a puzzle file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The contents are not a valid puzzle definition
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| PuzzleError::FileSystem {
            path: path.to_path_buf(),
            operation: "read puzzle",
            source: e,
        })?;

        let puzzle: Self = serde_json::from_str(&json).map_err(|e| PuzzleError::PuzzleLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        puzzle.validate()?;
        Ok(puzzle)
    }

    /// Check that the table is rectangular and matches both target lists
    ///
    /// # Errors
    ///
    /// Returns `InvalidPuzzle` describing the first inconsistency
    pub fn validate(&self) -> Result<()> {
        let rows = self.input_table.len();
        let cols = self.input_table.first().map_or(0, Vec::len);

        if rows == 0 || cols == 0 {
            return Err(invalid_puzzle("input table is empty".to_string()));
        }
        if let Some(row) = self.input_table.iter().position(|line| line.len() != cols) {
            return Err(invalid_puzzle(format!(
                "input table row {row} does not have {cols} cells"
            )));
        }
        if self.row_sums.len() != rows {
            return Err(invalid_puzzle(format!(
                "{} row sums for {rows} rows",
                self.row_sums.len()
            )));
        }
        if self.col_sums.len() != cols {
            return Err(invalid_puzzle(format!(
                "{} column sums for {cols} columns",
                self.col_sums.len()
            )));
        }
        if let Some(solution) = &self.solution {
            if solution.len() != rows || solution.iter().any(|line| line.len() != cols) {
                return Err(invalid_puzzle(format!(
                    "solution is not a {rows}x{cols} table"
                )));
            }
        }

        Ok(())
    }

    /// Grid dimensions (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (
            self.input_table.len(),
            self.input_table.first().map_or(0, Vec::len),
        )
    }

    /// Build the initial grid; tents left in the table are cleared to undecided
    ///
    /// # Errors
    ///
    /// Returns `InvalidPuzzle` if the shapes are inconsistent
    pub fn to_grid(&self) -> Result<Grid> {
        Grid::from_markers(
            self.row_sums.clone(),
            self.col_sums.clone(),
            &self.input_table,
        )
    }

    /// Known solution: the explicit one, else the table itself when it carries tents
    pub fn reference_solution(&self) -> Option<&[Vec<String>]> {
        if let Some(solution) = &self.solution {
            return Some(solution.as_slice());
        }

        let has_tents = self
            .input_table
            .iter()
            .flatten()
            .any(|marker| marker == TENT_MARKER);
        has_tents.then_some(self.input_table.as_slice())
    }

    /// Compare a grid against the reference solution
    ///
    /// Returns `None` when the puzzle carries no reference solution.
    /// Any marker other than tent or tree in the reference counts as grass.
    pub fn verify(&self, grid: &Grid) -> Option<bool> {
        let reference = self.reference_solution()?;
        let solved = grid.markers();

        let matches = reference.len() == solved.len()
            && reference.iter().zip(&solved).all(|(expected, actual)| {
                expected.len() == actual.len()
                    && expected
                        .iter()
                        .zip(actual)
                        .all(|(e, a)| normalize_marker(e) == a.as_str())
            });

        Some(matches)
    }
}

fn normalize_marker(marker: &str) -> &str {
    match marker {
        TENT_MARKER | TREE_MARKER => marker,
        _ => GRASS_MARKER,
    }
}

fn invalid_puzzle(reason: String) -> PuzzleError {
    PuzzleError::InvalidPuzzle { reason }
}

/// Solve status as written to solution files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordStatus {
    /// Every cell decided
    Solved,
    /// Rules stalled or the iteration cap was hit
    Unsolved,
    /// A rule hit a contradiction and the attempt was abandoned
    Failed,
}

/// Solver output as written next to the puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionRecord {
    /// Required tents per row
    pub row_sums: Vec<usize>,
    /// Required tents per column
    pub col_sums: Vec<usize>,
    /// Final markers, `"?"` for undecided cells
    pub solution: Vec<Vec<String>>,
    /// Whether the grid was fully decided
    pub status: RecordStatus,
    /// Solve-loop iterations executed
    pub iterations: usize,
    /// Agreement with the reference solution, when the puzzle had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Why the attempt was abandoned, for failed solves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SolutionRecord {
    /// Assemble a record from a finished solve
    pub fn new(puzzle: &PuzzleDefinition, grid: &Grid, report: &SolveReport) -> Self {
        let status = match report.status {
            SolveStatus::Solved => RecordStatus::Solved,
            SolveStatus::Unsolved(_) => RecordStatus::Unsolved,
        };

        Self {
            row_sums: grid.row_sums().to_vec(),
            col_sums: grid.col_sums().to_vec(),
            solution: grid.markers(),
            status,
            iterations: report.iterations,
            verified: puzzle.verify(grid),
            error: None,
        }
    }

    /// Assemble a record for a solve abandoned at `iteration`
    ///
    /// The grid is recorded as the failing iteration left it.
    pub fn failed(grid: &Grid, iteration: usize, error: &PuzzleError) -> Self {
        Self {
            row_sums: grid.row_sums().to_vec(),
            col_sums: grid.col_sums().to_vec(),
            solution: grid.markers(),
            status: RecordStatus::Failed,
            iterations: iteration,
            verified: None,
            error: Some(error.to_string()),
        }
    }

    /// Write the record as pretty-printed JSON followed by a newline
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the writer fails
    pub fn write_json(&self, mut writer: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        Ok(())
    }

    /// Write the record as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the parent directory or file cannot be written
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PuzzleError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| PuzzleError::FileSystem {
            path: path.to_path_buf(),
            operation: "write solution",
            source: e,
        })
    }
}
