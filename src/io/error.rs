//! Error types and context management for solver operations

use std::fmt;
use std::path::PathBuf;

use crate::spatial::cell::Label;

/// Which argument of a union-find `union` call was missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSide {
    /// The label whose set is absorbed
    First,
    /// The label whose set absorbs the other
    Second,
}

impl fmt::Display for MissingSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Second => write!(f, "second"),
        }
    }
}

/// Main error type for all solver operations
#[derive(Debug)]
pub enum PuzzleError {
    /// Union-find `union` referenced a label that is in no set
    ///
    /// Only a labeling bug can produce this; the labeling pass is abandoned.
    MissingElement {
        /// Which argument was missing
        side: MissingSide,
        /// The label that was looked up
        label: Label,
    },

    /// Tried to place a tent on a cell that is already decided
    NotUndecided {
        /// Row of the cell
        row: usize,
        /// Column of the cell
        col: usize,
    },

    /// Tried to place a tent with no edge-sharing tree
    NoAdjacentTree {
        /// Row of the cell
        row: usize,
        /// Column of the cell
        col: usize,
    },

    /// Tried to place a tent touching another tent
    AdjacentTentConflict {
        /// Row of the cell
        row: usize,
        /// Column of the cell
        col: usize,
    },

    /// A rule or labeling failure inside the solve loop
    InIteration {
        /// Solve-loop iteration (1-based)
        iteration: usize,
        /// Step that failed
        operation: &'static str,
        /// Underlying failure
        source: Box<PuzzleError>,
    },

    /// Failed to decode a puzzle file
    PuzzleLoad {
        /// Path to the puzzle file
        path: PathBuf,
        /// Underlying decoding error
        source: serde_json::Error,
    },

    /// Puzzle definition is structurally unusable
    InvalidPuzzle {
        /// Description of what's wrong with the puzzle
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to save a rendered image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement { side, label } => {
                write!(f, "Union failed: no set holds the {side} label {label}")
            }
            Self::NotUndecided { row, col } => {
                write!(f, "Cannot place tent at {row},{col}: cell is not undecided")
            }
            Self::NoAdjacentTree { row, col } => {
                write!(f, "Cannot place tent at {row},{col}: no adjacent tree")
            }
            Self::AdjacentTentConflict { row, col } => {
                write!(f, "Cannot place tent at {row},{col}: adjacent to another tent")
            }
            Self::InIteration {
                iteration,
                operation,
                source,
            } => {
                write!(f, "Iteration {iteration} failed during {operation}: {source}")
            }
            Self::PuzzleLoad { path, source } => {
                write!(f, "Failed to load puzzle '{}': {source}", path.display())
            }
            Self::InvalidPuzzle { reason } => {
                write!(f, "Invalid puzzle: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InIteration { source, .. } => Some(source.as_ref()),
            Self::PuzzleLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl PuzzleError {
    /// Innermost error, looking through iteration context
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::InIteration { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current solve-loop iteration
    pub iteration: Option<usize>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with solver state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the operation context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the operation context applied
    fn with_operation(self, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<PuzzleError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let error = e.into();
            // The innermost iteration context wins
            match context.iteration {
                Some(iteration) if !matches!(error, PuzzleError::InIteration { .. }) => {
                    PuzzleError::InIteration {
                        iteration,
                        operation: context.operation.unwrap_or("solve"),
                        source: Box::new(error),
                    }
                }
                _ => error,
            }
        })
    }

    fn with_operation(self, operation: &'static str) -> Result<T> {
        self.with_context(ErrorContext {
            operation: Some(operation),
            ..Default::default()
        })
    }
}

impl From<serde_json::Error> for PuzzleError {
    fn from(err: serde_json::Error) -> Self {
        Self::PuzzleLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid path error
pub fn path_error(path: &std::path::Path, reason: &str) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter: "path",
        value: path.display().to_string(),
        reason: reason.to_string(),
    }
}
