//! Fixed-point solve loop
//!
//! Every iteration runs the grass rule, relabels the undecided components,
//! then runs the tent and tree rules against the one grid the solver owns.
//! The loop stops once nothing is undecided, once a whole iteration leaves
//! the grid untouched, or at the iteration cap. It never guesses.

use crate::algorithm::labeling::label_components;
use crate::algorithm::rules::{mark_grass, mark_tents, match_trees};
use crate::algorithm::snapshot::GridSnapshot;
use crate::io::configuration::{DEFAULT_MAX_ITERATIONS, GIF_FRAME_DELAY_MS};
use crate::io::error::{ErrorContext, PuzzleError, Result, WithContext, invalid_parameter};
use crate::io::visualization::VisualizationCapture;
use crate::spatial::grid::Grid;

/// Solve-loop limits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Iterations to run before giving up
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Create a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `max_iterations` is zero
    pub fn new(max_iterations: usize) -> Result<Self> {
        if max_iterations == 0 {
            return Err(invalid_parameter(
                "max_iterations",
                &max_iterations,
                &"at least one iteration is required",
            ));
        }
        Ok(Self { max_iterations })
    }
}

/// Where the loop stands after one iteration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Something changed and undecided cells remain
    Progressed,
    /// No undecided cells remain
    Solved,
    /// Nothing changed and undecided cells remain
    Stalled,
}

/// What a single iteration did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IterationReport {
    /// Iteration number (1-based)
    pub iteration: usize,
    /// Cells turned to grass by the grass rule
    pub grass_marked: usize,
    /// Undecided components after relabeling
    pub components: usize,
    /// Tents placed by the tent rule
    pub tents_placed: usize,
    /// Trees newly matched by the tree rule
    pub trees_matched: usize,
    /// Undecided cells before the iteration
    pub undecided_before: usize,
    /// Undecided cells after the iteration
    pub undecided_after: usize,
    /// Resulting loop state
    pub outcome: StepOutcome,
}

impl IterationReport {
    /// Final report if the loop should stop after this iteration
    pub fn terminal_report(&self, config: SolverConfig) -> Option<SolveReport> {
        let status = match self.outcome {
            StepOutcome::Solved => SolveStatus::Solved,
            StepOutcome::Stalled => SolveStatus::Unsolved(UnsolvedReason::NoProgress),
            StepOutcome::Progressed if self.iteration >= config.max_iterations => {
                SolveStatus::Unsolved(UnsolvedReason::IterationLimit)
            }
            StepOutcome::Progressed => return None,
        };

        Some(SolveReport {
            status,
            iterations: self.iteration,
            undecided: self.undecided_after,
        })
    }
}

/// Why a solve ended without deciding every cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsolvedReason {
    /// A full iteration changed nothing
    NoProgress,
    /// The configured iteration cap was reached
    IterationLimit,
}

/// Terminal status of a solve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// Every cell is decided
    Solved,
    /// The rules ran out before the grid was decided
    Unsolved(UnsolvedReason),
}

/// Summary of a finished solve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveReport {
    /// How the loop ended
    pub status: SolveStatus,
    /// Iterations executed
    pub iterations: usize,
    /// Undecided cells left
    pub undecided: usize,
}

impl SolveReport {
    /// Whether the grid ended fully decided
    pub const fn is_solved(&self) -> bool {
        matches!(self.status, SolveStatus::Solved)
    }
}

/// Constraint-propagation solver owning one puzzle grid
#[derive(Debug)]
pub struct Solver {
    grid: Grid,
    config: SolverConfig,
    iteration: usize,
    visualization: Option<VisualizationCapture>,
}

impl Solver {
    /// Create a solver for a freshly loaded grid
    pub const fn new(grid: Grid, config: SolverConfig) -> Self {
        Self {
            grid,
            config,
            iteration: 0,
            visualization: None,
        }
    }

    /// Current grid state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Give back the grid
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Iterations executed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Active configuration
    pub const fn config(&self) -> SolverConfig {
        self.config
    }

    /// Start recording a frame per iteration, beginning with the current state
    pub fn enable_visualization(&mut self) {
        // Each iteration short of the last decides a cell or matches a tree
        let cells = self.grid.rows().saturating_mul(self.grid.cols());
        let max_frames = self
            .config
            .max_iterations
            .min(cells.saturating_mul(2).saturating_add(1))
            .saturating_add(1);
        let mut capture =
            VisualizationCapture::new(self.grid.rows(), self.grid.cols(), max_frames);
        capture.record_frame(self.grid.views(), self.iteration);
        self.visualization = Some(capture);
    }

    /// Recorded frames, if visualization was enabled
    pub const fn visualization(&self) -> Option<&VisualizationCapture> {
        self.visualization.as_ref()
    }

    /// Export the recorded frames as a GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Visualization was not enabled
    /// - GIF export fails
    pub fn export_visualization(&self, output_path: &str) -> Result<()> {
        self.visualization.as_ref().map_or_else(
            || {
                Err(PuzzleError::InvalidParameter {
                    parameter: "visualization",
                    value: "disabled".to_string(),
                    reason: "Visualization was not enabled for this run".to_string(),
                })
            },
            |viz| viz.export_gif(output_path, GIF_FRAME_DELAY_MS),
        )
    }

    /// Run one iteration: grass, relabel, tents, trees
    ///
    /// # Errors
    ///
    /// Returns `InIteration` wrapping the labeling or tent-placement failure
    /// that aborted the iteration
    pub fn step(&mut self) -> Result<IterationReport> {
        self.iteration += 1;
        let iteration = self.iteration;
        let context = |operation| ErrorContext {
            iteration: Some(iteration),
            operation: Some(operation),
        };

        let before = GridSnapshot::capture(&self.grid);

        let grass_marked = mark_grass(&mut self.grid);

        // Tent rule histograms must see labels for the post-grass grid
        let labels = label_components(&self.grid).with_context(context("labeling"))?;
        labels.apply_to(&mut self.grid);

        let tents_placed = mark_tents(&mut self.grid).with_context(context("tent placement"))?;
        let trees_matched = match_trees(&mut self.grid);

        let after = GridSnapshot::capture(&self.grid);

        if let Some(viz) = &mut self.visualization {
            viz.record_frame(self.grid.views(), iteration);
        }

        let outcome = if after.undecided_count() == 0 {
            StepOutcome::Solved
        } else if after == before {
            StepOutcome::Stalled
        } else {
            StepOutcome::Progressed
        };

        Ok(IterationReport {
            iteration,
            grass_marked,
            components: labels.component_count(),
            tents_placed,
            trees_matched,
            undecided_before: before.undecided_count(),
            undecided_after: after.undecided_count(),
            outcome,
        })
    }

    /// Iterate until solved, stalled or out of iterations
    ///
    /// At least one iteration always runs, so trees of an already decided
    /// grid still get matched.
    ///
    /// # Errors
    ///
    /// Propagates the first iteration failure; the grid keeps the changes
    /// made before it
    pub fn solve(&mut self) -> Result<SolveReport> {
        loop {
            let report = self.step()?;
            if let Some(finished) = report.terminal_report(self.config) {
                return Ok(finished);
            }
        }
    }
}
