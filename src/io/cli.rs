//! Command-line interface for solving puzzle files in batches

use crate::algorithm::solver::{
    IterationReport, SolveReport, SolveStatus, Solver, SolverConfig, UnsolvedReason,
};
use crate::io::configuration::{DEFAULT_MAX_ITERATIONS, OUTPUT_SUFFIX, PUZZLE_EXTENSION};
use crate::io::error::{PuzzleError, Result, invalid_parameter, path_error};
use crate::io::progress::ProgressManager;
use crate::io::puzzle::{PuzzleDefinition, SolutionRecord};
use crate::io::render::{flat_string, render_table};
use crate::spatial::grid::Grid;
use clap::Parser;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "tents")]
#[command(
    author,
    version,
    about = "Solve Tents and Trees puzzles by constraint propagation"
)]
/// Command-line arguments for the solver
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Puzzle JSON file or directory of puzzle files; reads stdin when absent
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Maximum solve iterations per puzzle
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub iterations: usize,

    /// Print the grid after every iteration
    #[arg(short, long)]
    pub verbose: bool,

    /// Print component labels alongside the grid in verbose mode
    #[arg(short, long)]
    pub labels: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Solve puzzles even if their solution file exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Write an animated GIF of the solve
    #[arg(short = 'g', long)]
    pub visualize: bool,
}

impl Cli {
    /// Check if existing solution files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress bars should be displayed
    ///
    /// Verbose output writes to the same stream, so it hides the bars too.
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && !self.verbose
    }
}

/// Solves every puzzle the CLI target names
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a processor for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Solve all selected puzzles, writing a solution record for each
    ///
    /// Without a target the puzzle is read from stdin and its record is
    /// written to stdout. A puzzle whose solve hits a contradiction gets a
    /// failed record and the batch moves on.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target is neither a puzzle file nor a directory
    /// - The iteration cap is zero
    /// - A puzzle cannot be loaded or its record written
    pub fn process(&mut self) -> Result<()> {
        let Some(target) = self.cli.target.clone() else {
            return self.process_stream(std::io::stdin().lock(), std::io::stdout().lock());
        };

        let config = SolverConfig::new(self.cli.iterations)?;
        let files = self.collect_files(&target)?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, config)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Solve one puzzle read from `input`, writing its record to `output`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The iteration cap is zero
    /// - Visualization was requested, which needs a file target
    /// - The puzzle cannot be parsed or the record written
    pub fn process_stream(&mut self, input: impl Read, output: impl Write) -> Result<()> {
        let config = SolverConfig::new(self.cli.iterations)?;
        if self.cli.visualize {
            return Err(invalid_parameter(
                "visualize",
                &"stdin",
                &"a GIF needs a puzzle file to be written next to",
            ));
        }

        let puzzle = PuzzleDefinition::from_reader(input)?;
        let mut solver = Solver::new(puzzle.to_grid()?, config);

        if self.cli.verbose {
            self.print_grid(&solver, "stdin: initial grid");
        }

        let record = match self.run_solver(&mut solver, config, None) {
            Ok(report) => {
                let record = SolutionRecord::new(&puzzle, solver.grid(), &report);
                if self.cli.verbose {
                    Self::print_summary(solver.grid(), &report, record.verified);
                }
                record
            }
            Err(error) => {
                self.report_failure(Path::new("stdin"), &error);
                SolutionRecord::failed(solver.grid(), solver.iteration(), &error)
            }
        };

        record.write_json(output)
    }

    fn collect_files(&self, target: &Path) -> Result<Vec<PathBuf>> {
        if target.is_file() {
            if !is_puzzle_file(target) {
                return Err(path_error(target, "Target file must be a puzzle JSON file"));
            }
            Ok(if self.should_process_file(target) {
                vec![target.to_path_buf()]
            } else {
                Vec::new()
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if path.is_file() && is_puzzle_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(path_error(
                target,
                "Target must be a puzzle JSON file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = solution_path(input_path);
        if output_path.exists() {
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (solution exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize, config: SolverConfig) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, config.max_iterations);
        }

        let puzzle = PuzzleDefinition::from_path(input_path)?;
        let mut solver = Solver::new(puzzle.to_grid()?, config);

        if self.cli.visualize {
            solver.enable_visualization();
        }

        if self.cli.verbose {
            self.print_grid(&solver, &format!("{}: initial grid", input_path.display()));
        }

        let report = match self.run_solver(&mut solver, config, Some((index, start_time))) {
            Ok(report) => report,
            Err(error) => {
                self.report_failure(input_path, &error);
                SolutionRecord::failed(solver.grid(), solver.iteration(), &error)
                    .write_to(&solution_path(input_path))?;
                if let Some(ref mut pm) = self.progress_manager {
                    pm.complete_file(index, false, start_time.elapsed());
                }
                return Ok(());
            }
        };

        let record = SolutionRecord::new(&puzzle, solver.grid(), &report);
        record.write_to(&solution_path(input_path))?;

        if self.cli.visualize {
            let viz_path = visualization_path(input_path);
            solver.export_visualization(
                viz_path
                    .to_str()
                    .ok_or_else(|| path_error(&viz_path, "Invalid visualization path"))?,
            )?;
        }

        if self.cli.verbose {
            Self::print_summary(solver.grid(), &report, record.verified);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, report.is_solved(), start_time.elapsed());
        }

        Ok(())
    }

    /// Step until the loop stops, reporting progress for batch file `progress`
    fn run_solver(
        &mut self,
        solver: &mut Solver,
        config: SolverConfig,
        progress: Option<(usize, Instant)>,
    ) -> Result<SolveReport> {
        loop {
            let step = solver.step()?;

            if let (Some(pm), Some((index, start_time))) = (&mut self.progress_manager, progress) {
                pm.update_iteration(index, step.iteration, start_time.elapsed());
            }
            if self.cli.verbose {
                self.print_iteration(solver, &step);
            }

            if let Some(report) = step.terminal_report(config) {
                return Ok(report);
            }
        }
    }

    #[allow(clippy::print_stderr)]
    fn report_failure(&self, input_path: &Path, error: &PuzzleError) {
        if !self.cli.quiet {
            eprintln!("Failed: {}: {error}", input_path.display());
        }
    }

    #[allow(clippy::print_stderr)]
    fn print_grid(&self, solver: &Solver, title: &str) {
        eprintln!("{title}");
        eprint!("{}", render_table(solver.grid(), false));
        if self.cli.labels {
            eprint!("{}", render_table(solver.grid(), true));
        }
    }

    fn print_iteration(&self, solver: &Solver, step: &IterationReport) {
        self.print_grid(
            solver,
            &format!(
                "Iteration {}: {} grass, {} tents, {} trees matched, {} components, {} undecided",
                step.iteration,
                step.grass_marked,
                step.tents_placed,
                step.trees_matched,
                step.components,
                step.undecided_after,
            ),
        );
    }

    #[allow(clippy::print_stderr)]
    fn print_summary(grid: &Grid, report: &SolveReport, verified: Option<bool>) {
        let status = match report.status {
            SolveStatus::Solved => "solved",
            SolveStatus::Unsolved(UnsolvedReason::NoProgress) => "unsolved (no progress)",
            SolveStatus::Unsolved(UnsolvedReason::IterationLimit) => "unsolved (iteration limit)",
        };
        eprintln!(
            "Finished after {} iterations: {status}, {} undecided",
            report.iterations, report.undecided
        );
        eprintln!("{}", flat_string(grid));

        match verified {
            Some(true) => eprintln!("Solution is correct"),
            Some(false) => eprintln!("Solution is wrong"),
            None => {}
        }
    }
}

/// Whether a path names a puzzle input rather than a solver output
pub fn is_puzzle_file(path: &Path) -> bool {
    let is_json = path.extension().and_then(|s| s.to_str()) == Some(PUZZLE_EXTENSION);
    let is_output = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX));

    is_json && !is_output
}

/// Solution record path for a puzzle file
pub fn solution_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, PUZZLE_EXTENSION)
}

/// Visualization path for a puzzle file
pub fn visualization_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, "gif")
}

fn sibling_path(input_path: &Path, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{OUTPUT_SUFFIX}.{extension}", stem.to_string_lossy());

    input_path
        .parent()
        .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
}
