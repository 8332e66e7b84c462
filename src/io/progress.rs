//! Per-puzzle iteration bars with a batch bar for large puzzle sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static PUZZLE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:<24} [{bar:30.green/white}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Puzzles: [{bar:40.green/white}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

#[derive(Clone, Debug, Default)]
struct PuzzleProgress {
    name: String,
    iteration: usize,
    max_iterations: usize,
    elapsed: Duration,
    finished: Option<bool>,
}

impl PuzzleProgress {
    fn label(&self) -> String {
        match self.finished {
            Some(true) => format!("✓ {}", self.name),
            Some(false) => format!("✗ {}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Progress display for a batch of puzzles
///
/// Shows one bar per recent puzzle, counting solve iterations against the
/// cap. Batches with more puzzles than individual bars also get an overall
/// bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    puzzle_bars: Vec<ProgressBar>,
    puzzles: Vec<PuzzleProgress>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with no bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            puzzle_bars: Vec::new(),
            puzzles: Vec::new(),
        }
    }

    /// Allocate bars for `puzzle_count` puzzles
    pub fn initialize(&mut self, puzzle_count: usize) {
        if puzzle_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(puzzle_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let missing = puzzle_count
            .min(MAX_INDIVIDUAL_PROGRESS_BARS)
            .saturating_sub(self.puzzle_bars.len());
        for _ in 0..missing {
            let bar = ProgressBar::new(0);
            bar.set_style(PUZZLE_STYLE.clone());
            self.puzzle_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Begin tracking the puzzle at `index`
    pub fn start_file(&mut self, index: usize, path: &Path, max_iterations: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        if index >= self.puzzles.len() {
            self.puzzles.resize(index + 1, PuzzleProgress::default());
        }
        if let Some(puzzle) = self.puzzles.get_mut(index) {
            *puzzle = PuzzleProgress {
                name,
                max_iterations,
                ..PuzzleProgress::default()
            };
        }
        self.redraw();
    }

    /// Record that the puzzle at `index` finished `iteration`
    pub fn update_iteration(&mut self, index: usize, iteration: usize, elapsed: Duration) {
        if let Some(puzzle) = self.puzzles.get_mut(index) {
            puzzle.iteration = iteration;
            puzzle.elapsed = elapsed;
        }
        self.redraw();
    }

    /// Mark the puzzle at `index` as done, solved or not
    pub fn complete_file(&mut self, index: usize, solved: bool, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(puzzle) = self.puzzles.get_mut(index) {
            puzzle.finished = Some(solved);
            puzzle.elapsed = elapsed;
        }
        self.redraw();
    }

    /// Remove every bar from the terminal
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All puzzles processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn redraw(&self) {
        let started: Vec<&PuzzleProgress> = self
            .puzzles
            .iter()
            .filter(|puzzle| !puzzle.name.is_empty())
            .collect();
        let first_visible = started.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = started.get(first_visible..).unwrap_or(&[]);

        for (bar, puzzle) in self.puzzle_bars.iter().zip(visible) {
            // Finished puzzles fill their bar even when they stopped early
            let position = if puzzle.finished.is_some() {
                puzzle.max_iterations
            } else {
                puzzle.iteration
            };
            bar.set_length(puzzle.max_iterations as u64);
            bar.set_position(position as u64);
            bar.set_prefix(puzzle.label());
            bar.set_message(format!(
                "iteration {} ({:.1?})",
                puzzle.iteration, puzzle.elapsed
            ));
        }

        for bar in self.puzzle_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_prefix(String::new());
            bar.set_message(String::new());
        }
    }
}
