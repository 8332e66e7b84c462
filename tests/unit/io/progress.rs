//! Tests for per-puzzle progress tracking

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;
    use tents::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use tents::io::progress::ProgressManager;

    // Tests the full lifecycle of a single puzzle
    // Verified by panicking on unknown indices
    #[test]
    fn test_progress_manager_lifecycle() {
        let mut pm = ProgressManager::new();

        pm.initialize(0);
        pm.finish();

        pm.initialize(1);
        pm.start_file(0, Path::new("small.json"), 10);
        pm.update_iteration(0, 1, Duration::from_millis(5));
        pm.update_iteration(0, 2, Duration::from_millis(9));
        pm.complete_file(0, true, Duration::from_millis(10));
        pm.finish();
    }

    // Tests default trait implementation
    // Verified by creating different initial states
    #[test]
    fn test_progress_manager_default() {
        let mut pm = ProgressManager::default();
        pm.initialize(2);
        pm.start_file(1, Path::new("second.json"), 50);
        pm.complete_file(1, false, Duration::from_millis(1));
        pm.finish();
    }

    // Tests batch mode with more puzzles than individual bars
    // Verified by creating a bar per puzzle
    #[test]
    fn test_batch_mode_rolls_window() {
        let mut pm = ProgressManager::new();
        let count = MAX_INDIVIDUAL_PROGRESS_BARS * 2 + 1;
        pm.initialize(count);

        for index in 0..count {
            pm.start_file(index, Path::new(&format!("puzzle{index}.json")), 100);
            pm.update_iteration(index, 3, Duration::from_millis(3));
            pm.complete_file(index, index % 2 == 0, Duration::from_millis(4));
        }
        pm.finish();
    }

    // Tests updates for puzzles that were never started are ignored
    // Verified by indexing the state list directly
    #[test]
    fn test_updates_for_unknown_puzzles() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);

        pm.update_iteration(7, 1, Duration::ZERO);
        pm.complete_file(7, true, Duration::ZERO);
        pm.finish();
    }
}
