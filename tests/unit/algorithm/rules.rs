//! Tests for the grass, tent and tree deduction rules

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use std::collections::HashMap;
    use tents::PuzzleError;
    use tents::algorithm::labeling::label_components;
    use tents::algorithm::rules::{
        GrassReason, grass_reason, line_forces_tent, mark_grass, mark_tents, match_trees,
    };
    use tents::spatial::cell::CellKind;
    use tents::spatial::grid::Grid;

    fn grid(rows: &[&str], row_sums: &[usize], col_sums: &[usize]) -> Grid {
        let cols = rows.first().map_or(0, |line| line.len());
        let kinds = Array2::from_shape_fn((rows.len(), cols), |(row, col)| {
            match rows[row].as_bytes()[col] {
                b't' => CellKind::Tree,
                b'T' => CellKind::Tent,
                b'.' => CellKind::Grass,
                _ => CellKind::Undecided,
            }
        });
        Grid::from_kinds(row_sums.to_vec(), col_sums.to_vec(), &kinds).unwrap()
    }

    fn relabel(grid: &mut Grid) {
        label_components(grid).unwrap().apply_to(grid);
    }

    fn reason(grid: &Grid, row: usize, col: usize) -> Option<GrassReason> {
        let (by_row, by_col) = grid.count_tents_by_row_and_col();
        grass_reason(grid, row, col, &by_row, &by_col)
    }

    // Tests empty lines force grass, rows checked before columns
    // Verified by checking columns first
    #[test]
    fn test_grass_reason_empty_lines() {
        let rows_empty = grid(&["?t", "??"], &[0, 1], &[0, 1]);
        assert_eq!(reason(&rows_empty, 0, 0), Some(GrassReason::EmptyRow));
        assert_eq!(reason(&rows_empty, 1, 0), Some(GrassReason::EmptyColumn));
    }

    // Tests full lines and tent contact
    // Verified by comparing placed tents with the other line's target
    #[test]
    fn test_grass_reason_full_line_and_tent_contact() {
        let grid = grid(&["Tt?", "??t"], &[1, 1], &[1, 1, 1]);

        assert_eq!(reason(&grid, 0, 2), Some(GrassReason::LineFull));
        assert_eq!(reason(&grid, 1, 0), Some(GrassReason::LineFull));
        assert_eq!(reason(&grid, 1, 1), Some(GrassReason::TouchesTent));
    }

    // Tests cells without a waiting tree become grass
    // Verified by counting matched trees as waiting
    #[test]
    fn test_grass_reason_no_unmatched_tree() {
        let mut grid = grid(&["?t", "??"], &[1, 1], &[1, 1]);

        assert_eq!(reason(&grid, 1, 0), Some(GrassReason::NoUnmatchedTree));
        assert_eq!(reason(&grid, 1, 1), None);

        grid.cell_mut(0, 1).unwrap().matched = true;
        assert_eq!(reason(&grid, 1, 1), Some(GrassReason::NoUnmatchedTree));
    }

    // Tests mark_grass only touches undecided cells that fail a check
    // Verified by marking decided cells as grass
    #[test]
    fn test_mark_grass() {
        let mut grid = grid(&["?t", "??"], &[0, 1], &[1, 1]);

        assert_eq!(mark_grass(&mut grid), 2);
        assert_eq!(grid.kind(0, 0), Some(CellKind::Grass));
        assert_eq!(grid.kind(0, 1), Some(CellKind::Tree));
        assert_eq!(grid.kind(1, 0), Some(CellKind::Grass));
        assert_eq!(grid.kind(1, 1), Some(CellKind::Undecided));

        assert_eq!(mark_grass(&mut grid), 0);
    }

    // Tests the line forcing condition
    // Verified by accepting components with two cells in the line
    #[test]
    fn test_line_forces_tent() {
        let single = HashMap::from([(5, 1)]);
        let double = HashMap::from([(5, 2)]);

        assert!(line_forces_tent(2, 1, &single, 5));
        assert!(!line_forces_tent(2, 1, &single, 6));
        assert!(!line_forces_tent(2, 1, &double, 5));
        assert!(!line_forces_tent(1, 1, &single, 5));
        assert!(!line_forces_tent(1, 2, &single, 5));
    }

    // Tests a column with one single-cell component gets its tent
    // Verified by requiring both the row and the column to force
    #[test]
    fn test_mark_tents_column_forcing() {
        let mut grid = grid(&["?t?"], &[1], &[1, 0, 0]);
        relabel(&mut grid);

        assert_eq!(mark_tents(&mut grid).unwrap(), 1);
        assert_eq!(grid.kind(0, 0), Some(CellKind::Tent));
        assert_eq!(grid.kind(0, 2), Some(CellKind::Undecided));
    }

    // Tests unlabeled cells are never forced
    // Verified by counting label 0 in the histograms
    #[test]
    fn test_mark_tents_needs_labels() {
        let mut grid = grid(&["?t?"], &[1], &[1, 0, 0]);

        assert_eq!(mark_tents(&mut grid).unwrap(), 0);
        assert_eq!(grid.undecided_count(), 2);
    }

    // Tests stale per-sweep tallies surface as a placement error
    // Verified by swallowing place_tent failures
    #[test]
    fn test_mark_tents_propagates_conflict() {
        let mut grid = grid(&["?t", "t?"], &[1, 1], &[1, 1]);
        relabel(&mut grid);

        let result = mark_tents(&mut grid);

        assert!(matches!(
            result,
            Err(PuzzleError::AdjacentTentConflict { row: 1, col: 1 })
        ));
        assert_eq!(grid.kind(0, 0), Some(CellKind::Tent));
        assert_eq!(grid.kind(1, 1), Some(CellKind::Undecided));
    }

    // Tests trees with no undecided surroundings are matched
    // Verified by checking only orthogonal neighbors
    #[test]
    fn test_match_trees_settled_tree() {
        let mut grid = grid(&["t.", ".?"], &[0, 1], &[0, 1]);

        assert_eq!(match_trees(&mut grid), 0);
        assert!(!grid.cell(0, 0).unwrap().matched);

        grid.cell_mut(1, 1).unwrap().kind = CellKind::Grass;
        assert_eq!(match_trees(&mut grid), 1);
        assert!(grid.cell(0, 0).unwrap().matched);
    }

    // Tests a tent claims its only unmatched tree, seeing earlier matches
    // Verified by taking the unmatched tree list before the sweep
    #[test]
    fn test_match_trees_tent_claims_tree() {
        let mut grid = grid(&["tTt?"], &[1], &[0, 1, 0, 0]);

        assert_eq!(match_trees(&mut grid), 2);
        assert!(grid.cell(0, 0).unwrap().matched);
        assert!(grid.cell(0, 2).unwrap().matched);

        assert_eq!(match_trees(&mut grid), 0);
    }

    // Tests a tent between two unmatched trees claims neither
    // Verified by matching the first adjacent tree
    #[test]
    fn test_match_trees_ambiguous_tent() {
        let mut grid = grid(&["tTt", "???"], &[1, 0], &[0, 1, 0]);

        assert_eq!(match_trees(&mut grid), 0);
        assert!(!grid.cell(0, 0).unwrap().matched);
        assert!(!grid.cell(0, 2).unwrap().matched);
    }
}
