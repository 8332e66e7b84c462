//! Tests for connected-component labeling of undecided cells

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use tents::algorithm::labeling::label_components;
    use tents::spatial::cell::CellKind;
    use tents::spatial::grid::Grid;

    fn grid(rows: &[&str]) -> Grid {
        let cols = rows.first().map_or(0, |line| line.len());
        let kinds = Array2::from_shape_fn((rows.len(), cols), |(row, col)| {
            match rows[row].as_bytes()[col] {
                b't' => CellKind::Tree,
                b'T' => CellKind::Tent,
                b'.' => CellKind::Grass,
                _ => CellKind::Undecided,
            }
        });
        Grid::from_kinds(vec![1; rows.len()], vec![1; cols], &kinds).unwrap()
    }

    // Tests that decided cells stay unlabeled
    // Verified by labeling every cell
    #[test]
    fn test_decided_cells_get_zero() {
        let labels = label_components(&grid(&["t.T", "..t"])).unwrap();

        assert_eq!(labels.component_count(), 0);
        assert!(labels.labels().iter().all(|&label| label == 0));
    }

    // Tests a single connected region gets one label
    // Verified by skipping the left neighbor check
    #[test]
    fn test_single_region() {
        let labels = label_components(&grid(&["???", "???"])).unwrap();

        assert_eq!(labels.component_count(), 1);
        let first = labels.get(0, 0);
        assert_ne!(first, 0);
        assert!(labels.labels().iter().all(|&label| label == first));
    }

    // Tests separated regions get distinct labels
    // Verified by connecting diagonal neighbors
    #[test]
    fn test_diagonal_cells_are_separate() {
        let labels = label_components(&grid(&["?t", "t?"])).unwrap();

        assert_eq!(labels.component_count(), 2);
        assert_ne!(labels.get(0, 0), labels.get(1, 1));
        assert_eq!(labels.get(0, 1), 0);
        assert_eq!(labels.get(1, 0), 0);
    }

    // Tests a U-shaped region resolves to the absorbing set's first label
    // Verified by reversing the union argument order
    #[test]
    fn test_u_shape_merges_to_representative() {
        let labels = label_components(&grid(&["?t?", "???"])).unwrap();

        assert_eq!(labels.component_count(), 1);
        for (row, col) in [(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)] {
            assert_eq!(labels.get(row, col), 2, "cell ({row},{col})");
        }
        assert_eq!(labels.get(0, 1), 0);
    }

    // Tests out-of-bounds lookups read as unlabeled
    // Verified by indexing without bounds checks
    #[test]
    fn test_get_out_of_bounds() {
        let labels = label_components(&grid(&["?"])).unwrap();
        assert_eq!(labels.get(0, 0), 1);
        assert_eq!(labels.get(3, 3), 0);
    }

    // Tests labels are written into the grid and cleared elsewhere
    // Verified by leaving stale labels on decided cells
    #[test]
    fn test_apply_to_writes_cell_labels() {
        let mut grid = grid(&["?.?", "t??"]);
        grid.cell_mut(0, 1).unwrap().label = 9;

        let labels = label_components(&grid).unwrap();
        labels.apply_to(&mut grid);

        for cell in grid.cells() {
            assert_eq!(cell.label, labels.get(cell.row, cell.col));
        }
        assert_eq!(grid.cell(0, 1).unwrap().label, 0);
        assert_eq!(labels.component_count(), 2);
        assert_eq!(grid.cell(0, 2).unwrap().label, grid.cell(1, 1).unwrap().label);
        assert_ne!(grid.cell(0, 0).unwrap().label, grid.cell(0, 2).unwrap().label);
    }

    // Tests relabeling an unchanged grid gives the same map
    // Verified by carrying the label counter across calls
    #[test]
    fn test_labeling_is_repeatable() {
        let grid = grid(&["??t?", "t???", "??.?"]);

        let first = label_components(&grid).unwrap();
        let second = label_components(&grid).unwrap();
        assert_eq!(first, second);
    }
}
