//! Tests for neighbor offset tables and bounds handling

#[cfg(test)]
mod tests {
    use tents::spatial::neighborhood::{
        ORTHOGONAL_OFFSETS, SURROUNDING_OFFSETS, neighbors, offset_position,
    };

    // Tests offsets that stay inside the grid
    // Verified by swapping row and column offsets
    #[test]
    fn test_offset_position_inside() {
        assert_eq!(offset_position(1, 1, [-1, 0], (3, 3)), Some((0, 1)));
        assert_eq!(offset_position(1, 1, [0, 1], (3, 3)), Some((1, 2)));
        assert_eq!(offset_position(1, 1, [1, -1], (3, 3)), Some((2, 0)));
    }

    // Tests offsets that leave the grid on every side
    // Verified by dropping the upper bound check
    #[test]
    fn test_offset_position_outside() {
        assert_eq!(offset_position(0, 0, [-1, 0], (3, 3)), None);
        assert_eq!(offset_position(0, 0, [0, -1], (3, 3)), None);
        assert_eq!(offset_position(2, 2, [1, 0], (3, 3)), None);
        assert_eq!(offset_position(2, 2, [0, 1], (3, 3)), None);
    }

    // Tests orthogonal neighbor order up, down, left, right
    // Verified by reordering the offset table
    #[test]
    fn test_orthogonal_order() {
        let found: Vec<_> = neighbors(1, 1, &ORTHOGONAL_OFFSETS, (3, 3)).collect();
        assert_eq!(found, vec![(0, 1), (2, 1), (1, 0), (1, 2)]);
    }

    // Tests that corner cells only see in-bounds neighbors
    // Verified by returning clamped positions instead of filtering
    #[test]
    fn test_corner_neighbors_are_clipped() {
        let orthogonal: Vec<_> = neighbors(0, 0, &ORTHOGONAL_OFFSETS, (2, 2)).collect();
        assert_eq!(orthogonal, vec![(1, 0), (0, 1)]);

        let surrounding: Vec<_> = neighbors(0, 0, &SURROUNDING_OFFSETS, (2, 2)).collect();
        assert_eq!(surrounding, vec![(0, 1), (1, 0), (1, 1)]);
    }

    // Tests that the surrounding table covers all eight cells exactly once
    // Verified by duplicating a diagonal offset
    #[test]
    fn test_surrounding_covers_ring() {
        let found: Vec<_> = neighbors(1, 1, &SURROUNDING_OFFSETS, (3, 3)).collect();
        assert_eq!(found.len(), 8);
        assert!(!found.contains(&(1, 1)));

        let mut unique = found.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 8);
    }

    // Tests a single-cell grid has no neighbors
    // Verified by allowing zero offsets
    #[test]
    fn test_single_cell_has_no_neighbors() {
        assert_eq!(neighbors(0, 0, &SURROUNDING_OFFSETS, (1, 1)).count(), 0);
    }
}
