//! Tests for cell kinds, markers and views

#[cfg(test)]
mod tests {
    use tents::spatial::cell::{Cell, CellKind, CellView};

    // Tests that only the tree marker parses to a tree
    // Verified by treating the tent marker as a tent
    #[test]
    fn test_from_marker_only_recognizes_trees() {
        assert_eq!(CellKind::from_marker("t"), CellKind::Tree);
        assert_eq!(CellKind::from_marker("T"), CellKind::Undecided);
        assert_eq!(CellKind::from_marker(" "), CellKind::Undecided);
        assert_eq!(CellKind::from_marker(""), CellKind::Undecided);
        assert_eq!(CellKind::from_marker("x"), CellKind::Undecided);
    }

    // Tests the solution marker for every kind
    // Verified by swapping grass and undecided markers
    #[test]
    fn test_kind_markers() {
        assert_eq!(CellKind::Grass.marker(), " ");
        assert_eq!(CellKind::Tent.marker(), "T");
        assert_eq!(CellKind::Tree.marker(), "t");
        assert_eq!(CellKind::Undecided.marker(), "?");
    }

    // Tests new cells start unmatched and unlabeled
    // Verified by initializing label to 1
    #[test]
    fn test_new_cell_defaults() {
        let cell = Cell::new(2, 3, CellKind::Tree);

        assert_eq!(cell.row, 2);
        assert_eq!(cell.col, 3);
        assert_eq!(cell.kind, CellKind::Tree);
        assert!(!cell.matched);
        assert_eq!(cell.label, 0);
    }

    // Tests that the matched flag only changes the view of trees
    // Verified by ignoring the matched flag in view
    #[test]
    fn test_view_distinguishes_matched_trees() {
        let mut tree = Cell::new(0, 0, CellKind::Tree);
        assert_eq!(tree.view(), CellView::Tree);

        tree.matched = true;
        assert_eq!(tree.view(), CellView::MatchedTree);

        let mut tent = Cell::new(0, 1, CellKind::Tent);
        tent.matched = true;
        assert_eq!(tent.view(), CellView::Tent);

        assert_eq!(Cell::new(1, 0, CellKind::Grass).view(), CellView::Grass);
        assert_eq!(
            Cell::new(1, 1, CellKind::Undecided).view(),
            CellView::Undecided
        );
    }

    // Tests that both tree views write the same marker
    // Verified by giving matched trees their own marker
    #[test]
    fn test_view_markers_merge_tree_states() {
        assert_eq!(CellView::Tree.marker(), "t");
        assert_eq!(CellView::MatchedTree.marker(), "t");
        assert_eq!(CellView::Tent.marker(), "T");
        assert_eq!(CellView::Grass.marker(), " ");
        assert_eq!(CellView::Undecided.marker(), "?");
    }

    // Tests that only undecided cells report as undecided
    // Verified by including grass in is_undecided
    #[test]
    fn test_is_undecided() {
        assert!(CellKind::Undecided.is_undecided());
        assert!(!CellKind::Grass.is_undecided());
        assert!(!CellKind::Tent.is_undecided());
        assert!(!CellKind::Tree.is_undecided());
    }
}
