//! Tests for solver constants

#[cfg(test)]
mod tests {
    use tents::io::configuration::{
        CELL_PIXELS, DEFAULT_MAX_ITERATIONS, GIF_FRAME_DELAY_MS, GRASS_COLOR, GRASS_MARKER,
        MATCHED_TREE_COLOR, OUTPUT_SUFFIX, PUZZLE_EXTENSION, TENT_COLOR, TENT_MARKER, TREE_COLOR,
        TREE_MARKER, UNDECIDED_COLOR, UNDECIDED_MARKER, VIEWER_MIN_FRAME_DELAY_MS,
    };

    // Tests the marker alphabet is distinct
    // Verified by reusing the grass marker for undecided cells
    #[test]
    fn test_markers_are_distinct() {
        let markers = [TREE_MARKER, TENT_MARKER, GRASS_MARKER, UNDECIDED_MARKER];
        for (i, a) in markers.iter().enumerate() {
            for b in markers.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert_eq!(TREE_MARKER, "t");
        assert_eq!(TENT_MARKER, "T");
    }

    // Tests default iteration cap
    // Verified by changing constant value
    #[test]
    fn test_default_max_iterations() {
        assert_eq!(DEFAULT_MAX_ITERATIONS, 1000);
    }

    // Tests output naming constants
    // Verified by changing the suffix
    #[test]
    fn test_output_naming() {
        assert_eq!(OUTPUT_SUFFIX, "_solution");
        assert_eq!(PUZZLE_EXTENSION, "json");
    }

    // Tests GIF timing stays above the viewer minimum
    // Verified by lowering the frame delay below the minimum
    #[test]
    fn test_gif_timing() {
        assert!(GIF_FRAME_DELAY_MS >= VIEWER_MIN_FRAME_DELAY_MS);
        assert!(CELL_PIXELS > 1);
    }

    // Tests every cell view gets its own opaque color
    // Verified by sharing the tree color with matched trees
    #[test]
    fn test_palette_is_distinct() {
        let colors = [
            GRASS_COLOR,
            TENT_COLOR,
            TREE_COLOR,
            MATCHED_TREE_COLOR,
            UNDECIDED_COLOR,
        ];
        for (i, a) in colors.iter().enumerate() {
            assert_eq!(a[3], 255);
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
