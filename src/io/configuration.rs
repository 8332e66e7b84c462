//! Solver constants and runtime configuration defaults

// Marker alphabet shared by puzzle input and solution output
/// Marker for a tree
pub const TREE_MARKER: &str = "t";
/// Marker for a tent
pub const TENT_MARKER: &str = "T";
/// Marker for grass
pub const GRASS_MARKER: &str = " ";
/// Marker for a cell the solver could not decide
pub const UNDECIDED_MARKER: &str = "?";

// Guards against non-terminating runs on puzzles the rules cannot finish
/// Default maximum solve-loop iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_solution";
/// Extension of puzzle input files
pub const PUZZLE_EXTENSION: &str = "json";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 400;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;
/// Final frame is held for this many frame delays
pub const FINAL_FRAME_HOLD: u32 = 5;
/// Edge length of one grid cell in rendered frames, in pixels
pub const CELL_PIXELS: u32 = 16;

// Frame palette (RGBA)
/// Grass color
pub const GRASS_COLOR: [u8; 4] = [124, 200, 92, 255];
/// Tent color
pub const TENT_COLOR: [u8; 4] = [230, 126, 34, 255];
/// Unmatched tree color
pub const TREE_COLOR: [u8; 4] = [30, 110, 50, 255];
/// Matched tree color
pub const MATCHED_TREE_COLOR: [u8; 4] = [16, 70, 30, 255];
/// Undecided cell color
pub const UNDECIDED_COLOR: [u8; 4] = [190, 190, 190, 255];
