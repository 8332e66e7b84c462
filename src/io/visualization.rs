//! Frame capture and GIF generation for solve visualization

use crate::io::configuration::{
    CELL_PIXELS, FINAL_FRAME_HOLD, GRASS_COLOR, MATCHED_TREE_COLOR, TENT_COLOR, TREE_COLOR,
    UNDECIDED_COLOR, VIEWER_MIN_FRAME_DELAY_MS,
};
use crate::io::error::{PuzzleError, Result};
use crate::spatial::cell::CellView;
use image::{Frame, Rgba, RgbaImage};
use ndarray::Array2;

/// Grid state after one solve-loop iteration
#[derive(Debug, Clone)]
pub struct SolveFrame {
    /// Iteration that produced the state (0 for the input grid)
    pub iteration: usize,
    /// Cell views at that point
    pub views: Array2<CellView>,
}

/// Captures grid states for visualization
///
/// Records one frame per iteration so the deduction can be replayed as an
/// animation after the solve.
#[derive(Debug, Clone)]
pub struct VisualizationCapture {
    pub(crate) frames: Vec<SolveFrame>,
    dimensions: (usize, usize),
}

/// Palette color for a cell view
pub const fn view_color(view: CellView) -> [u8; 4] {
    match view {
        CellView::Grass => GRASS_COLOR,
        CellView::Tent => TENT_COLOR,
        CellView::Tree => TREE_COLOR,
        CellView::MatchedTree => MATCHED_TREE_COLOR,
        CellView::Undecided => UNDECIDED_COLOR,
    }
}

impl VisualizationCapture {
    /// Create an empty capture for a `rows` x `cols` grid
    pub fn new(rows: usize, cols: usize, max_frames: usize) -> Self {
        Self {
            frames: Vec::with_capacity(max_frames),
            dimensions: (rows, cols),
        }
    }

    /// Records the grid state reached at `iteration`
    ///
    /// Frames whose dimensions differ from the capture's are ignored.
    pub fn record_frame(&mut self, views: Array2<CellView>, iteration: usize) {
        if views.dim() == self.dimensions {
            self.frames.push(SolveFrame { iteration, views });
        }
    }

    /// Returns all recorded frames
    pub fn frames(&self) -> &[SolveFrame] {
        &self.frames
    }

    /// Returns the total number of recorded frames
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// Delays shorter than viewers honour are stretched by keeping every
    /// n-th frame, preserving the apparent animation speed. The last frame
    /// is always kept and held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &str, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(PuzzleError::InvalidParameter {
                parameter: "visualization",
                value: output_path.to_string(),
                reason: "No frames captured for visualization".to_string(),
            });
        }

        let skip_factor = if frame_delay_ms > 0 && frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms)
        } else {
            1
        };
        let effective_delay_ms = frame_delay_ms.max(1) * skip_factor;

        let frames = self.generate_frames(effective_delay_ms, skip_factor as usize);

        if let Some(parent) = std::path::Path::new(output_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| PuzzleError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| PuzzleError::FileSystem {
            path: output_path.into(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| PuzzleError::ImageExport {
                path: output_path.into(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let last = self.frames.len().saturating_sub(1);

        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .enumerate()
            .filter(|(index, _)| index % skip_factor == 0 || *index == last)
            .map(|(_, frame)| Self::render_frame(&frame.views, delay_ms))
            .collect();

        if let Some(final_image) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                final_image,
                0,
                0,
                image::Delay::from_numer_denom_ms(delay_ms * FINAL_FRAME_HOLD, 1),
            ));
        }

        frames
    }

    /// Render one grid state, `CELL_PIXELS` pixels per cell
    pub fn render_image(views: &Array2<CellView>) -> RgbaImage {
        let (rows, cols) = views.dim();
        RgbaImage::from_fn(
            cols as u32 * CELL_PIXELS,
            rows as u32 * CELL_PIXELS,
            |x, y| {
                let row = (y / CELL_PIXELS) as usize;
                let col = (x / CELL_PIXELS) as usize;
                let view = views.get([row, col]).copied().unwrap_or(CellView::Undecided);

                // One-pixel seam so neighboring cells stay distinguishable
                if x % CELL_PIXELS == 0 || y % CELL_PIXELS == 0 {
                    Rgba([40, 40, 40, 255])
                } else {
                    Rgba(view_color(view))
                }
            },
        )
    }

    fn render_frame(views: &Array2<CellView>, delay_ms: u32) -> Frame {
        Frame::from_parts(
            Self::render_image(views),
            0,
            0,
            image::Delay::from_numer_denom_ms(delay_ms, 1),
        )
    }
}
