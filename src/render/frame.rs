//! In-memory color frames and the adapters that fill them.

use core::ops::{Deref, DerefMut, Index, IndexMut};

use super::RenderAdapter;
use crate::{Result, color::RGB8, host::Viewport};
#[cfg(feature = "preview")]
use crate::to_png::{LedStyle, PreviewGeometry, write_frame_png, write_frames_apng};

/// A 2D array of RGB pixels representing one presented panel image.
///
/// Frames are stored in row-major order; `frame[(col, row)]` is the cell at column `col`
/// and row `row`, with `(0, 0)` at the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame2d<const W: usize, const H: usize>(pub [[RGB8; W]; H]);

impl<const W: usize, const H: usize> Frame2d<W, H> {
    /// Frame width in pixels (columns).
    pub const WIDTH: usize = W;
    /// Frame height in pixels (rows).
    pub const HEIGHT: usize = H;
    /// Total number of pixels (WIDTH × HEIGHT).
    pub const LEN: usize = W * H;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[RGB8::new(0, 0, 0); W]; H])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([[color; W]; H])
    }

    /// Number of pixels exactly matching `color`.
    #[must_use]
    pub fn count(&self, color: RGB8) -> usize {
        self.0.iter().flatten().filter(|&&pixel| pixel == color).count()
    }
}

impl<const W: usize, const H: usize> Deref for Frame2d<W, H> {
    type Target = [[RGB8; W]; H];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const W: usize, const H: usize> DerefMut for Frame2d<W, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const W: usize, const H: usize> Index<(usize, usize)> for Frame2d<W, H> {
    type Output = RGB8;

    fn index(&self, (x_index, y_index): (usize, usize)) -> &Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> IndexMut<(usize, usize)> for Frame2d<W, H> {
    fn index_mut(&mut self, (x_index, y_index): (usize, usize)) -> &mut Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &mut self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> From<[[RGB8; W]; H]> for Frame2d<W, H> {
    fn from(array: [[RGB8; W]; H]) -> Self {
        Self(array)
    }
}

impl<const W: usize, const H: usize> From<Frame2d<W, H>> for [[RGB8; W]; H] {
    fn from(frame: Frame2d<W, H>) -> Self {
        frame.0
    }
}

impl<const W: usize, const H: usize> Default for Frame2d<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

/// [`RenderAdapter`] that paints cells into a [`Frame2d`].
///
/// Cells are written to a pending frame; [`present`](RenderAdapter::present) copies it to
/// the presented frame, which is what a display (or a test) reads.
#[derive(Clone, Debug, Default)]
pub struct FrameAdapter<const W: usize, const H: usize> {
    pending: Frame2d<W, H>,
    presented: Frame2d<W, H>,
    present_count: u64,
    viewport: Viewport,
}

impl<const W: usize, const H: usize> FrameAdapter<W, H> {
    /// Create an adapter with blank frames and a zero-sized viewport.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Frame2d::new(),
            presented: Frame2d::new(),
            present_count: 0,
            viewport: Viewport::new(0, 0),
        }
    }

    /// The most recently presented frame.
    #[must_use]
    pub const fn presented(&self) -> &Frame2d<W, H> {
        &self.presented
    }

    /// How many frames have been presented.
    #[must_use]
    pub const fn present_count(&self) -> u64 {
        self.present_count
    }

    /// The latest viewport reported by the host.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl<const W: usize, const H: usize> RenderAdapter for FrameAdapter<W, H> {
    fn set_cell_state(&mut self, row: usize, col: usize, _is_on: bool, color: RGB8) {
        self.pending[(col, row)] = color;
    }

    fn present(&mut self) -> Result<()> {
        self.presented = self.pending;
        self.present_count = self.present_count.wrapping_add(1);
        log::trace!("frame adapter: presented frame {}", self.present_count);
        Ok(())
    }

    fn on_resize(&mut self, viewport: Viewport) {
        log::debug!(
            "frame adapter: viewport now {}x{}",
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
    }
}

/// [`RenderAdapter`] that records presented frames and writes them as LED-style images.
///
/// The LED style sets how large each LED is within its cell; the host viewport bounds the
/// image size.
#[cfg(feature = "preview")]
#[derive(Clone, Debug)]
pub struct PreviewRecorder<const W: usize, const H: usize> {
    frames: FrameAdapter<W, H>,
    recorded: Vec<Frame2d<W, H>>,
    max_frames: usize,
    style: LedStyle,
}

#[cfg(feature = "preview")]
impl<const W: usize, const H: usize> PreviewRecorder<W, H> {
    /// Record up to `max_frames` presented frames drawn in `style`.
    #[must_use]
    pub fn new(style: LedStyle, max_frames: usize) -> Self {
        Self {
            frames: FrameAdapter::new(),
            recorded: Vec::with_capacity(max_frames),
            max_frames,
            style,
        }
    }

    /// Frames recorded so far, oldest first.
    #[must_use]
    pub fn recorded(&self) -> &[Frame2d<W, H>] {
        &self.recorded
    }

    /// The underlying frame adapter.
    #[must_use]
    pub const fn frames(&self) -> &FrameAdapter<W, H> {
        &self.frames
    }

    /// Image geometry for the current viewport.
    #[must_use]
    pub fn geometry(&self) -> PreviewGeometry {
        PreviewGeometry::fit(W as u32, H as u32, self.style, self.frames.viewport())
    }

    /// Write the most recently presented frame as a PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or encoded.
    pub fn write_png(&self, output_path: impl AsRef<std::path::Path>) -> Result<()> {
        write_frame_png(self.frames.presented(), output_path, self.geometry())
    }

    /// Write the recorded frames as a looping APNG, `frame_delay_ms` per frame.
    ///
    /// With nothing recorded yet, the current (blank) frame is written alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or encoded.
    pub fn write_apng(
        &self,
        output_path: impl AsRef<std::path::Path>,
        frame_delay_ms: u16,
    ) -> Result<()> {
        if self.recorded.is_empty() {
            let blank = [*self.frames.presented()];
            return write_frames_apng(&blank, output_path, self.geometry(), frame_delay_ms);
        }
        write_frames_apng(&self.recorded, output_path, self.geometry(), frame_delay_ms)
    }
}

#[cfg(feature = "preview")]
impl<const W: usize, const H: usize> RenderAdapter for PreviewRecorder<W, H> {
    fn set_cell_state(&mut self, row: usize, col: usize, is_on: bool, color: RGB8) {
        self.frames.set_cell_state(row, col, is_on, color);
    }

    fn present(&mut self) -> Result<()> {
        self.frames.present()?;
        if self.recorded.len() < self.max_frames {
            self.recorded.push(*self.frames.presented());
        }
        Ok(())
    }

    fn on_resize(&mut self, viewport: Viewport) {
        self.frames.on_resize(viewport);
    }
}
