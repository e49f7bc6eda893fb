//! The boundary between the marquee core and whatever draws the LEDs.
//!
//! The core tells a [`RenderAdapter`] which cells are lit and in what color, then asks
//! it to present. Everything about how LEDs look (geometry, lighting, camera, decorative
//! motion) belongs to the adapter. Viewport changes reach the adapter through
//! [`RenderAdapter::on_resize`] and never touch the marquee's text, grid, or offset.

pub mod frame;

pub use frame::{Frame2d, FrameAdapter};
#[cfg(feature = "preview")]
pub use frame::PreviewRecorder;

use crate::{Result, color::RGB8, grid::LedGrid, host::Viewport};

/// Receives LED state from the marquee once per frame.
pub trait RenderAdapter {
    /// Set the state and display color of one cell.
    fn set_cell_state(&mut self, row: usize, col: usize, is_on: bool, color: RGB8);

    /// Show the cells set since the last call.
    ///
    /// # Errors
    ///
    /// Adapter-specific; an error ends [`Marquee::run`](crate::Marquee::run).
    fn present(&mut self) -> Result<()>;

    /// The host display area changed size.
    fn on_resize(&mut self, viewport: Viewport);

    /// Set every cell from `grid`: lit cells get `on_color`, unlit cells `off_color`.
    fn draw_grid<const W: usize, const H: usize>(
        &mut self,
        grid: &LedGrid<W, H>,
        on_color: RGB8,
        off_color: RGB8,
    ) {
        for (row, col, is_on) in grid.cells() {
            let color = if is_on { on_color } else { off_color };
            self.set_cell_state(row, col, is_on, color);
        }
    }
}

impl<R: RenderAdapter> RenderAdapter for &mut R {
    fn set_cell_state(&mut self, row: usize, col: usize, is_on: bool, color: RGB8) {
        (**self).set_cell_state(row, col, is_on, color);
    }

    fn present(&mut self) -> Result<()> {
        (**self).present()
    }

    fn on_resize(&mut self, viewport: Viewport) {
        (**self).on_resize(viewport);
    }

    fn draw_grid<const W: usize, const H: usize>(
        &mut self,
        grid: &LedGrid<W, H>,
        on_color: RGB8,
        off_color: RGB8,
    ) {
        (**self).draw_grid(grid, on_color, off_color);
    }
}
