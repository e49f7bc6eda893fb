//! Scroll offset and palette cycling.

use crate::color::{Palette, RGB8};

/// What a [`ScrollController::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The offset moved forward by one step.
    Advanced,
    /// The text left the panel: the offset restarted at `-panel_width` and the palette
    /// moved to its next color.
    Wrapped,
}

/// Moves the text across the panel and cycles the palette once per pass.
///
/// The offset starts at `-panel_width` (text fully off the right edge) and grows by
/// `speed` each tick. Once it reaches `bitmap_width + panel_width` the text has fully
/// left the panel, so the offset restarts at `-panel_width` and the palette advances.
/// There is no paused state.
///
/// A `speed` at or above `panel_width` can carry the offset past the wrap bound in one
/// step; the wrap still happens on that tick, but intermediate positions are skipped.
#[derive(Clone, Debug)]
pub struct ScrollController {
    offset: f32,
    speed: f32,
    panel_width: usize,
    bitmap_width: usize,
    palette: Palette,
}

impl ScrollController {
    /// Start a controller with the text fully off-screen.
    #[must_use]
    pub fn new(panel_width: usize, bitmap_width: usize, speed: f32, palette: Palette) -> Self {
        Self {
            offset: -(panel_width as f32),
            speed,
            panel_width,
            bitmap_width: bitmap_width.max(1),
            palette,
        }
    }

    /// Advance one frame.
    pub fn tick(&mut self) -> Tick {
        self.offset += self.speed;
        if self.offset >= self.wrap_bound() {
            self.offset = self.start_offset();
            self.palette.advance();
            log::debug!(
                "scroll: wrapped, palette index now {}",
                self.palette.index()
            );
            Tick::Wrapped
        } else {
            Tick::Advanced
        }
    }

    /// Restart for a new bitmap width, keeping the current palette color.
    pub fn restart(&mut self, bitmap_width: usize) {
        self.bitmap_width = bitmap_width.max(1);
        self.offset = self.start_offset();
    }

    /// Current horizontal offset, in bitmap pixels.
    #[must_use]
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    /// Step added each tick.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Width of the bitmap being scrolled.
    #[must_use]
    pub const fn bitmap_width(&self) -> usize {
        self.bitmap_width
    }

    /// Index of the active palette color.
    #[must_use]
    pub const fn color_index(&self) -> usize {
        self.palette.index()
    }

    /// Color for lit cells this frame.
    #[must_use]
    pub fn active_color(&self) -> RGB8 {
        self.palette.current()
    }

    /// The palette being cycled.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Offset at which the text has fully scrolled off the left edge.
    #[must_use]
    pub fn wrap_bound(&self) -> f32 {
        (self.bitmap_width + self.panel_width) as f32
    }

    fn start_offset(&self) -> f32 {
        -(self.panel_width as f32)
    }
}
