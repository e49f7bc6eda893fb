//! Text to boolean bitmap conversion.
//!
//! Glyph drawing is delegated to a [`TextRasterizer`] service that returns raw
//! brightness per pixel. [`rasterize`] thresholds that buffer and, when the glyphs come
//! out taller than the panel, keeps a nearest-neighbor selection of rows. Widths are
//! never resampled: one bitmap column is one panel column.

pub mod font;

pub use font::MarqueeFont;

use core::convert::Infallible;
use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::{Gray8, GrayColor},
    prelude::*,
    text::{Baseline, Text},
};

/// Pixel height the core asks the rasterizer service for.
pub const WORKING_FONT_SIZE: u32 = 20;

/// Brightness at or above this value counts as a lit pixel.
pub const BRIGHTNESS_THRESHOLD: u8 = 128;

/// Raw grayscale output of a [`TextRasterizer`], one brightness byte per pixel in
/// row-major order.
///
/// Implements [`DrawTarget`] so `embedded-graphics` can draw into it directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    brightness: Vec<u8>,
}

impl PixelBuffer {
    /// Create an all-black buffer.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            brightness: vec![0; width * height],
        }
    }

    /// Build a buffer from rows of brightness values.
    ///
    /// # Panics
    ///
    /// Panics if rows differ in length.
    #[must_use]
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut brightness = Vec::with_capacity(width * rows.len());
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), width, "all pixel rows must have equal width");
            brightness.extend_from_slice(row);
        }
        Self {
            width,
            height: rows.len(),
            brightness,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Brightness at `(row, col)`; `0` outside the buffer.
    #[must_use]
    pub fn brightness(&self, row: usize, col: usize) -> u8 {
        if row >= self.height || col >= self.width {
            return 0;
        }
        self.brightness
            .get(row * self.width + col)
            .copied()
            .unwrap_or(0)
    }
}

impl OriginDimensions for PixelBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for PixelBuffer {
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x < 0 || coord.y < 0 {
                continue;
            }
            let (x_index, y_index) = (coord.x as usize, coord.y as usize);
            if x_index < self.width && y_index < self.height {
                if let Some(slot) = self.brightness.get_mut(y_index * self.width + x_index) {
                    *slot = color.luma();
                }
            }
        }
        Ok(())
    }
}

/// Text rasterization service: draws glyphs and reports brightness per pixel.
///
/// The marquee thresholds the result itself, so implementations may antialias.
pub trait TextRasterizer {
    /// Render `text` with glyphs about `font_size` pixels tall.
    fn render(&self, text: &str, font_size: u32) -> PixelBuffer;
}

/// [`TextRasterizer`] backed by `embedded-graphics` monospace fonts.
///
/// Without a fixed font, the tallest built-in font that fits the requested size is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonoFontRasterizer {
    font: Option<MarqueeFont>,
}

impl MonoFontRasterizer {
    /// Rasterizer that picks a font per requested size.
    #[must_use]
    pub const fn new() -> Self {
        Self { font: None }
    }

    /// Rasterizer that always uses `font`, whatever size is requested.
    #[must_use]
    pub const fn with_font(font: MarqueeFont) -> Self {
        Self { font: Some(font) }
    }

    /// Font used for a request of `font_size` pixels.
    #[must_use]
    pub fn font_for(&self, font_size: u32) -> MarqueeFont {
        self.font
            .unwrap_or_else(|| MarqueeFont::for_pixel_height(font_size))
    }
}

impl TextRasterizer for MonoFontRasterizer {
    fn render(&self, text: &str, font_size: u32) -> PixelBuffer {
        let font = self.font_for(font_size).to_font();
        let glyph_width = font.character_size.width as usize;
        let advance_x = glyph_width + font.character_spacing as usize;
        let glyph_count = text.chars().count();
        let width = (glyph_count * advance_x).saturating_sub(font.character_spacing as usize);
        let height = font.character_size.height as usize;
        let mut buffer = PixelBuffer::new(width, height);

        for (glyph_index, ch) in text.chars().enumerate() {
            let mut buf = [0u8; 4];
            let slice = ch.encode_utf8(&mut buf);
            let style = MonoTextStyle::new(&font, Gray8::WHITE);
            let position = Point::new((glyph_index * advance_x) as i32, 0);
            let Ok(_) =
                Text::with_baseline(slice, position, style, Baseline::Top).draw(&mut buffer);
        }

        buffer
    }
}

/// Thresholded, fixed-height boolean image of the current text.
///
/// Rows all share one width, which is at least 1. A bitmap is replaced wholesale when the
/// text changes and never edited in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Bitmap {
    /// Build a bitmap from rows of on/off pixels.
    ///
    /// Zero-width rows are widened to one unlit column.
    ///
    /// # Panics
    ///
    /// Panics if rows differ in length.
    #[must_use]
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let natural_width = rows.first().map_or(0, |row| row.as_ref().len());
        let width = natural_width.max(1);
        let mut pixels = Vec::with_capacity(width * rows.len());
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), natural_width, "all bitmap rows must have equal width");
            pixels.extend_from_slice(row);
            pixels.resize(pixels.len() + (width - natural_width), false);
        }
        Self {
            width,
            height: rows.len(),
            pixels,
        }
    }

    /// Width in pixels (always at least 1).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether `(row, col)` is lit; `false` outside the bitmap.
    #[must_use]
    pub fn is_on(&self, row: usize, col: usize) -> bool {
        row < self.height
            && col < self.width
            && self
                .pixels
                .get(row * self.width + col)
                .copied()
                .unwrap_or(false)
    }

    /// Number of lit pixels.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&pixel| pixel).count()
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks_exact(self.width)
    }
}

/// Convert `text` into a bitmap at most `target_height` rows tall.
///
/// The service renders at [`WORKING_FONT_SIZE`]. When that comes out taller than
/// `target_height`, output row `y` samples source row `floor(y / scale)` with
/// `scale = target_height / natural_height`. Shorter renders keep their natural height.
///
/// # Panics
///
/// Panics if `target_height` is zero.
#[must_use]
pub fn rasterize(service: &impl TextRasterizer, text: &str, target_height: usize) -> Bitmap {
    assert!(target_height >= 1, "target_height must be at least 1");
    let buffer = service.render(text, WORKING_FONT_SIZE);
    threshold(&buffer, target_height)
}

/// Threshold a pixel buffer into a bitmap, downsampling rows to `target_height`.
///
/// # Panics
///
/// Panics if `target_height` is zero.
#[must_use]
pub fn threshold(buffer: &PixelBuffer, target_height: usize) -> Bitmap {
    assert!(target_height >= 1, "target_height must be at least 1");
    let natural_height = buffer.height();
    let rows: Vec<Vec<bool>> = if natural_height > target_height {
        // floor(row / (target / natural)), exact in integers.
        (0..target_height)
            .map(|row| {
                let source_row = (row * natural_height / target_height).min(natural_height - 1);
                threshold_row(buffer, source_row)
            })
            .collect()
    } else {
        (0..natural_height)
            .map(|row| threshold_row(buffer, row))
            .collect()
    };

    if rows.is_empty() {
        return Bitmap {
            width: buffer.width().max(1),
            height: 0,
            pixels: Vec::new(),
        };
    }
    Bitmap::from_rows(&rows)
}

fn threshold_row(buffer: &PixelBuffer, row: usize) -> Vec<bool> {
    (0..buffer.width())
        .map(|col| buffer.brightness(row, col) >= BRIGHTNESS_THRESHOLD)
        .collect()
}
