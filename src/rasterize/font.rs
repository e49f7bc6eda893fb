//! Built-in monospace fonts for [`MonoFontRasterizer`](super::MonoFontRasterizer).

use embedded_graphics::mono_font::{
    MonoFont,
    ascii::{
        FONT_4X6, FONT_5X7, FONT_5X8, FONT_6X9, FONT_6X10, FONT_6X12, FONT_6X13, FONT_6X13_BOLD,
        FONT_7X13, FONT_7X13_BOLD, FONT_7X14, FONT_7X14_BOLD, FONT_8X13, FONT_8X13_BOLD,
        FONT_9X15, FONT_9X15_BOLD, FONT_9X18, FONT_9X18_BOLD, FONT_10X20,
    },
};

/// Font options for marquee text, named by glyph cell `width x height`.
///
/// The marquee renders at a working size and then downsamples rows to the panel
/// height, so a taller font gives smoother glyph shapes on tall panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarqueeFont {
    Font4x6,
    Font5x7,
    Font5x8,
    Font6x9,
    Font6x10,
    Font6x12,
    Font6x13,
    Font6x13Bold,
    Font7x13,
    Font7x13Bold,
    Font7x14,
    Font7x14Bold,
    Font8x13,
    Font8x13Bold,
    Font9x15,
    Font9x15Bold,
    Font9x18,
    Font9x18Bold,
    Font10x20,
}

impl MarqueeFont {
    /// Regular-weight fonts, shortest first. Used for size-based selection.
    pub const BY_HEIGHT: [Self; 12] = [
        Self::Font4x6,
        Self::Font5x7,
        Self::Font5x8,
        Self::Font6x9,
        Self::Font6x10,
        Self::Font6x12,
        Self::Font6x13,
        Self::Font8x13,
        Self::Font7x14,
        Self::Font9x15,
        Self::Font9x18,
        Self::Font10x20,
    ];

    /// Return the `MonoFont` for this variant.
    #[must_use]
    pub const fn to_font(self) -> MonoFont<'static> {
        match self {
            Self::Font4x6 => FONT_4X6,
            Self::Font5x7 => FONT_5X7,
            Self::Font5x8 => FONT_5X8,
            Self::Font6x9 => FONT_6X9,
            Self::Font6x10 => FONT_6X10,
            Self::Font6x12 => FONT_6X12,
            Self::Font6x13 => FONT_6X13,
            Self::Font6x13Bold => FONT_6X13_BOLD,
            Self::Font7x13 => FONT_7X13,
            Self::Font7x13Bold => FONT_7X13_BOLD,
            Self::Font7x14 => FONT_7X14,
            Self::Font7x14Bold => FONT_7X14_BOLD,
            Self::Font8x13 => FONT_8X13,
            Self::Font8x13Bold => FONT_8X13_BOLD,
            Self::Font9x15 => FONT_9X15,
            Self::Font9x15Bold => FONT_9X15_BOLD,
            Self::Font9x18 => FONT_9X18,
            Self::Font9x18Bold => FONT_9X18_BOLD,
            Self::Font10x20 => FONT_10X20,
        }
    }

    /// Glyph cell height in pixels.
    #[must_use]
    pub const fn pixel_height(self) -> u32 {
        self.to_font().character_size.height
    }

    /// Tallest regular font no taller than `pixel_height`, or the smallest font when
    /// none fits.
    #[must_use]
    pub fn for_pixel_height(pixel_height: u32) -> Self {
        Self::BY_HEIGHT
            .into_iter()
            .filter(|font| font.pixel_height() <= pixel_height)
            .max_by_key(|font| font.pixel_height())
            .unwrap_or(Self::Font4x6)
    }
}
