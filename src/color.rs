//! LED colors and the cyclic palette applied to lit cells.

use heapless::Vec;

use crate::{Error, Result};

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use smart_leds::colors;

/// RGB color type used for LED cells.
pub use smart_leds::RGB8;

/// Maximum number of colors a [`Palette`] can hold.
pub const PALETTE_CAPACITY: usize = 16;

/// Default color for unlit cells: a very dark red, so the panel reads as "off" but present.
pub const OFF_COLOR_DEFAULT: RGB8 = RGB8::new(0x20, 0x00, 0x00);

/// Colors cycled through by [`Palette::default`], one step per scroll wrap.
pub const PALETTE_DEFAULT: [RGB8; 6] = [
    colors::RED,
    colors::ORANGE,
    colors::YELLOW,
    colors::LIME,
    colors::CYAN,
    colors::MAGENTA,
];

/// An ordered, cyclic, non-empty sequence of colors with a current index.
///
/// The index starts at `0` and only moves through [`Palette::advance`], which wraps
/// back to the first color after the last one.
///
/// ```rust
/// use led_marquee::color::{Palette, colors};
///
/// let mut palette = Palette::new(&[colors::RED, colors::BLUE])?;
/// assert_eq!(palette.current(), colors::RED);
/// palette.advance();
/// palette.advance();
/// assert_eq!(palette.index(), 0);
/// # Ok::<(), led_marquee::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<RGB8, PALETTE_CAPACITY>,
    index: usize,
}

impl Palette {
    /// Build a palette from a slice of colors.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPalette`] for an empty slice and [`Error::PaletteTooLarge`] when the
    /// slice holds more than [`PALETTE_CAPACITY`] colors.
    pub fn new(colors: &[RGB8]) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        let colors = Vec::from_slice(colors).map_err(|()| Error::PaletteTooLarge {
            len: colors.len(),
        })?;
        Ok(Self { colors, index: 0 })
    }

    /// Color applied to lit cells right now.
    #[must_use]
    pub fn current(&self) -> RGB8 {
        // `index < len` and `len >= 1` hold for every constructed palette.
        self.colors
            .get(self.index)
            .copied()
            .unwrap_or(colors::WHITE)
    }

    /// Position of the current color.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of colors in the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; palettes are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The colors, in cycle order.
    #[must_use]
    pub fn colors(&self) -> &[RGB8] {
        &self.colors
    }

    /// Step to the next color, wrapping to the first after the last.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.colors.len();
    }
}

impl Default for Palette {
    fn default() -> Self {
        // PALETTE_DEFAULT is shorter than PALETTE_CAPACITY, so the fallback never applies.
        let colors = Vec::from_slice(&PALETTE_DEFAULT)
            .unwrap_or_else(|()| Vec::from_iter([colors::WHITE]));
        Self { colors, index: 0 }
    }
}
