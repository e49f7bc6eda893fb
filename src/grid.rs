//! Fixed-size on/off state of the panel's LEDs.

use crate::rasterize::Bitmap;

/// On/off state for a `W`×`H` panel, stored row-major as `[[bool; W]; H]`.
///
/// The grid is recomputed wholesale from the bitmap and scroll offset every frame; it
/// never grows or shrinks. `W` and `H` must both be at least 1, which is checked at
/// compile time.
///
/// Cell `(row, col)` is lit when `bitmap[row][col + floor(offset)]` exists and is lit.
/// Rows past the bitmap's height stay off; nothing wraps vertically.
///
/// ```rust
/// use led_marquee::{grid::LedGrid, rasterize::Bitmap};
///
/// let bitmap = Bitmap::from_rows(&[[true, false, true]]);
/// let grid = LedGrid::<4, 2>::recomputed(&bitmap, 0.0);
/// assert!(grid.is_on(0, 0));
/// assert!(!grid.is_on(0, 1));
/// assert!(grid.is_on(0, 2));
/// assert!(!grid.is_on(1, 0)); // below the bitmap
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedGrid<const W: usize, const H: usize>([[bool; W]; H]);

impl<const W: usize, const H: usize> LedGrid<W, H> {
    /// Grid width in cells (columns).
    pub const WIDTH: usize = W;
    /// Grid height in cells (rows).
    pub const HEIGHT: usize = H;
    /// Total number of cells (WIDTH × HEIGHT).
    pub const LEN: usize = W * H;

    const NON_EMPTY: () = assert!(W >= 1 && H >= 1, "panel width and height must be at least 1");

    /// Create a grid with every cell off.
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self([[false; W]; H])
    }

    /// Create a grid already recomputed from `bitmap` at `offset`.
    #[must_use]
    pub fn recomputed(bitmap: &Bitmap, offset: f32) -> Self {
        let mut grid = Self::new();
        grid.recompute(bitmap, offset);
        grid
    }

    /// Overwrite every cell from `bitmap` sampled at the horizontal `offset`.
    pub fn recompute(&mut self, bitmap: &Bitmap, offset: f32) {
        let shift = offset.floor() as i64;
        for (row_index, row) in self.0.iter_mut().enumerate() {
            for (col_index, cell) in row.iter_mut().enumerate() {
                let bitmap_col = col_index as i64 + shift;
                *cell = usize::try_from(bitmap_col)
                    .is_ok_and(|bitmap_col| bitmap.is_on(row_index, bitmap_col));
            }
        }
    }

    /// Whether the cell at `(row, col)` is lit; `false` outside the grid.
    #[must_use]
    pub fn is_on(&self, row: usize, col: usize) -> bool {
        self.0
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Number of lit cells.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.0.iter().flatten().filter(|&&cell| cell).count()
    }

    /// Iterate `(row, col, is_on)` for every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.0.iter().enumerate().flat_map(|(row_index, row)| {
            row.iter()
                .enumerate()
                .map(move |(col_index, &cell)| (row_index, col_index, cell))
        })
    }

    /// Borrow the rows.
    #[must_use]
    pub const fn rows(&self) -> &[[bool; W]; H] {
        &self.0
    }
}

impl<const W: usize, const H: usize> Default for LedGrid<W, H> {
    fn default() -> Self {
        Self::new()
    }
}
