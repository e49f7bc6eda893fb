//! Marquee construction options and their defaults.

use embassy_time::Duration;

use crate::{
    Error, Result,
    color::{OFF_COLOR_DEFAULT, Palette, RGB8},
    rasterize::MarqueeFont,
};

/// Text shown until [`Marquee::set_text`](crate::Marquee::set_text) replaces it.
pub const TEXT_DEFAULT: &str = "Hello, world!";
/// Panel columns used by [`DefaultMarquee`](crate::DefaultMarquee).
pub const PANEL_WIDTH_DEFAULT: usize = 80;
/// Panel rows used by [`DefaultMarquee`](crate::DefaultMarquee).
pub const PANEL_HEIGHT_DEFAULT: usize = 10;
/// LED diameter in panel units (rendering only).
pub const LED_DIAMETER_DEFAULT: f32 = 0.8;
/// Gap between neighboring LEDs in panel units (rendering only).
pub const LED_SPACING_DEFAULT: f32 = 0.2;
/// Bitmap columns scrolled per frame.
pub const SCROLL_SPEED_DEFAULT: f32 = 0.4;
/// Frame period for clocks that pace themselves, about 60 Hz.
pub const FRAME_DURATION_DEFAULT: Duration = Duration::from_millis(16);

/// Options for building a [`Marquee`](crate::Marquee).
///
/// Panel width and height are the marquee's const parameters; everything else lives
/// here. Start from [`MarqueeConfig::new`] and override with the `with_*` setters:
///
/// ```rust
/// use led_marquee::{MarqueeConfig, color::colors};
///
/// let config = MarqueeConfig::new("banner")
///     .with_text("Rust")
///     .with_scroll_speed(0.25)
///     .with_off_color(colors::BLACK);
/// assert_eq!(config.text(), "Rust");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct MarqueeConfig {
    container_id: String,
    text: String,
    led_diameter: f32,
    led_spacing: f32,
    off_color: RGB8,
    scroll_speed: f32,
    palette: Palette,
    font: Option<MarqueeFont>,
    frame_duration: Duration,
}

impl MarqueeConfig {
    /// Defaults for a marquee hosted in the container named `container_id`.
    #[must_use]
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            text: TEXT_DEFAULT.to_owned(),
            led_diameter: LED_DIAMETER_DEFAULT,
            led_spacing: LED_SPACING_DEFAULT,
            off_color: OFF_COLOR_DEFAULT,
            scroll_speed: SCROLL_SPEED_DEFAULT,
            palette: Palette::default(),
            font: None,
            frame_duration: FRAME_DURATION_DEFAULT,
        }
    }

    /// Set the initial text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set LED diameter and spacing, in panel units.
    #[must_use]
    pub fn with_led_geometry(mut self, led_diameter: f32, led_spacing: f32) -> Self {
        self.led_diameter = led_diameter;
        self.led_spacing = led_spacing;
        self
    }

    /// Set the color of unlit cells.
    #[must_use]
    pub fn with_off_color(mut self, off_color: RGB8) -> Self {
        self.off_color = off_color;
        self
    }

    /// Set the per-frame scroll step.
    #[must_use]
    pub fn with_scroll_speed(mut self, scroll_speed: f32) -> Self {
        self.scroll_speed = scroll_speed;
        self
    }

    /// Set the palette cycled on each scroll wrap.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Always rasterize with `font` instead of picking one by size.
    #[must_use]
    pub fn with_font(mut self, font: MarqueeFont) -> Self {
        self.font = Some(font);
        self
    }

    /// Set the frame period used by self-paced clocks.
    #[must_use]
    pub fn with_frame_duration(mut self, frame_duration: Duration) -> Self {
        self.frame_duration = frame_duration;
        self
    }

    /// Check values that would break scrolling or LED drawing.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidScrollSpeed`] for a non-finite or non-positive speed and
    /// [`Error::InvalidLedGeometry`] for a non-finite or non-positive diameter or a
    /// negative or non-finite spacing.
    pub fn validate(&self) -> Result<()> {
        if !self.scroll_speed.is_finite() || self.scroll_speed <= 0.0 {
            return Err(Error::InvalidScrollSpeed {
                speed: self.scroll_speed,
            });
        }
        if !self.led_diameter.is_finite()
            || self.led_diameter <= 0.0
            || !self.led_spacing.is_finite()
            || self.led_spacing < 0.0
        {
            return Err(Error::InvalidLedGeometry);
        }
        Ok(())
    }

    /// Id of the host container the marquee attaches to.
    #[must_use]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Initial text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// LED diameter in panel units.
    #[must_use]
    pub const fn led_diameter(&self) -> f32 {
        self.led_diameter
    }

    /// Gap between LEDs in panel units.
    #[must_use]
    pub const fn led_spacing(&self) -> f32 {
        self.led_spacing
    }

    /// Color of unlit cells.
    #[must_use]
    pub const fn off_color(&self) -> RGB8 {
        self.off_color
    }

    /// Per-frame scroll step.
    #[must_use]
    pub const fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    /// Palette cycled on each wrap.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Fixed font, if one was chosen.
    #[must_use]
    pub const fn font(&self) -> Option<MarqueeFont> {
        self.font
    }

    /// Frame period for self-paced clocks.
    #[must_use]
    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}
