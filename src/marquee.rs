//! The marquee: one owned state object per banner, advanced once per frame.

use core::convert::Infallible;

use crate::{
    Error, MarqueeConfig, Result,
    color::RGB8,
    config::{PANEL_HEIGHT_DEFAULT, PANEL_WIDTH_DEFAULT},
    grid::LedGrid,
    host::{Container, FrameClock, Host, ResizeSubscription},
    rasterize::{Bitmap, MonoFontRasterizer, TextRasterizer, rasterize},
    render::RenderAdapter,
    scroll::ScrollController,
};

/// A marquee with the default 80×10 panel.
pub type DefaultMarquee<R> = Marquee<PANEL_WIDTH_DEFAULT, PANEL_HEIGHT_DEFAULT, R>;

/// A scrolling LED-matrix banner on a `W`×`H` panel.
///
/// Owns the text bitmap, the LED grid, the scroll and palette state, the render
/// adapter, and its resize subscription. Each [`on_frame`](Self::on_frame) runs, in
/// order:
///
/// 1. the scroll tick (which may wrap and advance the palette),
/// 2. the LED grid recompute,
/// 3. the hand-off of grid and active color to the adapter, then `present()`.
///
/// A resize reported by the host since the previous frame is passed to the adapter
/// before those steps; it never changes the bitmap, grid, or offset.
///
/// ```rust
/// use led_marquee::{
///     Marquee, MarqueeConfig,
///     host::{HeadlessHost, Viewport},
///     render::FrameAdapter,
/// };
///
/// let host = HeadlessHost::new().with_container("banner", Viewport::new(800, 100));
/// let config = MarqueeConfig::new("banner").with_text("Hi");
/// let mut marquee = Marquee::<40, 8, _>::create(&host, config, FrameAdapter::<40, 8>::new())
///     .expect("container exists");
/// marquee.on_frame()?;
/// assert_eq!(marquee.adapter().present_count(), 1);
/// # Ok::<(), led_marquee::Error>(())
/// ```
pub struct Marquee<const W: usize, const H: usize, R, T = MonoFontRasterizer> {
    text: String,
    bitmap: Bitmap,
    grid: LedGrid<W, H>,
    scroll: ScrollController,
    off_color: RGB8,
    rasterizer: T,
    adapter: R,
    container: Container,
    resize: ResizeSubscription,
}

impl<const W: usize, const H: usize, R: RenderAdapter> Marquee<W, H, R, MonoFontRasterizer> {
    /// Build a marquee in the host container named by `config`.
    ///
    /// Returns `None`, after logging the reason, if the container does not exist or the
    /// configuration is invalid. Use [`Self::try_new`] to get the error instead.
    #[must_use]
    pub fn create(host: &impl Host, config: MarqueeConfig, adapter: R) -> Option<Self> {
        let rasterizer = config
            .font()
            .map_or_else(MonoFontRasterizer::new, MonoFontRasterizer::with_font);
        Self::create_with_rasterizer(host, config, adapter, rasterizer)
    }
}

impl<const W: usize, const H: usize, R: RenderAdapter, T: TextRasterizer> Marquee<W, H, R, T> {
    /// Like [`Self::create`], with a caller-supplied text rasterizer.
    #[must_use]
    pub fn create_with_rasterizer(
        host: &impl Host,
        config: MarqueeConfig,
        adapter: R,
        rasterizer: T,
    ) -> Option<Self> {
        match Self::try_new(host, config, adapter, rasterizer) {
            Ok(marquee) => Some(marquee),
            Err(err) => {
                log::error!("marquee: not created: {err}");
                None
            }
        }
    }

    /// Build a marquee, reporting why construction failed.
    ///
    /// The adapter receives the container's size before the first frame. The text is
    /// rasterized once here and again only on [`Self::set_text`].
    ///
    /// # Errors
    ///
    /// [`Error::MissingContainer`](crate::Error::MissingContainer) if the host has no
    /// container with the configured id, or the error from
    /// [`MarqueeConfig::validate`].
    pub fn try_new(
        host: &impl Host,
        config: MarqueeConfig,
        mut adapter: R,
        rasterizer: T,
    ) -> Result<Self> {
        config.validate()?;
        let container = host.container(config.container_id()).ok_or_else(|| {
            Error::MissingContainer {
                container_id: config.container_id().to_owned(),
            }
        })?;
        if config.scroll_speed() >= W as f32 {
            log::warn!(
                "marquee: scroll speed {} is not below panel width {}; positions will be skipped",
                config.scroll_speed(),
                W
            );
        }

        adapter.on_resize(container.viewport);
        let resize = host.subscribe_resize();

        let bitmap = rasterize(&rasterizer, config.text(), H);
        let scroll = ScrollController::new(
            W,
            bitmap.width(),
            config.scroll_speed(),
            config.palette().clone(),
        );
        let grid = LedGrid::recomputed(&bitmap, scroll.offset());
        log::info!(
            "marquee: {}x{} panel in container {:?}, bitmap {}x{}",
            W,
            H,
            container.id,
            bitmap.width(),
            bitmap.height()
        );

        Ok(Self {
            text: config.text().to_owned(),
            bitmap,
            grid,
            scroll,
            off_color: config.off_color(),
            rasterizer,
            adapter,
            container,
            resize,
        })
    }

    /// Replace the text.
    ///
    /// Rasterizes `text`, restarts scrolling with the text fully off-screen, and keeps
    /// the current palette color.
    pub fn set_text(&mut self, text: &str) {
        self.bitmap = rasterize(&self.rasterizer, text, H);
        self.scroll.restart(self.bitmap.width());
        self.grid.recompute(&self.bitmap, self.scroll.offset());
        text.clone_into(&mut self.text);
        log::info!(
            "marquee: text set to {:?}, bitmap {}x{}",
            self.text,
            self.bitmap.width(),
            self.bitmap.height()
        );
    }

    /// Run one frame: scroll, recompute, hand off, present.
    ///
    /// # Errors
    ///
    /// Whatever the adapter's `present()` reports.
    pub fn on_frame(&mut self) -> Result<()> {
        if let Some(viewport) = self.resize.try_take() {
            log::debug!(
                "marquee: container {:?} resized to {}x{}",
                self.container.id,
                viewport.width,
                viewport.height
            );
            self.container.viewport = viewport;
            self.adapter.on_resize(viewport);
        }

        self.scroll.tick();
        self.grid.recompute(&self.bitmap, self.scroll.offset());
        self.adapter
            .draw_grid(&self.grid, self.scroll.active_color(), self.off_color);
        log::trace!(
            "marquee: frame at offset {}, {} cells lit",
            self.scroll.offset(),
            self.grid.lit_count()
        );
        self.adapter.present()
    }

    /// Drive frames from `clock` until it or the adapter reports an error.
    ///
    /// Never returns `Ok`; ending the loop is the host's decision, signalled through
    /// the clock (for example [`Error::HostTornDown`](crate::Error::HostTornDown)).
    ///
    /// # Errors
    ///
    /// The first error from the clock or from [`Self::on_frame`].
    pub async fn run(&mut self, mut clock: impl FrameClock) -> Result<Infallible> {
        log::info!("marquee: frame loop started");
        loop {
            if let Err(err) = clock.next_frame().await {
                log::info!("marquee: frame loop stopped: {err}");
                return Err(err);
            }
            self.on_frame()?;
        }
    }

    /// Tear down: drop the resize subscription and hand back the adapter.
    pub fn destroy(self) -> R {
        log::info!("marquee: destroyed in container {:?}", self.container.id);
        self.resize.unsubscribe();
        self.adapter
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bitmap of the current text.
    #[must_use]
    pub const fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// LED state as of the last recompute.
    #[must_use]
    pub const fn grid(&self) -> &LedGrid<W, H> {
        &self.grid
    }

    /// Horizontal scroll offset, in bitmap pixels.
    #[must_use]
    pub const fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    /// Index of the active palette color.
    #[must_use]
    pub const fn color_index(&self) -> usize {
        self.scroll.color_index()
    }

    /// Color of lit cells.
    #[must_use]
    pub fn active_color(&self) -> RGB8 {
        self.scroll.active_color()
    }

    /// Color of unlit cells.
    #[must_use]
    pub const fn off_color(&self) -> RGB8 {
        self.off_color
    }

    /// The host container, with its latest known size.
    #[must_use]
    pub const fn container(&self) -> &Container {
        &self.container
    }

    /// The render adapter.
    #[must_use]
    pub const fn adapter(&self) -> &R {
        &self.adapter
    }
}
