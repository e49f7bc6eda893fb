#![allow(missing_docs)]
//! Host-level tests for the marquee lifecycle and frame driver.

use embassy_futures::block_on;
use led_marquee::{
    Error, Marquee, MarqueeConfig, Result,
    color::{Palette, RGB8, colors},
    host::{FrameClock, HeadlessHost, Viewport},
    rasterize::{PixelBuffer, TextRasterizer},
    render::{FrameAdapter, RenderAdapter},
};

const CONTAINER_ID: &str = "banner";
const W: usize = 10;
const H: usize = 2;

/// Every character renders as a solid 2-pixel-tall block, one column wide.
struct BlockRasterizer;

impl TextRasterizer for BlockRasterizer {
    fn render(&self, text: &str, _font_size: u32) -> PixelBuffer {
        let width = text.chars().count();
        PixelBuffer::from_rows(&[vec![255u8; width], vec![255u8; width]])
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Event {
    Cell { row: usize, col: usize, is_on: bool, color: RGB8 },
    Present,
    Resize(Viewport),
}

#[derive(Default)]
struct RecordingAdapter {
    events: Vec<Event>,
}

impl RenderAdapter for RecordingAdapter {
    fn set_cell_state(&mut self, row: usize, col: usize, is_on: bool, color: RGB8) {
        self.events.push(Event::Cell {
            row,
            col,
            is_on,
            color,
        });
    }

    fn present(&mut self) -> Result<()> {
        self.events.push(Event::Present);
        Ok(())
    }

    fn on_resize(&mut self, viewport: Viewport) {
        self.events.push(Event::Resize(viewport));
    }
}

/// Delivers `remaining` frames, then reports the host as torn down.
struct CountdownClock {
    remaining: usize,
}

impl FrameClock for CountdownClock {
    async fn next_frame(&mut self) -> Result<()> {
        if self.remaining == 0 {
            return Err(Error::HostTornDown);
        }
        self.remaining -= 1;
        Ok(())
    }
}

fn host() -> HeadlessHost {
    HeadlessHost::new().with_container(CONTAINER_ID, Viewport::new(400, 80))
}

fn config(text: &str) -> MarqueeConfig {
    MarqueeConfig::new(CONTAINER_ID)
        .with_text(text)
        .with_scroll_speed(1.0)
        .with_off_color(colors::BLACK)
        .with_palette(
            Palette::new(&[colors::RED, colors::LIME, colors::BLUE]).expect("palette fits"),
        )
}

fn block_marquee<R: RenderAdapter>(
    host: &HeadlessHost,
    text: &str,
    adapter: R,
) -> Marquee<W, H, R, BlockRasterizer> {
    Marquee::try_new(host, config(text), adapter, BlockRasterizer).expect("marquee builds")
}

#[test]
fn missing_container_yields_none() {
    let host = HeadlessHost::new();
    let marquee = Marquee::<W, H, _>::create(&host, config("abc"), FrameAdapter::<W, H>::new());
    assert!(marquee.is_none());
}

#[test]
fn missing_container_error_names_the_id() {
    let host = HeadlessHost::new().with_container("elsewhere", Viewport::new(10, 10));
    let result = Marquee::<W, H, _, _>::try_new(
        &host,
        config("abc"),
        FrameAdapter::<W, H>::new(),
        BlockRasterizer,
    );
    match result {
        Err(Error::MissingContainer { container_id }) => assert_eq!(container_id, CONTAINER_ID),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("construction must fail"),
    }
}

#[test]
fn invalid_speed_is_rejected() {
    let host = host();
    let result = Marquee::<W, H, _, _>::try_new(
        &host,
        config("abc").with_scroll_speed(f32::NAN),
        FrameAdapter::<W, H>::new(),
        BlockRasterizer,
    );
    assert!(matches!(result, Err(Error::InvalidScrollSpeed { .. })));
}

#[test]
fn construction_reports_container_size_and_starts_off_screen() {
    let host = host();
    let marquee = block_marquee(&host, "abc", RecordingAdapter::default());
    assert_eq!(
        marquee.adapter().events,
        [Event::Resize(Viewport::new(400, 80))]
    );
    assert_eq!(marquee.scroll_offset(), -(W as f32));
    assert_eq!(marquee.grid().lit_count(), 0);
    assert_eq!(marquee.bitmap().width(), 3);
    assert_eq!(marquee.text(), "abc");
}

#[test]
fn each_frame_sets_every_cell_then_presents() {
    let host = host();
    let mut marquee = block_marquee(&host, "abc", RecordingAdapter::default());
    marquee.on_frame().expect("frame");
    marquee.on_frame().expect("frame");

    let events = &marquee.adapter().events[1..];
    assert_eq!(events.len(), 2 * (W * H + 1));
    for frame_events in events.chunks(W * H + 1) {
        assert_eq!(frame_events.last(), Some(&Event::Present));
        let cells = frame_events
            .iter()
            .filter(|event| matches!(event, Event::Cell { .. }))
            .count();
        assert_eq!(cells, W * H);
    }
}

#[test]
fn cell_colors_follow_grid_and_palette() {
    let host = host();
    let mut marquee = block_marquee(&host, "abc", FrameAdapter::<W, H>::new());
    // Offset -10 + 9 = -1: bitmap columns 0..3 land on panel columns 1..4.
    for _ in 0..9 {
        marquee.on_frame().expect("frame");
    }
    let frame = marquee.adapter().presented();
    for row in 0..H {
        for col in 0..W {
            let expected = if marquee.grid().is_on(row, col) {
                colors::RED
            } else {
                colors::BLACK
            };
            assert_eq!(frame[(col, row)], expected, "cell ({row}, {col})");
        }
    }
    assert_eq!(frame.count(colors::RED), 3 * H);
    assert!(marquee.grid().is_on(0, 1) && marquee.grid().is_on(1, 3));
    assert!(!marquee.grid().is_on(0, 0) && !marquee.grid().is_on(0, 4));
}

#[test]
fn wrap_switches_lit_color() {
    let host = host();
    let mut marquee = block_marquee(&host, "abc", FrameAdapter::<W, H>::new());
    // Wrap bound is 3 + 10 = 13; starting at -10 with speed 1 the 23rd frame wraps.
    for _ in 0..23 {
        marquee.on_frame().expect("frame");
    }
    assert_eq!(marquee.color_index(), 1);
    assert_eq!(marquee.scroll_offset(), -(W as f32));
    for _ in 0..12 {
        marquee.on_frame().expect("frame");
    }
    assert_eq!(marquee.active_color(), colors::LIME);
    assert!(marquee.adapter().presented().count(colors::LIME) > 0);
    assert_eq!(marquee.adapter().presented().count(colors::RED), 0);
}

#[test]
fn set_text_restarts_off_screen_and_keeps_color() {
    let host = host();
    let mut marquee = block_marquee(&host, "abc", FrameAdapter::<W, H>::new());
    for _ in 0..30 {
        marquee.on_frame().expect("frame");
    }
    assert_eq!(marquee.color_index(), 1);
    assert!(marquee.grid().lit_count() > 0);

    marquee.set_text("longer text");
    assert_eq!(marquee.text(), "longer text");
    assert_eq!(marquee.bitmap().width(), 11);
    assert_eq!(marquee.scroll_offset(), -(W as f32));
    assert_eq!(marquee.grid().lit_count(), 0);
    assert_eq!(marquee.color_index(), 1);
}

#[test]
fn empty_text_scrolls_nothing() {
    let host = host();
    let mut marquee = block_marquee(&host, "", FrameAdapter::<W, H>::new());
    assert_eq!(marquee.bitmap().width(), 1);
    for _ in 0..40 {
        marquee.on_frame().expect("frame");
        assert_eq!(marquee.grid().lit_count(), 0);
    }
    // Wrap bound is 1 + 10 = 11, so the palette still cycles.
    assert!(marquee.color_index() > 0);
}

#[test]
fn resize_reaches_adapter_without_touching_scroll_state() {
    let host = host();
    let mut resized = block_marquee(&host, "abc", FrameAdapter::<W, H>::new());
    let mut control = Marquee::<W, H, _, _>::try_new(
        &HeadlessHost::new().with_container(CONTAINER_ID, Viewport::new(400, 80)),
        config("abc"),
        FrameAdapter::<W, H>::new(),
        BlockRasterizer,
    )
    .expect("marquee builds");

    for frame_index in 0..15 {
        if frame_index == 7 {
            host.resize(CONTAINER_ID, Viewport::new(200, 40));
        }
        resized.on_frame().expect("frame");
        control.on_frame().expect("frame");
        assert_eq!(resized.scroll_offset(), control.scroll_offset());
        assert_eq!(resized.grid(), control.grid());
    }
    assert_eq!(resized.adapter().viewport(), Viewport::new(200, 40));
    assert_eq!(resized.container().viewport, Viewport::new(200, 40));
    assert_eq!(control.adapter().viewport(), Viewport::new(400, 80));
}

#[test]
fn only_latest_pending_resize_is_delivered() {
    let host = host();
    let mut marquee = block_marquee(&host, "abc", RecordingAdapter::default());
    host.resize(CONTAINER_ID, Viewport::new(300, 60));
    host.resize(CONTAINER_ID, Viewport::new(200, 40));
    marquee.on_frame().expect("frame");
    let resizes: Vec<_> = marquee
        .adapter()
        .events
        .iter()
        .filter(|event| matches!(event, Event::Resize(_)))
        .cloned()
        .collect();
    assert_eq!(
        resizes,
        [
            Event::Resize(Viewport::new(400, 80)),
            Event::Resize(Viewport::new(200, 40))
        ]
    );
}

#[test]
fn destroy_unsubscribes_from_resize() {
    let host = host();
    let first = block_marquee(&host, "abc", FrameAdapter::<W, H>::new());
    let second = block_marquee(&host, "xyz", FrameAdapter::<W, H>::new());
    assert_eq!(host.resize_broadcaster().subscriber_count(), 2);

    let adapter = first.destroy();
    assert_eq!(adapter.present_count(), 0);
    assert_eq!(host.resize_broadcaster().subscriber_count(), 1);

    drop(second);
    assert_eq!(host.resize_broadcaster().subscriber_count(), 0);
    host.resize(CONTAINER_ID, Viewport::new(1, 1));
}

#[test]
fn run_drives_frames_until_host_tears_down() {
    let host = host();
    let mut marquee = block_marquee(&host, "abc", FrameAdapter::<W, H>::new());
    let mut clock = CountdownClock { remaining: 5 };
    let result = block_on(marquee.run(&mut clock));
    assert!(matches!(result, Err(Error::HostTornDown)));
    assert_eq!(marquee.adapter().present_count(), 5);
    assert_eq!(marquee.scroll_offset(), -(W as f32) + 5.0);
}

#[test]
fn default_config_builds_default_marquee() {
    let host = host();
    let marquee = led_marquee::DefaultMarquee::create(
        &host,
        MarqueeConfig::new(CONTAINER_ID),
        FrameAdapter::<80, 10>::new(),
    )
    .expect("container exists");
    assert_eq!(marquee.text(), led_marquee::config::TEXT_DEFAULT);
    assert_eq!(marquee.bitmap().height(), 10);
    assert_eq!(marquee.off_color(), led_marquee::color::OFF_COLOR_DEFAULT);
    assert_eq!(marquee.scroll_offset(), -80.0);
}
