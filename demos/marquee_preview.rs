//! Scroll a message across an 80×10 marquee and save the result as an animated PNG.
//!
//! Usage: `cargo run --features demo --bin demo_marquee_preview -- [TEXT] [OUTPUT.png]`
//!
//! Set `RUST_LOG=debug` to see palette wraps and resize handling.

use std::env;

use led_marquee::{
    DefaultMarquee, MarqueeConfig, Result,
    color::{Palette, colors},
    config::{PANEL_HEIGHT_DEFAULT, PANEL_WIDTH_DEFAULT, TEXT_DEFAULT},
    host::{HeadlessHost, Viewport},
    render::PreviewRecorder,
    to_png::LedStyle,
};

const CONTAINER_ID: &str = "marquee";
const FRAME_COUNT: usize = 400;
const FRAME_DELAY_MS: u16 = 16;

fn main() -> Result<()> {
    env_logger::init();
    let mut args = env::args().skip(1);
    let text = args.next().unwrap_or_else(|| TEXT_DEFAULT.to_owned());
    let output_path = args
        .next()
        .unwrap_or_else(|| "target/marquee_preview.png".to_owned());

    let host = HeadlessHost::new().with_container(CONTAINER_ID, Viewport::new(960, 160));
    let palette = Palette::new(&[colors::ORANGE, colors::HOT_PINK, colors::CYAN])?;
    let config = MarqueeConfig::new(CONTAINER_ID)
        .with_text(text)
        .with_palette(palette)
        .with_scroll_speed(1.0);
    let recorder = PreviewRecorder::<PANEL_WIDTH_DEFAULT, PANEL_HEIGHT_DEFAULT>::new(
        LedStyle::from_config(&config),
        FRAME_COUNT,
    );

    let Some(mut marquee) = DefaultMarquee::create(&host, config, recorder) else {
        return Err(led_marquee::Error::MissingContainer {
            container_id: CONTAINER_ID.to_owned(),
        });
    };

    for frame_index in 0..FRAME_COUNT {
        // Halfway through, the window shrinks; the text keeps scrolling undisturbed.
        if frame_index == FRAME_COUNT / 2 {
            host.resize(CONTAINER_ID, Viewport::new(640, 120));
        }
        marquee.on_frame()?;
    }

    let recorder = marquee.destroy();
    recorder.write_apng(&output_path, FRAME_DELAY_MS)?;
    Ok(())
}
