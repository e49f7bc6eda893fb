#![cfg(feature = "preview")]
#![allow(missing_docs)]
//! Preview image geometry and PNG/APNG output.

use std::error::Error;
use std::fs::File;

use led_marquee::{
    Marquee, MarqueeConfig,
    color::colors,
    host::{HeadlessHost, Viewport},
    render::{PreviewRecorder, RenderAdapter},
    to_png::{LedStyle, PreviewGeometry},
};

const DEFAULT_STYLE: LedStyle = LedStyle {
    led_diameter: 0.8,
    led_spacing: 0.2,
};

struct Decoded {
    width: u32,
    height: u32,
    animation_control: Option<png::AnimationControl>,
}

fn decode_info(path: &std::path::Path) -> Result<Decoded, Box<dyn Error>> {
    let decoder = png::Decoder::new(File::open(path)?);
    let reader = decoder.read_info()?;
    let info = reader.info();
    Ok(Decoded {
        width: info.width,
        height: info.height,
        animation_control: info.animation_control,
    })
}

#[test]
fn geometry_fits_viewport() {
    let viewport = Viewport::new(800, 100);
    let geometry = PreviewGeometry::fit(80, 10, DEFAULT_STYLE, viewport);
    let (width, height) = geometry.image_size(80, 10);
    assert!(geometry.cell_size() >= 4);
    assert!(width <= viewport.width && height <= viewport.height);
    assert!(geometry.led_radius() >= 1);
    assert!(geometry.led_radius() * 2 <= geometry.cell_size());
}

#[test]
fn geometry_never_shrinks_below_minimum_cell() {
    let geometry = PreviewGeometry::fit(80, 10, DEFAULT_STYLE, Viewport::default());
    assert_eq!(geometry.cell_size(), 4);
}

#[test]
fn led_style_comes_from_config() {
    let config = MarqueeConfig::new("banner").with_led_geometry(1.0, 0.5);
    let style = LedStyle::from_config(&config);
    assert_eq!(style.led_diameter, 1.0);
    assert_eq!(style.led_spacing, 0.5);
}

#[test]
fn write_png_matches_geometry() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("frame.png");

    let mut recorder = PreviewRecorder::<4, 2>::new(DEFAULT_STYLE, 8);
    recorder.on_resize(Viewport::new(40, 20));
    recorder.set_cell_state(0, 1, true, colors::RED);
    recorder.present()?;
    recorder.write_png(&path)?;

    let info = decode_info(&path)?;
    let expected = recorder.geometry().image_size(4, 2);
    assert_eq!((info.width, info.height), expected);
    assert!(info.animation_control.is_none());
    Ok(())
}

#[test]
fn write_apng_holds_recorded_frames() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("marquee.png");
    let host = HeadlessHost::new().with_container("banner", Viewport::new(400, 60));
    let config = MarqueeConfig::new("banner").with_text("Hi").with_scroll_speed(2.0);

    let recorder = PreviewRecorder::<40, 6>::new(DEFAULT_STYLE, 5);
    let mut marquee =
        Marquee::<40, 6, _>::create(&host, config, recorder).ok_or("container exists")?;
    for _ in 0..8 {
        marquee.on_frame()?;
    }
    let recorder = marquee.destroy();
    assert_eq!(recorder.recorded().len(), 5);
    recorder.write_apng(&path, 16)?;

    let info = decode_info(&path)?;
    let control = info.animation_control.ok_or("missing acTL chunk")?;
    assert_eq!(control.num_frames, 5);
    assert_eq!(control.num_plays, 0);
    assert_eq!((info.width, info.height), recorder.geometry().image_size(40, 6));
    Ok(())
}

#[test]
fn write_apng_without_frames_writes_one_blank_frame() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("blank.png");
    let recorder = PreviewRecorder::<3, 3>::new(DEFAULT_STYLE, 10);
    recorder.write_apng(&path, 100)?;

    let info = decode_info(&path)?;
    assert_eq!(info.animation_control.map(|control| control.num_frames), Some(1));
    Ok(())
}
