#![cfg(feature = "preview")]
//! LED-style PNG and APNG previews of presented frames.

use crate::{MarqueeConfig, Result, host::Viewport, render::Frame2d};
use png::{BitDepth, ColorType, Encoder, ScaledFloat};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;
const MIN_CELL_SIZE: u32 = 4;

/// How a single LED sits in its cell: a disc of `led_diameter` with `led_spacing` to
/// its neighbors, both in the same (arbitrary) unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LedStyle {
    /// LED disc diameter.
    pub led_diameter: f32,
    /// Gap between neighboring LEDs.
    pub led_spacing: f32,
}

impl LedStyle {
    /// Take LED geometry from a marquee configuration.
    #[must_use]
    pub const fn from_config(config: &MarqueeConfig) -> Self {
        Self {
            led_diameter: config.led_diameter(),
            led_spacing: config.led_spacing(),
        }
    }

    fn diameter_ratio(self) -> f32 {
        let pitch = self.led_diameter + self.led_spacing;
        if pitch > 0.0 {
            (self.led_diameter / pitch).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// Pixel layout of a preview image: square cells with a centered LED disc and a border
/// one LED radius wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewGeometry {
    cell_size: u32,
    led_radius: u32,
}

impl PreviewGeometry {
    /// Largest cells that fit a `panel_width`×`panel_height` panel into `viewport`.
    ///
    /// Cells never shrink below a few pixels, so tiny or empty viewports still produce a
    /// readable image.
    #[must_use]
    pub fn fit(panel_width: u32, panel_height: u32, style: LedStyle, viewport: Viewport) -> Self {
        let panel_width = panel_width.max(1);
        let panel_height = panel_height.max(1);
        let mut cell_size = (viewport.width / panel_width)
            .min(viewport.height / panel_height)
            .max(MIN_CELL_SIZE);
        loop {
            let geometry = Self::with_cell_size(cell_size, style);
            let (width, height) = geometry.image_size(panel_width, panel_height);
            if cell_size <= MIN_CELL_SIZE || (width <= viewport.width && height <= viewport.height)
            {
                return geometry;
            }
            cell_size -= 1;
        }
    }

    /// Geometry with fixed `cell_size` pixels per LED.
    #[must_use]
    pub fn with_cell_size(cell_size: u32, style: LedStyle) -> Self {
        let cell_size = cell_size.max(MIN_CELL_SIZE);
        let diameter = (cell_size as f32 * style.diameter_ratio()).round() as u32;
        let led_radius = (diameter / 2).clamp(1, cell_size / 2);
        Self {
            cell_size,
            led_radius,
        }
    }

    /// Pixels per LED cell.
    #[must_use]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// LED disc radius in pixels.
    #[must_use]
    pub const fn led_radius(&self) -> u32 {
        self.led_radius
    }

    /// Output image `(width, height)` for a panel of the given size.
    #[must_use]
    pub const fn image_size(&self, panel_width: u32, panel_height: u32) -> (u32, u32) {
        let border = self.led_radius;
        (
            panel_width * self.cell_size + border * 2,
            panel_height * self.cell_size + border * 2,
        )
    }
}

/// Render a `Frame2d` into a PNG file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded.
pub fn write_frame_png<const W: usize, const H: usize>(
    frame: &Frame2d<W, H>,
    output_path: impl AsRef<Path>,
    geometry: PreviewGeometry,
) -> Result<()> {
    let output_path = output_path.as_ref();
    let (width, height, pixels) = panel_pixels(frame, geometry, PREVIEW_INVERSE_GAMMA);
    create_parent_dir(output_path)?;

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    log::info!("preview: wrote PNG to {}", output_path.display());
    Ok(())
}

/// Render multiple `Frame2d` values into a looping APNG file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded.
///
/// # Panics
///
/// Panics if `frames` is empty or `frame_delay_ms` is zero.
pub fn write_frames_apng<const W: usize, const H: usize>(
    frames: &[Frame2d<W, H>],
    output_path: impl AsRef<Path>,
    geometry: PreviewGeometry,
    frame_delay_ms: u16,
) -> Result<()> {
    assert!(!frames.is_empty(), "frames must not be empty");
    assert!(frame_delay_ms > 0, "frame_delay_ms must be positive");
    let output_path = output_path.as_ref();
    let frame_count = u32::try_from(frames.len()).unwrap_or(u32::MAX);
    let (width, height) = geometry.image_size(W as u32, H as u32);

    create_parent_dir(output_path)?;
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    encoder.set_animated(frame_count, 0)?;
    let mut writer = encoder.write_header()?;
    for frame in frames.iter().take(frame_count as usize) {
        let (_, _, frame_pixels) = panel_pixels(frame, geometry, PREVIEW_INVERSE_GAMMA);
        writer.set_frame_delay(frame_delay_ms, 1000)?;
        writer.write_image_data(&frame_pixels)?;
    }
    writer.finish()?;
    log::info!(
        "preview: wrote {} frame APNG to {}",
        frame_count,
        output_path.display()
    );
    Ok(())
}

fn create_parent_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn panel_pixels<const W: usize, const H: usize>(
    frame: &Frame2d<W, H>,
    geometry: PreviewGeometry,
    preview_inverse_gamma: f32,
) -> (u32, u32, Vec<u8>) {
    let PreviewGeometry {
        cell_size,
        led_radius,
    } = geometry;
    let border = led_radius;
    let (width, height) = geometry.image_size(W as u32, H as u32);
    let mut bytes = vec![0u8; (width * height * 3 * 2) as usize];
    let center = (cell_size - 1) as i32 / 2;
    let fade_width = led_radius / 3;
    let led_radius_f = led_radius as f32;
    let inner_radius_f = (led_radius - fade_width) as f32;
    let radius_sq = (led_radius as i32) * (led_radius as i32);

    for (row_index, row) in frame.iter().enumerate() {
        for (column_index, pixel) in row.iter().enumerate() {
            let cell_origin_x = (column_index as u32) * cell_size;
            let cell_origin_y = (row_index as u32) * cell_size;

            for local_y in 0..cell_size {
                let delta_y = local_y as i32 - center;
                for local_x in 0..cell_size {
                    let delta_x = local_x as i32 - center;
                    let distance_sq = delta_x * delta_x + delta_y * delta_y;
                    if distance_sq > radius_sq {
                        continue;
                    }
                    let distance = (distance_sq as f32).sqrt();
                    let intensity = if fade_width == 0 || distance <= inner_radius_f {
                        1.0
                    } else {
                        let fade_span = led_radius_f - inner_radius_f;
                        (1.0 - (distance - inner_radius_f) / fade_span).max(0.0)
                    };
                    let x = border + cell_origin_x + local_x;
                    let y = border + cell_origin_y + local_y;
                    let pixel_index = ((y * width + x) * 3 * 2) as usize;
                    let channels = [pixel.r, pixel.g, pixel.b].map(|channel| {
                        linear_to_u16(
                            inverse_gamma_to_linear(channel, preview_inverse_gamma) * intensity,
                        )
                    });
                    if let Some(slot) = bytes.get_mut(pixel_index..pixel_index + 6) {
                        for (pair, value) in slot.chunks_exact_mut(2).zip(channels) {
                            pair.copy_from_slice(&value.to_be_bytes());
                        }
                    }
                }
            }
        }
    }

    (width, height, bytes)
}

fn inverse_gamma_to_linear(channel: u8, preview_inverse_gamma: f32) -> f32 {
    let normalized = f32::from(channel) / 255.0;
    normalized.powf(preview_inverse_gamma)
}

fn linear_to_u16(value: f32) -> u16 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 65535.0).round() as u16
}
