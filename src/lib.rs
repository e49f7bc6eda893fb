//! A scrolling LED-matrix marquee: text becomes a bitmap, the bitmap scrolls across a
//! fixed grid of LEDs, and lit LEDs cycle through a palette each time the text wraps.
//!
//! The crate owns the core state and the per-frame update. Drawing is delegated to a
//! [`RenderAdapter`](render::RenderAdapter), glyph drawing to a
//! [`TextRasterizer`](rasterize::TextRasterizer), and pacing to the host's
//! [`FrameClock`](host::FrameClock).
//!
//! # Example
//!
//! ```rust
//! use led_marquee::{
//!     DefaultMarquee, MarqueeConfig,
//!     host::{HeadlessHost, Viewport},
//!     render::FrameAdapter,
//! };
//!
//! let host = HeadlessHost::new().with_container("banner", Viewport::new(1600, 200));
//! let config = MarqueeConfig::new("banner").with_text("Rust");
//! let mut marquee = DefaultMarquee::create(&host, config, FrameAdapter::<80, 10>::new())
//!     .expect("container exists");
//!
//! // The host calls this once per display refresh.
//! for _ in 0..120 {
//!     marquee.on_frame()?;
//! }
//! marquee.set_text("New text"); // scrolls in from the right edge again
//! # Ok::<(), led_marquee::Error>(())
//! ```
//!
//! # Glossary
//!
//! - **Panel:** the fixed `W`×`H` grid of LEDs.
//! - **Bitmap:** the rasterized, thresholded on/off image of the current text.
//! - **Scroll offset:** horizontal shift, in bitmap pixels, applied when sampling the
//!   bitmap into the panel.
//! - **Palette:** the cyclic colors applied to lit LEDs, advanced on each scroll wrap.
#![allow(async_fn_in_trait, reason = "single-threaded frame loop")]

pub mod color;
pub mod config;
mod error;
pub mod grid;
pub mod host;
mod marquee;
pub mod rasterize;
pub mod render;
pub mod scroll;
#[cfg(feature = "preview")]
pub mod to_png;

pub use crate::config::MarqueeConfig;
pub use crate::error::{Error, Result};
pub use crate::marquee::{DefaultMarquee, Marquee};
