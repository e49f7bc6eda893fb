//! Crate-wide error type and result alias.

use derive_more::{Display, Error, From};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors surfaced by marquee construction, the frame loop, and previews.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The host has no container with the requested id.
    #[display("host container {container_id:?} does not exist")]
    MissingContainer {
        /// Id that was looked up.
        container_id: String,
    },

    /// A palette needs at least one color.
    #[display("palette must contain at least one color")]
    EmptyPalette,

    /// More colors than [`PALETTE_CAPACITY`](crate::color::PALETTE_CAPACITY).
    #[display("palette has {len} colors, more than the supported capacity")]
    PaletteTooLarge {
        /// Number of colors offered.
        len: usize,
    },

    /// Scroll speed must be finite and positive.
    #[display("scroll speed {speed} must be finite and positive")]
    InvalidScrollSpeed {
        /// Rejected speed.
        speed: f32,
    },

    /// LED diameter and spacing must be finite, the diameter positive, the spacing non-negative.
    #[display("LED diameter and spacing must be finite, with a positive diameter")]
    InvalidLedGeometry,

    /// The host stopped delivering frames (for example, the view was torn down).
    #[display("host stopped delivering frames")]
    HostTornDown,

    /// Writing a preview file failed.
    #[cfg(feature = "preview")]
    #[display("preview I/O failed: {source}")]
    #[from]
    Io {
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Encoding a preview PNG failed.
    #[cfg(feature = "preview")]
    #[display("preview PNG encoding failed: {source}")]
    #[from]
    PngEncoding {
        /// Underlying encoder error.
        source: png::EncodingError,
    },
}
