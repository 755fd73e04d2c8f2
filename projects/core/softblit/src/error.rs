//! Error types for validated blit requests.

use thiserror::Error;

/// Validation errors reported by [`blit()`](crate::blit()) before any pixel
/// is touched.
///
/// The compositing math itself has no failure modes; these errors only
/// describe requests whose buffers, pitches or palettes cannot support the
/// rectangle they ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlitError {
    /// A format declares a pixel width outside the supported 1..=4 bytes.
    #[error("Unsupported pixel depth: {0} bytes per pixel (supported: 1-4)")]
    UnsupportedDepth(usize),

    /// A row pitch is smaller than the tight width of one row of pixels.
    #[error("Row pitch too small: {pitch} bytes, but one row of pixels spans {needed}")]
    PitchTooSmall {
        /// The pitch supplied with the request.
        pitch: usize,
        /// The tight row width, `width * bytes_per_pixel`.
        needed: usize,
    },

    /// The source buffer cannot hold the requested rectangle.
    #[error("Source buffer too small: need {needed} bytes, but only {actual} bytes available")]
    SourceTooSmall {
        /// The required size in bytes.
        needed: usize,
        /// The actual size in bytes.
        actual: usize,
    },

    /// The destination buffer cannot hold the requested rectangle.
    #[error("Destination buffer too small: need {needed} bytes, but only {actual} bytes available")]
    DestinationTooSmall {
        /// The required size in bytes.
        needed: usize,
        /// The actual size in bytes.
        actual: usize,
    },

    /// An 8-bit indexed surface was supplied without its palette.
    #[error("An 8-bit indexed surface was supplied without its palette")]
    MissingPalette,
}
