//! The borrowed description of one blit.

use softblit_common::palette::Palette;
use softblit_common::pixel_format::PixelFormat;

/// Blend-mode switches for one blit.
///
/// The flags and the source format must agree: `pixel_alpha` only takes
/// effect when the source format actually stores an alpha channel, and
/// `color_key` only skips pixels when the source format carries a colorkey
/// value. Colorkey transparency participates in surface-alpha blits only;
/// a per-pixel-alpha source expresses transparency through its alpha
/// channel instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlitFlags {
    /// Treat source pixels matching the format's colorkey as fully
    /// transparent.
    pub color_key: bool,
    /// Blend by the source's embedded per-pixel alpha channel instead of
    /// its uniform per-surface alpha.
    pub pixel_alpha: bool,
}

/// Everything one blit invocation needs, borrowed from the caller.
///
/// The request is constructed, consumed and discarded within a single call;
/// nothing survives between blits except the formats themselves. Buffers
/// are plain byte slices: a row `y` starts at byte `y * pitch` and the
/// pitch may exceed `width * bytes_per_pixel`, leaving padding bytes at the
/// end of each row that no routine will read or write.
pub struct BlitRequest<'a> {
    /// Source pixel bytes.
    pub src: &'a [u8],
    /// Source row stride in bytes.
    pub src_pitch: usize,
    /// Source pixel encoding.
    pub src_format: &'a PixelFormat,
    /// Color table for an 8-bit indexed source. Read-only snapshot;
    /// required when the source format is indexed.
    pub src_palette: Option<&'a Palette>,
    /// Destination pixel bytes, mutated in place.
    pub dst: &'a mut [u8],
    /// Destination row stride in bytes.
    pub dst_pitch: usize,
    /// Destination pixel encoding.
    pub dst_format: &'a PixelFormat,
    /// Color table for an 8-bit indexed destination. Read-only snapshot;
    /// required when the destination format is indexed.
    pub dst_palette: Option<&'a Palette>,
    /// Remap table applied after 3-3-2 quantization when the destination
    /// palette is not the plain 3-3-2 ramp.
    pub remap: Option<&'a [u8; 256]>,
    /// Pixels per row.
    pub width: usize,
    /// Number of rows. A zero-area request is a no-op.
    pub height: usize,
    /// Blend-mode switches.
    pub flags: BlitFlags,
}
