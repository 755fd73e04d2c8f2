//! Common test imports and utilities
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// Core functionality from this crate
pub use crate::dispatch::{select, BlitOp};
pub use crate::error::BlitError;
pub use crate::request::{BlitFlags, BlitRequest};

// Common types from softblit_common
pub use softblit_common::palette::{quantize_332, Palette, PaletteColor};
pub use softblit_common::pixel_format::{ChannelLayout, PixelFormat};

/// Builds a request over the given buffers with no palettes and no remap
/// table; tests fill those in when they need them.
#[allow(clippy::too_many_arguments)]
pub(crate) fn request<'a>(
    src: &'a [u8],
    src_pitch: usize,
    src_format: &'a PixelFormat,
    dst: &'a mut [u8],
    dst_pitch: usize,
    dst_format: &'a PixelFormat,
    width: usize,
    height: usize,
    flags: BlitFlags,
) -> BlitRequest<'a> {
    BlitRequest {
        src,
        src_pitch,
        src_format,
        src_palette: None,
        dst,
        dst_pitch,
        dst_format,
        dst_palette: None,
        remap: None,
        width,
        height,
        flags,
    }
}

/// Lays 16-bit pixel values out as a byte buffer in platform order.
pub(crate) fn bytes_from_u16(pixels: &[u16]) -> Vec<u8> {
    pixels.iter().flat_map(|p| p.to_ne_bytes()).collect()
}

/// Lays 32-bit pixel values out as a byte buffer in platform order.
pub(crate) fn bytes_from_u32(pixels: &[u32]) -> Vec<u8> {
    pixels.iter().flat_map(|p| p.to_ne_bytes()).collect()
}

/// Reads a byte buffer back as 16-bit pixel values.
pub(crate) fn u16_from_bytes(buf: &[u8]) -> Vec<u16> {
    buf.chunks_exact(2)
        .map(|c| u16::from_ne_bytes([c[0], c[1]]))
        .collect()
}

/// Reads a byte buffer back as 32-bit pixel values.
pub(crate) fn u32_from_bytes(buf: &[u8]) -> Vec<u32> {
    buf.chunks_exact(4)
        .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
