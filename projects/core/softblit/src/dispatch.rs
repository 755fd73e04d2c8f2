//! # Blit Routine Selection
//!
//! Maps a (source format, destination format, blend flags) triple to the
//! concrete compositing routine that will run, as a [`BlitOp`] value.
//!
//! The decision tree walks from the most specialized routine to the least,
//! first match wins. A specialized routine is only an optimization: it
//! exploits a layout where several channels (or the pixel pair red+blue)
//! can be blended with a single multiply. Every branch falls through to the
//! universal disassemble/blend/assemble fallback when its layout
//! precondition fails, so dispatch never selects a routine whose
//! assumptions the formats do not meet.
//!
//! Selection is a pure function of its three inputs. Callers may cache the
//! returned op across any number of executions as long as the formats and
//! flags stay unchanged.

use derive_enum_all_values::AllValues;
use softblit_common::pixel_format::PixelFormat;

use crate::request::{BlitFlags, BlitRequest};
use crate::routines::{b16, nto1, nton, rgb32};

/// Identity of one concrete compositing routine.
///
/// All variants can be enumerated via `BlitOp::all_values()`, which tests
/// use to cover the whole routine table.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum BlitOp {
    /// Per-surface alpha into an 8-bit indexed destination.
    Nto1SurfaceAlpha,
    /// Colorkeyed per-surface alpha into an 8-bit indexed destination.
    Nto1SurfaceAlphaKey,
    /// Per-pixel alpha into an 8-bit indexed destination.
    Nto1PixelAlpha,
    /// Per-surface alpha between two identical 565 surfaces.
    B565SurfaceAlpha,
    /// Per-surface alpha between two identical 555 surfaces.
    B555SurfaceAlpha,
    /// Per-pixel alpha from a 32-bit ARGB layout into a 565 destination.
    ArgbTo565PixelAlpha,
    /// Per-pixel alpha from a 32-bit ARGB layout into a 555 destination.
    ArgbTo555PixelAlpha,
    /// Per-surface alpha between 32-bit surfaces with byte-lane RGB.
    RgbToRgbSurfaceAlpha,
    /// Per-pixel alpha between 32-bit surfaces with byte-lane RGB and
    /// alpha in the top byte.
    RgbToRgbPixelAlpha,
    /// Per-surface alpha between arbitrary direct-color layouts.
    NtoNSurfaceAlpha,
    /// Colorkeyed per-surface alpha between arbitrary direct-color
    /// layouts.
    NtoNSurfaceAlphaKey,
    /// Per-pixel alpha between arbitrary direct-color layouts.
    NtoNPixelAlpha,
}

impl BlitOp {
    /// Runs this routine over one request.
    ///
    /// The op must have been obtained from [`select`] for the request's
    /// formats and flags; executing an op whose layout precondition the
    /// formats do not meet is a contract violation.
    ///
    /// # Panics
    ///
    /// Panics if the buffers are smaller than the rectangle implied by
    /// (width, height, pitch, bytes-per-pixel), or if an indexed surface is
    /// passed without its palette. [`blit()`](crate::blit()) performs these
    /// checks up front and reports them as errors instead.
    pub fn execute(self, info: &mut BlitRequest<'_>) {
        match self {
            BlitOp::Nto1SurfaceAlpha => nto1::surface_alpha(info),
            BlitOp::Nto1SurfaceAlphaKey => nto1::surface_alpha_key(info),
            BlitOp::Nto1PixelAlpha => nto1::pixel_alpha(info),
            BlitOp::B565SurfaceAlpha => b16::b565_surface_alpha(info),
            BlitOp::B555SurfaceAlpha => b16::b555_surface_alpha(info),
            BlitOp::ArgbTo565PixelAlpha => b16::argb_to_565_pixel_alpha(info),
            BlitOp::ArgbTo555PixelAlpha => b16::argb_to_555_pixel_alpha(info),
            BlitOp::RgbToRgbSurfaceAlpha => rgb32::surface_alpha(info),
            BlitOp::RgbToRgbPixelAlpha => rgb32::pixel_alpha(info),
            BlitOp::NtoNSurfaceAlpha => nton::surface_alpha(info),
            BlitOp::NtoNSurfaceAlphaKey => nton::surface_alpha_key(info),
            BlitOp::NtoNPixelAlpha => nton::pixel_alpha(info),
        }
    }

    /// The universal fallback that produces the same class of blend as this
    /// routine.
    ///
    /// Useful for comparing a fast path against the reference body it
    /// specializes.
    pub const fn generic_equivalent(self) -> BlitOp {
        match self {
            BlitOp::B565SurfaceAlpha
            | BlitOp::B555SurfaceAlpha
            | BlitOp::RgbToRgbSurfaceAlpha => BlitOp::NtoNSurfaceAlpha,
            BlitOp::ArgbTo565PixelAlpha
            | BlitOp::ArgbTo555PixelAlpha
            | BlitOp::RgbToRgbPixelAlpha => BlitOp::NtoNPixelAlpha,
            other => other,
        }
    }
}

/// Selects the best routine for a format pair and blend flags.
///
/// # Examples
///
/// ```
/// use softblit::{select, BlitFlags, BlitOp, PixelFormat};
///
/// let src = PixelFormat::argb8888();
/// let dst = PixelFormat::rgb565();
/// let flags = BlitFlags { pixel_alpha: true, ..Default::default() };
/// assert_eq!(select(&src, &dst, flags), BlitOp::ArgbTo565PixelAlpha);
/// ```
pub fn select(src: &PixelFormat, dst: &PixelFormat, flags: BlitFlags) -> BlitOp {
    if src.has_alpha() && flags.pixel_alpha {
        select_pixel_alpha(src, dst)
    } else {
        select_surface_alpha(src, dst, flags.color_key)
    }
}

fn select_surface_alpha(src: &PixelFormat, dst: &PixelFormat, color_key: bool) -> BlitOp {
    if color_key {
        return if dst.bytes_per_pixel == 1 {
            BlitOp::Nto1SurfaceAlphaKey
        } else {
            BlitOp::NtoNSurfaceAlphaKey
        };
    }
    match dst.bytes_per_pixel {
        1 => BlitOp::Nto1SurfaceAlpha,
        2 => {
            // Identical 16-bit layouts can spread a pixel into one 32-bit
            // word and blend all three channels per multiply.
            if identical_layout(src, dst) && !src.has_alpha() {
                if dst.green.mask == 0x07E0 {
                    return BlitOp::B565SurfaceAlpha;
                }
                if dst.green.mask == 0x03E0 {
                    return BlitOp::B555SurfaceAlpha;
                }
            }
            BlitOp::NtoNSurfaceAlpha
        }
        4 => {
            if src.bytes_per_pixel == 4 && rgb_masks_match(src, dst) && byte_lane_rgb(src) {
                BlitOp::RgbToRgbSurfaceAlpha
            } else {
                BlitOp::NtoNSurfaceAlpha
            }
        }
        // 24-bit packed pixels are not word-aligned; nothing to gain.
        _ => BlitOp::NtoNSurfaceAlpha,
    }
}

fn select_pixel_alpha(src: &PixelFormat, dst: &PixelFormat) -> BlitOp {
    match dst.bytes_per_pixel {
        1 => BlitOp::Nto1PixelAlpha,
        2 => {
            // A 32-bit source with alpha on top, a full green byte and
            // red-or-blue in the low byte lines up with a 5-bit destination
            // field on the matching side.
            if src.bytes_per_pixel == 4
                && src.alpha.mask == 0xFF00_0000
                && src.green.mask == 0x0000_FF00
                && ((src.red.mask == 0x0000_00FF && dst.red.mask == 0x001F)
                    || (src.blue.mask == 0x0000_00FF && dst.blue.mask == 0x001F))
            {
                if dst.green.mask == 0x07E0 {
                    return BlitOp::ArgbTo565PixelAlpha;
                }
                if dst.green.mask == 0x03E0 {
                    return BlitOp::ArgbTo555PixelAlpha;
                }
            }
            BlitOp::NtoNPixelAlpha
        }
        4 => {
            if src.bytes_per_pixel == 4
                && src.alpha.mask == 0xFF00_0000
                && rgb_masks_match(src, dst)
                && byte_lane_rgb(src)
            {
                BlitOp::RgbToRgbPixelAlpha
            } else {
                BlitOp::NtoNPixelAlpha
            }
        }
        _ => BlitOp::NtoNPixelAlpha,
    }
}

fn rgb_masks_match(a: &PixelFormat, b: &PixelFormat) -> bool {
    a.red.mask == b.red.mask && a.green.mask == b.green.mask && a.blue.mask == b.blue.mask
}

fn byte_lane_rgb(f: &PixelFormat) -> bool {
    (f.red.mask | f.green.mask | f.blue.mask) == 0x00FF_FFFF
}

fn identical_layout(a: &PixelFormat, b: &PixelFormat) -> bool {
    a.bytes_per_pixel == b.bytes_per_pixel
        && rgb_masks_match(a, b)
        && a.alpha.mask == b.alpha.mask
}
