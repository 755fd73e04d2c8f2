//! The compositing routines behind [`BlitOp`](crate::BlitOp).
//!
//! Layout of the family:
//!
//! - [`nton`]: the universal disassemble/blend/assemble fallbacks. These
//!   are the reference bodies; every specialized routine must agree with
//!   the blend law they implement.
//! - [`nto1`]: blends into 8-bit indexed destinations through the
//!   destination palette and the fixed 3-3-2 quantizer.
//! - [`rgb32`]: 32-bit byte-lane layouts, two channels per multiply.
//! - [`b16`]: 15/16-bit layouts spread into one 32-bit word, three
//!   channels per multiply.
//!
//! All routines walk the destination rectangle row by row, advancing by
//! the row pitch, and never touch padding bytes past `width` pixels.

pub(crate) mod b16;
pub(crate) mod nto1;
pub(crate) mod nton;
pub(crate) mod rgb32;

use softblit_common::palette::Palette;
use softblit_common::pixel_format::PixelFormat;

/// Expands one raw source pixel to 8-bit RGB, consulting the palette for
/// indexed formats.
#[inline]
pub(crate) fn expand_src_rgb(
    fmt: &PixelFormat,
    palette: Option<&Palette>,
    raw: u32,
) -> (u8, u8, u8) {
    if fmt.is_indexed() {
        let color = palette
            .expect("an 8-bit indexed source requires a palette")
            .color(raw as u8);
        (color.r, color.g, color.b)
    } else {
        fmt.disassemble_rgb(raw)
    }
}
