//! Compositing into 8-bit indexed destinations.
//!
//! The blend math is the same as the direct-color fallbacks, but the
//! destination side reads through its palette and the result is packed to
//! the fixed 3-3-2 index layout, optionally pushed through the caller's
//! remap table when the destination palette is not the matching ramp.

use likely_stable::unlikely;
use softblit_common::blend::blend_rgb;
use softblit_common::packed::read_packed;
use softblit_common::palette::{quantize_332, Palette};

use super::expand_src_rgb;
use crate::request::BlitRequest;

#[inline]
fn pack_332(r: u8, g: u8, b: u8, remap: Option<&[u8; 256]>) -> u8 {
    let index = quantize_332(r, g, b);
    match remap {
        Some(table) => table[index as usize],
        None => index,
    }
}

#[inline]
fn dst_palette<'a>(info: &BlitRequest<'a>) -> &'a Palette {
    info.dst_palette
        .expect("an 8-bit indexed destination requires a palette")
}

/// Per-surface alpha into an indexed destination.
///
/// Every pixel is blended and requantized, even at weight 0; a palette
/// that does not match the 3-3-2 ramp may therefore change destination
/// indices anywhere in the rectangle.
pub(crate) fn surface_alpha(info: &mut BlitRequest<'_>) {
    if info.width == 0 {
        return;
    }
    let sbpp = info.src_format.bytes_per_pixel;
    let alpha = info.src_format.surface_alpha;
    let palette = dst_palette(info);

    for y in 0..info.height {
        let src_row = &info.src[y * info.src_pitch..][..info.width * sbpp];
        let dst_row = &mut info.dst[y * info.dst_pitch..][..info.width];
        for x in 0..info.width {
            let sp = read_packed(&src_row[x * sbpp..], sbpp);
            let s = expand_src_rgb(info.src_format, info.src_palette, sp);
            let dc = palette.color(dst_row[x]);
            let (r, g, b) = blend_rgb(s, (dc.r, dc.g, dc.b), alpha);
            dst_row[x] = pack_332(r, g, b, info.remap);
        }
    }
}

/// Colorkeyed per-surface alpha into an indexed destination. Keyed source
/// pixels leave the destination index untouched.
pub(crate) fn surface_alpha_key(info: &mut BlitRequest<'_>) {
    if info.width == 0 {
        return;
    }
    let sbpp = info.src_format.bytes_per_pixel;
    let alpha = info.src_format.surface_alpha;
    let key = info.src_format.colorkey;
    let palette = dst_palette(info);

    for y in 0..info.height {
        let src_row = &info.src[y * info.src_pitch..][..info.width * sbpp];
        let dst_row = &mut info.dst[y * info.dst_pitch..][..info.width];
        for x in 0..info.width {
            let sp = read_packed(&src_row[x * sbpp..], sbpp);
            if unlikely(key == Some(sp)) {
                continue;
            }
            let s = expand_src_rgb(info.src_format, info.src_palette, sp);
            let dc = palette.color(dst_row[x]);
            let (r, g, b) = blend_rgb(s, (dc.r, dc.g, dc.b), alpha);
            dst_row[x] = pack_332(r, g, b, info.remap);
        }
    }
}

/// Per-pixel alpha into an indexed destination. Like the surface-alpha
/// body, transparent and opaque pixels take the ordinary blend path; the
/// requantization applies regardless.
pub(crate) fn pixel_alpha(info: &mut BlitRequest<'_>) {
    if info.width == 0 {
        return;
    }
    let sbpp = info.src_format.bytes_per_pixel;
    let palette = dst_palette(info);

    for y in 0..info.height {
        let src_row = &info.src[y * info.src_pitch..][..info.width * sbpp];
        let dst_row = &mut info.dst[y * info.dst_pitch..][..info.width];
        for x in 0..info.width {
            let sp = read_packed(&src_row[x * sbpp..], sbpp);
            let (sr, sg, sb, sa) = info.src_format.disassemble_rgba(sp);
            let dc = palette.color(dst_row[x]);
            let (r, g, b) = blend_rgb((sr, sg, sb), (dc.r, dc.g, dc.b), sa);
            dst_row[x] = pack_332(r, g, b, info.remap);
        }
    }
}
