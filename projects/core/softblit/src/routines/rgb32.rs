//! Fast paths for 32-bit byte-lane RGB layouts.
//!
//! With red, green and blue each on their own byte lane, red and blue can
//! be blended as one `0x00FF00FF` pair with a single multiply and green on
//! its own, and the whole computation stays inside one 32-bit word. The
//! lane arithmetic wraps exactly like the per-channel law, so these bodies
//! produce bit-identical output to the generic fallback on the layouts the
//! dispatcher sends here.

use likely_stable::unlikely;
use softblit_common::packed::{read_packed, write_packed};

use crate::request::BlitRequest;

#[inline]
fn blend_lanes(s: u32, d: u32, alpha: u32) -> u32 {
    // Red and blue in one step, green in another; the byte lane between
    // two fields absorbs the borrow.
    let s1 = s & 0x00FF_00FF;
    let d1 = d & 0x00FF_00FF;
    let rb = d1.wrapping_add(s1.wrapping_sub(d1).wrapping_mul(alpha) >> 8) & 0x00FF_00FF;
    let sg = s & 0x0000_FF00;
    let dg = d & 0x0000_FF00;
    let g = dg.wrapping_add(sg.wrapping_sub(dg).wrapping_mul(alpha) >> 8) & 0x0000_FF00;
    rb | g
}

/// Per-surface alpha between 32-bit byte-lane layouts. The destination
/// alpha byte is forced opaque; weight 128 collapses to a two-instruction
/// average per pixel.
pub(crate) fn surface_alpha(info: &mut BlitRequest<'_>) {
    if info.width == 0 {
        return;
    }
    let alpha = info.src_format.surface_alpha;
    match alpha {
        0 => {}
        128 => surface_alpha_128(info),
        _ => {
            for y in 0..info.height {
                let src_row = &info.src[y * info.src_pitch..][..info.width * 4];
                let dst_row = &mut info.dst[y * info.dst_pitch..][..info.width * 4];
                for x in 0..info.width {
                    let s = read_packed(&src_row[x * 4..], 4);
                    let d = read_packed(&dst_row[x * 4..], 4);
                    let out = blend_lanes(s, d, alpha as u32) | 0xFF00_0000;
                    write_packed(&mut dst_row[x * 4..], 4, out);
                }
            }
        }
    }
}

/// The 50% special case: halve the masked sum of both pixels and restore
/// the carry bit each lane pair shares.
fn surface_alpha_128(info: &mut BlitRequest<'_>) {
    for y in 0..info.height {
        let src_row = &info.src[y * info.src_pitch..][..info.width * 4];
        let dst_row = &mut info.dst[y * info.dst_pitch..][..info.width * 4];
        for x in 0..info.width {
            let s = read_packed(&src_row[x * 4..], 4);
            let d = read_packed(&dst_row[x * 4..], 4);
            let out = (((s & 0x00FE_FEFE) + (d & 0x00FE_FEFE)) >> 1)
                .wrapping_add(s & d & 0x0001_0101)
                | 0xFF00_0000;
            write_packed(&mut dst_row[x * 4..], 4, out);
        }
    }
}

/// Per-pixel alpha between 32-bit byte-lane layouts with source alpha in
/// the top byte. Transparent pixels are skipped, opaque pixels copy their
/// RGB lanes, and the destination keeps its own alpha byte throughout.
pub(crate) fn pixel_alpha(info: &mut BlitRequest<'_>) {
    if info.width == 0 {
        return;
    }
    for y in 0..info.height {
        let src_row = &info.src[y * info.src_pitch..][..info.width * 4];
        let dst_row = &mut info.dst[y * info.dst_pitch..][..info.width * 4];
        for x in 0..info.width {
            let s = read_packed(&src_row[x * 4..], 4);
            let alpha = s >> 24;
            if unlikely(alpha == 0) {
                continue;
            }
            let d = read_packed(&dst_row[x * 4..], 4);
            let out = if alpha == 255 {
                (s & 0x00FF_FFFF) | (d & 0xFF00_0000)
            } else {
                blend_lanes(s, d, alpha) | (d & 0xFF00_0000)
            };
            write_packed(&mut dst_row[x * 4..], 4, out);
        }
    }
}
