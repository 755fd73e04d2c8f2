//! # Generic Direct-Color Compositing
//!
//! The universal fallbacks: disassemble both pixels to 8-bit channels,
//! apply the blend law, assemble back into the destination layout. They
//! work for any pair of 1-4 byte formats and are the reference behavior
//! that every specialized routine agrees with.
//!
//! The loop bodies are compiled for several x86-64 feature levels and the
//! best fit is picked at run time; the source stays plain scalar code.

use likely_stable::unlikely;
use multiversion::multiversion;
use softblit_common::blend::blend_rgb;
use softblit_common::packed::{read_packed, write_packed};

use super::expand_src_rgb;
use crate::request::BlitRequest;

/// Per-surface alpha, no colorkey. The source's alpha field, if any, is
/// ignored. An alpha-bearing destination is written fully opaque; a
/// zero-alpha blit leaves the destination untouched, alpha included.
#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
#[inline(never)] // improve register budget.
pub(crate) fn surface_alpha<'a>(info: &mut BlitRequest<'a>) {
    if info.width == 0 {
        return;
    }
    let sbpp = info.src_format.bytes_per_pixel;
    let dbpp = info.dst_format.bytes_per_pixel;
    let alpha = info.src_format.surface_alpha;
    if alpha == 0 {
        return;
    }
    let dst_alpha = if info.dst_format.has_alpha() { 255 } else { 0 };

    for y in 0..info.height {
        let src_row = &info.src[y * info.src_pitch..][..info.width * sbpp];
        let dst_row = &mut info.dst[y * info.dst_pitch..][..info.width * dbpp];
        for x in 0..info.width {
            let sp = read_packed(&src_row[x * sbpp..], sbpp);
            let s = expand_src_rgb(info.src_format, info.src_palette, sp);
            let dp = read_packed(&dst_row[x * dbpp..], dbpp);
            let d = info.dst_format.disassemble_rgb(dp);
            let (r, g, b) = blend_rgb(s, d, alpha);
            let out = info.dst_format.assemble_rgba(r, g, b, dst_alpha);
            write_packed(&mut dst_row[x * dbpp..], dbpp, out);
        }
    }
}

/// Per-surface alpha with colorkey. A source pixel whose raw packed value
/// matches the key leaves its destination pixel byte-for-byte unchanged;
/// the comparison happens before channel expansion.
#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
#[inline(never)] // improve register budget.
pub(crate) fn surface_alpha_key<'a>(info: &mut BlitRequest<'a>) {
    if info.width == 0 {
        return;
    }
    let sbpp = info.src_format.bytes_per_pixel;
    let dbpp = info.dst_format.bytes_per_pixel;
    let alpha = info.src_format.surface_alpha;
    if alpha == 0 {
        return;
    }
    let key = info.src_format.colorkey;
    let dst_alpha = if info.dst_format.has_alpha() { 255 } else { 0 };

    for y in 0..info.height {
        let src_row = &info.src[y * info.src_pitch..][..info.width * sbpp];
        let dst_row = &mut info.dst[y * info.dst_pitch..][..info.width * dbpp];
        for x in 0..info.width {
            let sp = read_packed(&src_row[x * sbpp..], sbpp);
            if unlikely(key == Some(sp)) {
                continue;
            }
            let s = expand_src_rgb(info.src_format, info.src_palette, sp);
            let dp = read_packed(&dst_row[x * dbpp..], dbpp);
            let d = info.dst_format.disassemble_rgb(dp);
            let (r, g, b) = blend_rgb(s, d, alpha);
            let out = info.dst_format.assemble_rgba(r, g, b, dst_alpha);
            write_packed(&mut dst_row[x * dbpp..], dbpp, out);
        }
    }
}

/// Per-pixel alpha. Fully transparent source pixels are skipped outright,
/// fully opaque ones copy their RGB exactly; in both the blend and the
/// copy case the destination's own alpha value is carried through
/// unchanged.
#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
#[inline(never)] // improve register budget.
pub(crate) fn pixel_alpha<'a>(info: &mut BlitRequest<'a>) {
    if info.width == 0 {
        return;
    }
    let sbpp = info.src_format.bytes_per_pixel;
    let dbpp = info.dst_format.bytes_per_pixel;

    for y in 0..info.height {
        let src_row = &info.src[y * info.src_pitch..][..info.width * sbpp];
        let dst_row = &mut info.dst[y * info.dst_pitch..][..info.width * dbpp];
        for x in 0..info.width {
            let sp = read_packed(&src_row[x * sbpp..], sbpp);
            let (sr, sg, sb, sa) = info.src_format.disassemble_rgba(sp);
            if unlikely(sa == 0) {
                continue;
            }
            let dp = read_packed(&dst_row[x * dbpp..], dbpp);
            let (dr, dg, db, da) = info.dst_format.disassemble_rgba(dp);
            let out = if sa == 255 {
                info.dst_format.assemble_rgba(sr, sg, sb, da)
            } else {
                let (r, g, b) = blend_rgb((sr, sg, sb), (dr, dg, db), sa);
                info.dst_format.assemble_rgba(r, g, b, da)
            };
            write_packed(&mut dst_row[x * dbpp..], dbpp, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[test]
    fn surface_alpha_blends_565_into_555() {
        let src_format = PixelFormat::rgb565().with_surface_alpha(128);
        let dst_format = PixelFormat::rgb555();
        let src = bytes_from_u16(&[0xFFFF, 0x0000]);
        let mut dst = bytes_from_u16(&[0x0000, 0x7FFF]);

        let mut info = request(
            &src, 4, &src_format, &mut dst, 4, &dst_format, 2, 1,
            BlitFlags::default(),
        );
        assert_eq!(select(&src_format, &dst_format, info.flags), BlitOp::NtoNSurfaceAlpha);
        BlitOp::NtoNSurfaceAlpha.execute(&mut info);

        let out = u16_from_bytes(&dst);
        // White over black at half weight: 127 per channel, packed to 555.
        assert_eq!(out[0], 0x3DEF);
        // Black over white: channels land on 127 as well.
        assert_eq!(out[1], 0x3DEF);
    }

    #[test]
    fn surface_alpha_zero_is_a_whole_blit_no_op() {
        let src_format = PixelFormat::rgb565().with_surface_alpha(0);
        let dst_format = PixelFormat::argb8888();
        let src = bytes_from_u16(&[0xFFFF]);
        let mut dst = bytes_from_u32(&[0x1234_5678]);

        let mut info = request(
            &src, 2, &src_format, &mut dst, 4, &dst_format, 1, 1,
            BlitFlags::default(),
        );
        BlitOp::NtoNSurfaceAlpha.execute(&mut info);

        // Not even the destination alpha byte is forced.
        assert_eq!(u32_from_bytes(&dst)[0], 0x1234_5678);
    }

    #[test]
    fn surface_alpha_forces_opaque_destination_alpha() {
        let src_format = PixelFormat::rgb565().with_surface_alpha(255);
        let dst_format = PixelFormat::argb8888();
        let src = bytes_from_u16(&[0x0000]);
        let mut dst = bytes_from_u32(&[0x1000_0000]);

        let mut info = request(
            &src, 2, &src_format, &mut dst, 4, &dst_format, 1, 1,
            BlitFlags::default(),
        );
        BlitOp::NtoNSurfaceAlpha.execute(&mut info);

        assert_eq!(u32_from_bytes(&dst)[0] & 0xFF00_0000, 0xFF00_0000);
    }

    #[test]
    fn colorkey_pixels_pass_through_untouched() {
        let src_format = PixelFormat::rgb565()
            .with_surface_alpha(255)
            .with_colorkey(0xF800);
        let dst_format = PixelFormat::rgb565();
        let src = bytes_from_u16(&[0xF800, 0x07E0, 0xF800]);
        let mut dst = bytes_from_u16(&[0x1111, 0x2222, 0x3333]);

        let mut info = request(
            &src, 6, &src_format, &mut dst, 6, &dst_format, 3, 1,
            BlitFlags { color_key: true, ..Default::default() },
        );
        BlitOp::NtoNSurfaceAlphaKey.execute(&mut info);

        let out = u16_from_bytes(&dst);
        assert_eq!(out[0], 0x1111); // keyed out
        assert_eq!(out[1], 0x07E0); // full-weight green replaces the pixel
        assert_eq!(out[2], 0x3333); // keyed out
    }

    #[test]
    fn pixel_alpha_skips_transparent_and_copies_opaque() {
        let src_format = PixelFormat::argb8888();
        let dst_format = PixelFormat::xrgb8888();
        let src = bytes_from_u32(&[
            0x00C8_6432, // transparent: (200, 100, 50, 0)
            0xFFC8_6432, // opaque: (200, 100, 50, 255)
        ]);
        let mut dst = bytes_from_u32(&[0x000A_141E, 0x000A_141E]);

        let mut info = request(
            &src, 8, &src_format, &mut dst, 8, &dst_format, 2, 1,
            BlitFlags { pixel_alpha: true, ..Default::default() },
        );
        BlitOp::NtoNPixelAlpha.execute(&mut info);

        let out = u32_from_bytes(&dst);
        assert_eq!(out[0], 0x000A_141E); // untouched
        assert_eq!(out[1], 0x00C8_6432); // exact copy, no rounding
    }

    #[test]
    fn pixel_alpha_preserves_destination_alpha() {
        let src_format = PixelFormat::argb8888();
        let dst_format = PixelFormat::argb8888();
        let src = bytes_from_u32(&[0x80FF_FFFF, 0xFFFF_FFFF]);
        let mut dst = bytes_from_u32(&[0x3300_0000, 0x3300_0000]);

        let mut info = request(
            &src, 8, &src_format, &mut dst, 8, &dst_format, 2, 1,
            BlitFlags { pixel_alpha: true, ..Default::default() },
        );
        BlitOp::NtoNPixelAlpha.execute(&mut info);

        let out = u32_from_bytes(&dst);
        assert_eq!(out[0] & 0xFF00_0000, 0x3300_0000);
        assert_eq!(out[1] & 0xFF00_0000, 0x3300_0000);
    }

    #[test]
    fn indexed_source_expands_through_its_palette() {
        let src_format = PixelFormat::indexed8().with_surface_alpha(255);
        let dst_format = PixelFormat::xrgb8888();
        let palette = Palette::ramp_332();
        let src = [0xFFu8, 0x00];
        let mut dst = bytes_from_u32(&[0, 0xFFFF_FFFF]);

        let mut info = request(
            &src, 2, &src_format, &mut dst, 8, &dst_format, 2, 1,
            BlitFlags::default(),
        );
        info.src_palette = Some(&palette);
        BlitOp::NtoNSurfaceAlpha.execute(&mut info);

        let out = u32_from_bytes(&dst);
        // Index 255 is white; full surface weight over black lands one
        // short of 255 per channel under the shift-based law.
        assert_eq!(out[0] & 0x00FF_FFFF, 0x00FE_FEFE);
        // Index 0 is black; blending down to it is exact.
        assert_eq!(out[1] & 0x00FF_FFFF, 0x0000_0000);
    }

    #[test]
    fn rows_advance_by_pitch_and_spare_the_padding() {
        let src_format = PixelFormat::rgb565().with_surface_alpha(255);
        let dst_format = PixelFormat::rgb565();
        // Two rows of one pixel each, pitch 4: two padding bytes per row.
        let src = bytes_from_u16(&[0xFFFF, 0xDEAD, 0x0000, 0xBEEF]);
        let mut dst = bytes_from_u16(&[0x0000, 0xAAAA, 0xFFFF, 0xBBBB]);

        let mut info = request(
            &src, 4, &src_format, &mut dst, 4, &dst_format, 1, 2,
            BlitFlags::default(),
        );
        BlitOp::NtoNSurfaceAlpha.execute(&mut info);

        let out = u16_from_bytes(&dst);
        assert_eq!(out[0], 0xFFFF);
        assert_eq!(out[1], 0xAAAA); // padding untouched
        assert_eq!(out[2], 0x0000);
        assert_eq!(out[3], 0xBBBB); // padding untouched
    }

    #[test]
    fn zero_area_requests_do_nothing() {
        let src_format = PixelFormat::rgb565().with_surface_alpha(255);
        let dst_format = PixelFormat::rgb565();
        let src: [u8; 0] = [];
        let mut dst = bytes_from_u16(&[0x1234]);

        let mut info = request(
            &src, 0, &src_format, &mut dst, 2, &dst_format, 0, 0,
            BlitFlags::default(),
        );
        BlitOp::NtoNSurfaceAlpha.execute(&mut info);
        assert_eq!(u16_from_bytes(&dst)[0], 0x1234);
    }
}
