//! # The Scalar Alpha-Blend Law
//!
//! Every compositing routine in the workspace, fast path or generic
//! fallback, agrees with the per-channel law implemented here:
//!
//! ```text
//! d' = d + (((s - d) * a) >> 8)
//! ```
//!
//! The `>> 8` stands in for a true division by 255. It trades one division
//! per channel for a bounded rounding error: at `a == 255` the result can
//! fall short of `s` by exactly 1 when `s > d` (for example
//! `0 + ((255 * 255) >> 8) == 254`). Callers that need exact pass-through
//! at full opacity special-case it before blending; the per-pixel-alpha
//! routines do exactly that. Replacing the shift with `/ 255` would change
//! the output of every blend and is deliberately not done.
//!
//! Useful properties, all covered by tests below:
//!
//! - `a == 0` leaves the destination untouched for any `s`.
//! - blending a value with itself is the identity for any `a`.
//! - the result always stays inside `[min(s, d), max(s, d)]`.

/// Blends one source channel into one destination channel with weight `a`.
#[inline]
pub const fn blend_channel(s: u8, d: u8, a: u8) -> u8 {
    (d as i32 + (((s as i32 - d as i32) * a as i32) >> 8)) as u8
}

/// Blends an RGB triple into a destination triple with weight `a`.
#[inline]
pub const fn blend_rgb(s: (u8, u8, u8), d: (u8, u8, u8), a: u8) -> (u8, u8, u8) {
    (
        blend_channel(s.0, d.0, a),
        blend_channel(s.1, d.1, a),
        blend_channel(s.2, d.2, a),
    )
}

/// Averages two 16-bit pixels in one step, the 50% special case of the
/// blend law.
///
/// `mask` selects everything except the lowest bit of each channel field
/// (0xF7DE for 565 layouts, 0xFBDE for 555). Halving the masked sum gives
/// the per-field average rounded down; the `s & d & !mask` term restores
/// the lost low bit when both inputs have it set.
#[inline]
pub const fn blend16_half(s: u16, d: u16, mask: u16) -> u16 {
    ((((s & mask) as u32 + (d & mask) as u32) >> 1) as u16) + (s & d & !mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(128)]
    #[case(254)]
    #[case(255)]
    fn blending_a_value_with_itself_is_identity(#[case] a: u8) {
        for v in [0u8, 1, 31, 127, 128, 200, 255] {
            assert_eq!(blend_channel(v, v, a), v);
        }
    }

    #[test]
    fn zero_weight_leaves_destination() {
        for s in [0u8, 17, 255] {
            for d in [0u8, 99, 255] {
                assert_eq!(blend_channel(s, d, 0), d);
            }
        }
    }

    #[test]
    fn full_weight_error_is_at_most_one() {
        for s in 0..=255u8 {
            for d in 0..=255u8 {
                let out = blend_channel(s, d, 255) as i32;
                let err = s as i32 - out;
                // d + ((s - d) * 255 >> 8) lands exactly on s when s <= d
                // and one below it when s > d.
                assert!(err == 0 || (err == 1 && s > d), "s={s} d={d} out={out}");
            }
        }
    }

    #[test]
    fn result_stays_between_source_and_destination() {
        for a in [0u8, 1, 77, 128, 254, 255] {
            for s in [0u8, 50, 200, 255] {
                for d in [0u8, 50, 200, 255] {
                    let out = blend_channel(s, d, a);
                    assert!(out >= s.min(d) && out <= s.max(d));
                }
            }
        }
    }

    #[test]
    fn half_blend_matches_the_law_per_field() {
        // White over black in 565: every field must land on its midpoint.
        assert_eq!(blend16_half(0xFFFF, 0x0000, 0xF7DE), 0x7BEF);
        // Equal inputs pass through exactly, low bits included.
        assert_eq!(blend16_half(0x1234, 0x1234, 0xF7DE), 0x1234);
    }
}
