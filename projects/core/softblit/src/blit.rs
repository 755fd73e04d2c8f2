//! The validated one-shot entry point.

use crate::dispatch::select;
use crate::error::BlitError;
use crate::request::BlitRequest;

/// Validates a request, selects the best routine for its formats and flags,
/// and runs it.
///
/// Callers that issue many blits with the same formats and flags can hoist
/// the [`select`] call out of the loop and invoke
/// [`BlitOp::execute`](crate::BlitOp::execute) directly; this function is
/// the convenient single-shot form.
///
/// A request with `width == 0` or `height == 0` succeeds without touching
/// either buffer.
///
/// # Errors
///
/// - [`BlitError::UnsupportedDepth`] if either format declares a pixel
///   width outside 1..=4 bytes
/// - [`BlitError::PitchTooSmall`] if a pitch cannot hold one row of pixels
/// - [`BlitError::SourceTooSmall`] / [`BlitError::DestinationTooSmall`] if
///   a buffer cannot hold the requested rectangle
/// - [`BlitError::MissingPalette`] if an indexed surface arrives without
///   its palette
///
/// # Examples
///
/// ```
/// use softblit::{blit, BlitFlags, BlitRequest, PixelFormat};
///
/// let src_format = PixelFormat::argb8888();
/// let dst_format = PixelFormat::xrgb8888();
/// let src = 0xFF20_4060u32.to_ne_bytes(); // opaque (32, 64, 96)
/// let mut dst = [0u8; 4];
///
/// blit(&mut BlitRequest {
///     src: &src,
///     src_pitch: 4,
///     src_format: &src_format,
///     src_palette: None,
///     dst: &mut dst,
///     dst_pitch: 4,
///     dst_format: &dst_format,
///     dst_palette: None,
///     remap: None,
///     width: 1,
///     height: 1,
///     flags: BlitFlags { pixel_alpha: true, ..Default::default() },
/// })?;
///
/// assert_eq!(u32::from_ne_bytes(dst) & 0x00FF_FFFF, 0x0020_4060);
/// # Ok::<(), softblit::BlitError>(())
/// ```
pub fn blit(info: &mut BlitRequest<'_>) -> Result<(), BlitError> {
    validate(info)?;
    select(info.src_format, info.dst_format, info.flags).execute(info);
    Ok(())
}

fn validate(info: &BlitRequest<'_>) -> Result<(), BlitError> {
    if info.width == 0 || info.height == 0 {
        return Ok(());
    }

    let sbpp = info.src_format.bytes_per_pixel;
    let dbpp = info.dst_format.bytes_per_pixel;
    for bpp in [sbpp, dbpp] {
        if !(1..=4).contains(&bpp) {
            return Err(BlitError::UnsupportedDepth(bpp));
        }
    }

    for (pitch, bpp) in [(info.src_pitch, sbpp), (info.dst_pitch, dbpp)] {
        let needed = info.width * bpp;
        if pitch < needed {
            return Err(BlitError::PitchTooSmall { pitch, needed });
        }
    }

    // The last row only needs the tight pixel span, not a full pitch.
    let src_needed = (info.height - 1) * info.src_pitch + info.width * sbpp;
    if info.src.len() < src_needed {
        return Err(BlitError::SourceTooSmall {
            needed: src_needed,
            actual: info.src.len(),
        });
    }
    let dst_needed = (info.height - 1) * info.dst_pitch + info.width * dbpp;
    if info.dst.len() < dst_needed {
        return Err(BlitError::DestinationTooSmall {
            needed: dst_needed,
            actual: info.dst.len(),
        });
    }

    if (info.src_format.is_indexed() && info.src_palette.is_none())
        || (info.dst_format.is_indexed() && info.dst_palette.is_none())
    {
        return Err(BlitError::MissingPalette);
    }

    Ok(())
}
