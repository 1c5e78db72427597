use std::num::NonZeroUsize;

use crate::{arith::ApplyOp, pixel::Pixel};

/// Combines a `width`x`height` region of `src` into `dest`, channel by channel.
///
/// # Parameters
/// - `dest`: Destination pixels, starting at the first pixel of the region
/// - `dest_pitch`: Number of pixels per row in the destination buffer
/// - `src`: Source pixels, starting at the first pixel of the region
/// - `src_pitch`: Number of pixels per row in the source buffer
/// - `width`: Width of the region in pixels
/// - `height`: Height of the region in pixels
/// - `op`: The per-channel operator
pub fn apply_region(
    dest: &mut [Pixel],
    dest_pitch: NonZeroUsize,
    src: &[Pixel],
    src_pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    op: ApplyOp,
) {
    let width = width.get();
    let height = height.get();
    assert!(dest.len() >= dest_pitch.get() * (height - 1) + width);
    assert!(src.len() >= src_pitch.get() * (height - 1) + width);

    for y in 0..height {
        let d_row = &mut dest[y * dest_pitch.get()..][..width];
        let s_row = &src[y * src_pitch.get()..][..width];
        for (d, s) in d_row.iter_mut().zip(s_row) {
            *d = op.combine_pixel(*d, *s);
        }
    }
}

/// Combines every pixel of a `width`x`height` region with `value`, in place.
pub fn apply_scalar(
    dest: &mut [Pixel],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    value: Pixel,
    op: ApplyOp,
) {
    let width = width.get();
    let height = height.get();
    assert!(dest.len() >= pitch.get() * (height - 1) + width);

    for y in 0..height {
        for d in &mut dest[y * pitch.get()..][..width] {
            *d = op.combine_pixel(*d, value);
        }
    }
}
