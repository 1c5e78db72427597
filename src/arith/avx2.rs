#![allow(clippy::undocumented_unsafe_blocks)]

use std::{arch::x86_64::*, num::NonZeroUsize};

use crate::{arith::ApplyOp, pixel::Pixel};

/// Pixels handled per 256-bit vector.
const LANES: usize = 8;

/// Combines a `width`x`height` region of `src` into `dest`, channel by channel.
///
/// Eight pixels are processed per iteration with saturating byte arithmetic;
/// the remainder of each row falls back to [`ApplyOp::combine`].
#[target_feature(enable = "avx2")]
pub fn apply_region(
    dest: &mut [Pixel],
    dest_pitch: NonZeroUsize,
    src: &[Pixel],
    src_pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    op: ApplyOp,
) {
    // Check the array bounds once at the start of the loop.
    assert!(dest.len() >= dest_pitch.get() * (height.get() - 1) + width.get());
    assert!(src.len() >= src_pitch.get() * (height.get() - 1) + width.get());

    unsafe {
        apply_region_ptr(
            dest.as_mut_ptr(),
            dest_pitch.get(),
            src.as_ptr(),
            src_pitch.get(),
            width.get(),
            height.get(),
            op,
        );
    }
}

/// Combines every pixel of a `width`x`height` region with `value`, in place.
#[target_feature(enable = "avx2")]
pub fn apply_scalar(
    dest: &mut [Pixel],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    value: Pixel,
    op: ApplyOp,
) {
    assert!(dest.len() >= pitch.get() * (height.get() - 1) + width.get());

    let width = width.get();
    let pitch = pitch.get();
    let dest = dest.as_mut_ptr();
    let s = _mm256_set1_epi32(value.to_u32() as i32);

    for y in 0..height.get() {
        unsafe {
            let row = dest.add(y * pitch);
            let mut x = 0;
            while x + LANES <= width {
                let p = row.add(x) as *mut __m256i;
                let d = _mm256_loadu_si256(p);
                _mm256_storeu_si256(p, combine(op, d, s));
                x += LANES;
            }
            while x < width {
                *row.add(x) = op.combine_pixel(*row.add(x), value);
                x += 1;
            }
        }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn apply_region_ptr(
    dest: *mut Pixel,
    dest_pitch: usize,
    src: *const Pixel,
    src_pitch: usize,
    width: usize,
    height: usize,
    op: ApplyOp,
) {
    for y in 0..height {
        let d_row = dest.add(y * dest_pitch);
        let s_row = src.add(y * src_pitch);

        let mut x = 0;
        while x + LANES <= width {
            let dp = d_row.add(x) as *mut __m256i;
            let d = _mm256_loadu_si256(dp);
            let s = _mm256_loadu_si256(s_row.add(x) as *const __m256i);
            _mm256_storeu_si256(dp, combine(op, d, s));
            x += LANES;
        }

        // Handle remaining pixels with scalar code
        while x < width {
            *d_row.add(x) = op.combine_pixel(*d_row.add(x), *s_row.add(x));
            x += 1;
        }
    }
}

#[inline]
#[target_feature(enable = "avx2")]
fn combine(op: ApplyOp, d: __m256i, s: __m256i) -> __m256i {
    let ones = _mm256_set1_epi8(-1);
    match op {
        ApplyOp::Add => _mm256_adds_epu8(d, s),
        ApplyOp::Sub => _mm256_subs_epu8(d, s),
        ApplyOp::Rsub => _mm256_subs_epu8(s, d),
        ApplyOp::And => _mm256_and_si256(d, s),
        ApplyOp::Or => _mm256_or_si256(d, s),
        ApplyOp::Nand => _mm256_xor_si256(_mm256_and_si256(d, s), ones),
        ApplyOp::Nor => _mm256_xor_si256(_mm256_or_si256(d, s), ones),
        ApplyOp::Xor => _mm256_xor_si256(d, s),
        // Equal channels are indistinguishable, so the tie-break needs no extra work.
        ApplyOp::Min => _mm256_min_epu8(d, s),
        ApplyOp::Max => _mm256_max_epu8(d, s),
    }
}
