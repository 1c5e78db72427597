#![allow(clippy::undocumented_unsafe_blocks)]

use std::{arch::x86_64::*, num::NonZeroUsize};

use crate::{pixel::Pixel, select::in_range};

/// Replaces each pixel with all ones when every channel is inside
/// `[lower, upper]`, and with all zeros otherwise.
///
/// A channel `c` is in range when `max(c, lower) == c` and `min(c, upper) == c`.
/// The per-byte results are then reduced to a whole pixel with a 32-bit compare.
#[target_feature(enable = "avx2")]
pub fn select_pixels(
    pixels: &mut [Pixel],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    lower: Pixel,
    upper: Pixel,
) {
    assert!(pixels.len() >= pitch.get() * (height.get() - 1) + width.get());

    let width = width.get();
    let pitch = pitch.get();
    let base = pixels.as_mut_ptr();

    let lo = _mm256_set1_epi32(lower.to_u32() as i32);
    let hi = _mm256_set1_epi32(upper.to_u32() as i32);
    let ones = _mm256_set1_epi8(-1);

    for y in 0..height.get() {
        unsafe {
            let row = base.add(y * pitch);
            let mut x = 0;
            while x + 8 <= width {
                let p = row.add(x) as *mut __m256i;
                let v = _mm256_loadu_si256(p);
                let above = _mm256_cmpeq_epi8(_mm256_max_epu8(v, lo), v);
                let below = _mm256_cmpeq_epi8(_mm256_min_epu8(v, hi), v);
                let channels = _mm256_and_si256(above, below);
                _mm256_storeu_si256(p, _mm256_cmpeq_epi32(channels, ones));
                x += 8;
            }
            while x < width {
                let p = row.add(x);
                *p = if in_range(*p, lower, upper) {
                    Pixel::SELECTED
                } else {
                    Pixel::TRANSPARENT
                };
                x += 1;
            }
        }
    }
}
