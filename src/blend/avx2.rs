#![allow(clippy::undocumented_unsafe_blocks)]

use std::{arch::x86_64::*, num::NonZeroUsize};

use crate::{blend::over, pixel::Pixel};

/// Copies the alpha byte of each pixel into all four of its channels.
const ALPHA_SHUFFLE: [i8; 32] = [
    3, 3, 3, 3, 7, 7, 7, 7, 11, 11, 11, 11, 15, 15, 15, 15, //
    3, 3, 3, 3, 7, 7, 7, 7, 11, 11, 11, 11, 15, 15, 15, 15,
];

/// `(p + (p >> 8)) >> 8` with `p = x * beta + 128`, on sixteen 16-bit lanes.
#[inline]
#[target_feature(enable = "avx2")]
fn mul_div255(x: __m256i, beta: __m256i) -> __m256i {
    let p = _mm256_add_epi16(_mm256_mullo_epi16(x, beta), _mm256_set1_epi16(128));
    _mm256_srli_epi16::<8>(_mm256_add_epi16(p, _mm256_srli_epi16::<8>(p)))
}

/// Composites premultiplied `src` over premultiplied `dest`, eight pixels at a time.
///
/// `255 - alpha` is the bitwise complement of alpha, so beta is a shuffle and an xor.
/// Products stay below 65536, so 16-bit lanes hold them without overflow.
#[target_feature(enable = "avx2")]
pub fn blend(
    dest: &mut [Pixel],
    dest_pitch: NonZeroUsize,
    src: &[Pixel],
    src_pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let width = width.get();
    let height = height.get();
    assert!(dest.len() >= dest_pitch.get() * (height - 1) + width);
    assert!(src.len() >= src_pitch.get() * (height - 1) + width);

    let dest = dest.as_mut_ptr();
    let src = src.as_ptr();

    for y in 0..height {
        unsafe {
            let shuffle = _mm256_loadu_si256(ALPHA_SHUFFLE.as_ptr() as *const __m256i);
            let ones = _mm256_set1_epi8(-1);
            let zero = _mm256_setzero_si256();

            let d_row = dest.add(y * dest_pitch.get());
            let s_row = src.add(y * src_pitch.get());

            let mut x = 0;
            while x + 8 <= width {
                let dp = d_row.add(x) as *mut __m256i;
                let d = _mm256_loadu_si256(dp);
                let s = _mm256_loadu_si256(s_row.add(x) as *const __m256i);
                let beta = _mm256_xor_si256(_mm256_shuffle_epi8(s, shuffle), ones);

                let lo = mul_div255(
                    _mm256_unpacklo_epi8(d, zero),
                    _mm256_unpacklo_epi8(beta, zero),
                );
                let hi = mul_div255(
                    _mm256_unpackhi_epi8(d, zero),
                    _mm256_unpackhi_epi8(beta, zero),
                );
                let t = _mm256_packus_epi16(lo, hi);
                _mm256_storeu_si256(dp, _mm256_adds_epu8(s, t));
                x += 8;
            }

            // Handle remaining pixels with scalar code
            while x < width {
                *d_row.add(x) = over(*d_row.add(x), *s_row.add(x));
                x += 1;
            }
        }
    }
}
