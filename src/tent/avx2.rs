#![allow(clippy::undocumented_unsafe_blocks)]

use std::{arch::x86_64::*, num::NonZeroUsize};

use crate::{pixel::Pixel, tent::tent3_pixel};

/// `(a + 2b + c + 2) >> 2` on sixteen 16-bit lanes.
#[inline]
#[target_feature(enable = "avx2")]
fn tent_words(a: __m256i, b: __m256i, c: __m256i) -> __m256i {
    let sum = _mm256_add_epi16(
        _mm256_add_epi16(a, _mm256_slli_epi16::<1>(b)),
        _mm256_add_epi16(c, _mm256_set1_epi16(2)),
    );
    _mm256_srli_epi16::<2>(sum)
}

/// `(a + 2b + c + 2) >> 2` on 32 channels, widened to 16 bits.
#[inline]
#[target_feature(enable = "avx2")]
fn tent_vec(a: __m256i, b: __m256i, c: __m256i) -> __m256i {
    let zero = _mm256_setzero_si256();
    let lo = tent_words(
        _mm256_unpacklo_epi8(a, zero),
        _mm256_unpacklo_epi8(b, zero),
        _mm256_unpacklo_epi8(c, zero),
    );
    let hi = tent_words(
        _mm256_unpackhi_epi8(a, zero),
        _mm256_unpackhi_epi8(b, zero),
        _mm256_unpackhi_epi8(c, zero),
    );
    _mm256_packus_epi16(lo, hi)
}

/// Smooths each row with a 1:2:1 kernel, replicating the edge pixels.
///
/// Interior pixels are processed eight at a time from three overlapping
/// loads; the two edge pixels and the tail of each row use scalar code.
#[target_feature(enable = "avx2")]
pub fn tent_horizontal(
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

    let last = width - 1;
    let dest = dest.as_mut_ptr();
    let src = src.as_ptr();

    for y in 0..height {
        unsafe {
            let s = src.add(y * src_pitch.get());
            let d = dest.add(y * dest_pitch.get());

            *d = tent3_pixel(*s, *s, *s.add(1.min(last)));
            let mut x = 1;
            while x + 9 <= width {
                let a = _mm256_loadu_si256(s.add(x - 1) as *const __m256i);
                let b = _mm256_loadu_si256(s.add(x) as *const __m256i);
                let c = _mm256_loadu_si256(s.add(x + 1) as *const __m256i);
                _mm256_storeu_si256(d.add(x) as *mut __m256i, tent_vec(a, b, c));
                x += 8;
            }
            while x < width {
                *d.add(x) = tent3_pixel(*s.add(x - 1), *s.add(x), *s.add((x + 1).min(last)));
                x += 1;
            }
        }
    }
}

/// Smooths each column with a 1:2:1 kernel, replicating the edge rows.
#[target_feature(enable = "avx2")]
pub fn tent_vertical(
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
            let above = src.add(y.saturating_sub(1) * src_pitch.get());
            let center = src.add(y * src_pitch.get());
            let below = src.add((y + 1).min(height - 1) * src_pitch.get());
            let d = dest.add(y * dest_pitch.get());

            let mut x = 0;
            while x + 8 <= width {
                let a = _mm256_loadu_si256(above.add(x) as *const __m256i);
                let b = _mm256_loadu_si256(center.add(x) as *const __m256i);
                let c = _mm256_loadu_si256(below.add(x) as *const __m256i);
                _mm256_storeu_si256(d.add(x) as *mut __m256i, tent_vec(a, b, c));
                x += 8;
            }
            while x < width {
                *d.add(x) = tent3_pixel(*above.add(x), *center.add(x), *below.add(x));
                x += 1;
            }
        }
    }
}
