#![allow(clippy::undocumented_unsafe_blocks)]

use std::{arch::x86_64::*, num::NonZeroUsize};

use crate::{
    filter::{Sample, WEIGHT_BIAS, WEIGHT_BITS},
    pixel::Pixel,
    zoom::finish,
};

/// Applies one weight list per output column along every row.
///
/// The four channels of a pixel are widened to 32-bit lanes, so each tap is
/// a single multiply-add. Rounding and clamping use the same constants as
/// the scalar path: add the bias, arithmetic shift, then saturate through
/// the signed 16-bit and unsigned 8-bit packs.
#[target_feature(enable = "avx2")]
pub fn zoom_horizontal(
    dest: &mut [Pixel],
    dest_pitch: NonZeroUsize,
    src: &[Pixel],
    src_pitch: NonZeroUsize,
    height: NonZeroUsize,
    samples: &[Sample],
) {
    let height = height.get();
    assert!(dest.len() >= dest_pitch.get() * (height - 1) + samples.len());
    for sample in samples {
        assert!(src.len() >= src_pitch.get() * (height - 1) + sample.start + sample.weights.len());
    }

    let dest = dest.as_mut_ptr();
    let src = src.as_ptr();
    let bias = _mm_set1_epi32(WEIGHT_BIAS);

    for y in 0..height {
        unsafe {
            let s_row = src.add(y * src_pitch.get());
            let d_row = dest.add(y * dest_pitch.get());
            for (x, sample) in samples.iter().enumerate() {
                let taps = s_row.add(sample.start);
                let mut acc = _mm_setzero_si128();
                for (k, &w) in sample.weights.iter().enumerate() {
                    let p = _mm_cvtepu8_epi32(_mm_cvtsi32_si128((*taps.add(k)).to_u32() as i32));
                    acc = _mm_add_epi32(acc, _mm_mullo_epi32(p, _mm_set1_epi32(w)));
                }
                let v = _mm_srai_epi32::<{ WEIGHT_BITS as i32 }>(_mm_add_epi32(acc, bias));
                let packed = _mm_packus_epi16(_mm_packs_epi32(v, v), _mm_setzero_si128());
                *d_row.add(x) = Pixel::from_u32(_mm_cvtsi128_si32(packed) as u32);
            }
        }
    }
}

/// Applies one weight list per output row along every column.
///
/// Four pixels (sixteen channels) are accumulated per iteration in two
/// vectors of eight 32-bit lanes.
#[target_feature(enable = "avx2")]
pub fn zoom_vertical(
    dest: &mut [Pixel],
    dest_pitch: NonZeroUsize,
    src: &[Pixel],
    src_pitch: NonZeroUsize,
    width: NonZeroUsize,
    samples: &[Sample],
) {
    let width = width.get();
    if samples.is_empty() {
        return;
    }
    assert!(dest.len() >= dest_pitch.get() * (samples.len() - 1) + width);
    for sample in samples {
        assert!(src.len() >= src_pitch.get() * (sample.start + sample.weights.len() - 1) + width);
    }

    let dest = dest.as_mut_ptr();
    let src = src.as_ptr();
    let src_pitch = src_pitch.get();
    let bias = _mm256_set1_epi32(WEIGHT_BIAS);

    for (y, sample) in samples.iter().enumerate() {
        unsafe {
            let d_row = dest.add(y * dest_pitch.get());
            let first = src.add(sample.start * src_pitch);

            let mut x = 0;
            while x + 4 <= width {
                let mut acc_lo = _mm256_setzero_si256();
                let mut acc_hi = _mm256_setzero_si256();
                for (k, &w) in sample.weights.iter().enumerate() {
                    let v = _mm_loadu_si128(first.add(k * src_pitch + x) as *const __m128i);
                    let w = _mm256_set1_epi32(w);
                    let lo = _mm256_cvtepu8_epi32(v);
                    let hi = _mm256_cvtepu8_epi32(_mm_srli_si128::<8>(v));
                    acc_lo = _mm256_add_epi32(acc_lo, _mm256_mullo_epi32(lo, w));
                    acc_hi = _mm256_add_epi32(acc_hi, _mm256_mullo_epi32(hi, w));
                }
                let lo = _mm256_srai_epi32::<{ WEIGHT_BITS as i32 }>(_mm256_add_epi32(acc_lo, bias));
                let hi = _mm256_srai_epi32::<{ WEIGHT_BITS as i32 }>(_mm256_add_epi32(acc_hi, bias));
                // packs works within 128-bit lanes; restore pixel order before narrowing again
                let words = _mm256_permute4x64_epi64::<0b11_01_10_00>(_mm256_packs_epi32(lo, hi));
                let bytes = _mm_packus_epi16(
                    _mm256_castsi256_si128(words),
                    _mm256_extracti128_si256::<1>(words),
                );
                _mm_storeu_si128(d_row.add(x) as *mut __m128i, bytes);
                x += 4;
            }

            // Handle remaining pixels with scalar code
            while x < width {
                let mut acc = [0i32; 4];
                for (k, &w) in sample.weights.iter().enumerate() {
                    let c = (*first.add(k * src_pitch + x)).channels();
                    for (a, c) in acc.iter_mut().zip(c) {
                        *a += w * i32::from(c);
                    }
                }
                *d_row.add(x) = Pixel::from_channels(acc.map(finish));
                x += 1;
            }
        }
    }
}
