use std::num::NonZeroUsize;

use crate::{filter::Sample, pixel::Pixel, zoom::finish};

/// Applies one weight list per output column along every row.
///
/// Each channel is accumulated in 32 bits and rounded once at the end.
///
/// # Parameters
/// - `dest`: Destination buffer, at least `samples.len()` pixels wide
/// - `dest_pitch`: Number of pixels per row in the destination buffer
/// - `src`: Source buffer
/// - `src_pitch`: Number of pixels per row in the source buffer
/// - `height`: Number of rows to process
/// - `samples`: Weight list for each output column
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

    for y in 0..height {
        let s_row = &src[y * src_pitch.get()..];
        let d_row = &mut dest[y * dest_pitch.get()..][..samples.len()];
        for (d, sample) in d_row.iter_mut().zip(samples) {
            let taps = &s_row[sample.start..sample.start + sample.weights.len()];
            *d = convolve(taps.iter(), &sample.weights);
        }
    }
}

/// Applies one weight list per output row along every column.
pub fn zoom_vertical(
    dest: &mut [Pixel],
    dest_pitch: NonZeroUsize,
    src: &[Pixel],
    src_pitch: NonZeroUsize,
    width: NonZeroUsize,
    samples: &[Sample],
) {
    let width = width.get();
    let Some(rows) = NonZeroUsize::new(samples.len()) else {
        return;
    };
    assert!(dest.len() >= dest_pitch.get() * (rows.get() - 1) + width);

    for (y, sample) in samples.iter().enumerate() {
        let d_row = &mut dest[y * dest_pitch.get()..][..width];
        for (x, d) in d_row.iter_mut().enumerate() {
            let taps = (sample.start..sample.start + sample.weights.len())
                .map(|row| &src[row * src_pitch.get() + x]);
            *d = convolve(taps, &sample.weights);
        }
    }
}

#[inline]
fn convolve<'a>(taps: impl Iterator<Item = &'a Pixel>, weights: &[i32]) -> Pixel {
    let mut acc = [0i32; 4];
    for (p, &w) in taps.zip(weights) {
        for (a, c) in acc.iter_mut().zip(p.channels()) {
            *a += w * i32::from(c);
        }
    }
    Pixel::from_channels(acc.map(finish))
}
