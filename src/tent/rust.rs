use std::num::NonZeroUsize;

use crate::{pixel::Pixel, tent::tent3_pixel};

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
    for y in 0..height {
        let s = &src[y * src_pitch.get()..][..width];
        let d = &mut dest[y * dest_pitch.get()..][..width];
        for x in 0..width {
            d[x] = tent3_pixel(s[x.saturating_sub(1)], s[x], s[(x + 1).min(last)]);
        }
    }
}

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

    let row = |y: usize| &src[y * src_pitch.get()..][..width];
    for y in 0..height {
        let above = row(y.saturating_sub(1));
        let center = row(y);
        let below = row((y + 1).min(height - 1));
        let d = &mut dest[y * dest_pitch.get()..][..width];
        for x in 0..width {
            d[x] = tent3_pixel(above[x], center[x], below[x]);
        }
    }
}
