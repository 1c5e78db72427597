use std::num::NonZeroUsize;

use crate::{pixel::Pixel, select::in_range};

pub fn select_pixels(
    pixels: &mut [Pixel],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    lower: Pixel,
    upper: Pixel,
) {
    let width = width.get();
    assert!(pixels.len() >= pitch.get() * (height.get() - 1) + width);

    for y in 0..height.get() {
        for p in &mut pixels[y * pitch.get()..][..width] {
            *p = if in_range(*p, lower, upper) {
                Pixel::SELECTED
            } else {
                Pixel::TRANSPARENT
            };
        }
    }
}
