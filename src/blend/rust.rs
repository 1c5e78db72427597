use std::num::NonZeroUsize;

use crate::{blend::over, pixel::Pixel};

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

    for y in 0..height {
        let d_row = &mut dest[y * dest_pitch.get()..][..width];
        let s_row = &src[y * src_pitch.get()..][..width];
        for (d, s) in d_row.iter_mut().zip(s_row) {
            *d = over(*d, *s);
        }
    }
}
