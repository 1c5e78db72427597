#[cfg(target_arch = "x86_64")]
pub(crate) mod avx2;
pub(crate) mod rust;


use std::num::NonZeroUsize;

use crate::{
    picture::{Picture, Region},
    pixel::Pixel,
    procs::PictProcs,
};

/// Kernel signature for compositing `src` over `dest`: `dest`, `dest_pitch`,
/// `src`, `src_pitch`, `width`, `height`.
pub type BlendFn = fn(&mut [Pixel], NonZeroUsize, &[Pixel], NonZeroUsize, NonZeroUsize, NonZeroUsize);

/// Approximates `x * beta / 255` for `x, beta <= 255`.
///
/// `p = x * beta + 128`, then `(p + (p >> 8)) >> 8`. The result is exact for
/// `beta == 0` and `beta == 255`.
#[inline]
#[must_use]
pub fn mul_div255(x: u8, beta: u8) -> u8 {
    let p = u16::from(x) * u16::from(beta) + 128;
    ((p + (p >> 8)) >> 8) as u8
}

/// Composites one premultiplied pixel over another.
///
/// Every channel, alpha included, becomes `s + d * (255 - s.a) / 255`,
/// saturated to 255.
#[inline]
#[must_use]
pub fn over(d: Pixel, s: Pixel) -> Pixel {
    let beta = 255 - s.a;
    s.zip_with(d, |s, d| s.saturating_add(mul_div255(d, beta)))
}

/// Composites the premultiplied `src` over the premultiplied `dest`, both
/// anchored at the origin, over the area they share.
///
/// The premultiplied precondition is not checked. Run
/// [`crate::associate::associate_colors`] on unassociated inputs first.
pub fn blend_pictures(procs: &PictProcs, dest: &mut Picture, src: &Picture) {
    blend_region(
        procs,
        dest,
        src,
        0,
        0,
        src.width().get(),
        src.height().get(),
        0,
        0,
    );
}

/// Composites the `w`x`h` region of `src` at (`src_x`, `src_y`) over `dest`
/// at (`dest_x`, `dest_y`), clipped to both pictures.
pub fn blend_region(
    procs: &PictProcs,
    dest: &mut Picture,
    src: &Picture,
    src_x: usize,
    src_y: usize,
    w: usize,
    h: usize,
    dest_x: usize,
    dest_y: usize,
) {
    let Some(region) = Region::clip(dest, dest_x, dest_y, src, src_x, src_y, w, h) else {
        return;
    };
    let dest_pitch = dest.stride();
    (procs.blend)(
        dest.tail_mut(dest_x, dest_y),
        dest_pitch,
        src.tail(src_x, src_y),
        src.stride(),
        region.width,
        region.height,
    );
}
