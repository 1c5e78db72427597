#[cfg(target_arch = "x86_64")]
pub(crate) mod avx2;
pub(crate) mod rust;

#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;

use crate::{
    error::PictResult,
    picture::{Picture, PictureFlags},
    pixel::Pixel,
    procs::PictProcs,
};

/// Kernel signature for in-place range selection.
pub type SelectFn = fn(&mut [Pixel], NonZeroUsize, NonZeroUsize, NonZeroUsize, Pixel, Pixel);

/// Whether every channel of `p` lies inside `[lower, upper]`, bounds included.
#[inline]
#[must_use]
pub fn in_range(p: Pixel, lower: Pixel, upper: Pixel) -> bool {
    p.channels()
        .iter()
        .zip(lower.channels())
        .zip(upper.channels())
        .all(|((c, lo), hi)| (lo..=hi).contains(c))
}

/// Turns `pict` into a selection mask, in place.
///
/// A pixel becomes [`Pixel::SELECTED`] when all four channels are within
/// `[lower, upper]`, and [`Pixel::TRANSPARENT`] otherwise.
pub fn select_pixels_in_place(procs: &PictProcs, pict: &mut Picture, lower: Pixel, upper: Pixel) {
    let (pitch, width, height) = (pict.stride(), pict.width(), pict.height());
    (procs.select)(pict.pixels_mut(), pitch, width, height, lower, upper);
    pict.remove_flags(PictureFlags::BLEND);
    pict.insert_flags(PictureFlags::MASK);
}

/// Writes the selection mask of `src` into `dest`, resizing `dest` to match.
///
/// `dest` is left untouched if it has to be resized and the allocation fails.
pub fn select_pixels(
    procs: &PictProcs,
    dest: &mut Picture,
    src: &Picture,
    lower: Pixel,
    upper: Pixel,
) -> PictResult<()> {
    let (width, height) = (src.width().get(), src.height().get());
    dest.resize(width, height)?;
    dest.copy_region(src, 0, 0, width, height, 0, 0);
    select_pixels_in_place(procs, dest, lower, upper);
    Ok(())
}
