#[cfg(target_arch = "x86_64")]
pub(crate) mod avx2;
pub(crate) mod rust;


use std::num::NonZeroUsize;

use crate::{
    error::{PictError, PictResult},
    picture::Picture,
    pixel::Pixel,
    procs::PictProcs,
};

/// Kernel signature for a 1:2:1 pass: `dest`, `dest_pitch`, `src`,
/// `src_pitch`, `width`, `height`.
pub type TentFn = fn(&mut [Pixel], NonZeroUsize, &[Pixel], NonZeroUsize, NonZeroUsize, NonZeroUsize);

/// `(a + 2b + c + 2) / 4` for one channel.
#[inline]
#[must_use]
pub fn tent3(a: u8, b: u8, c: u8) -> u8 {
    ((u16::from(a) + 2 * u16::from(b) + u16::from(c) + 2) >> 2) as u8
}

#[inline]
#[must_use]
pub fn tent3_pixel(a: Pixel, b: Pixel, c: Pixel) -> Pixel {
    Pixel::new(
        tent3(a.r, b.r, c.r),
        tent3(a.g, b.g, c.g),
        tent3(a.b, b.b, c.b),
        tent3(a.a, b.a, c.a),
    )
}

fn check_same_size(dest: &Picture, src: &Picture) -> PictResult<()> {
    if dest.width() != src.width() || dest.height() != src.height() {
        return Err(PictError::geometry(format!(
            "tent filter needs equal sizes, got {}x{} and {}x{}",
            dest.width(),
            dest.height(),
            src.width(),
            src.height()
        )));
    }
    Ok(())
}

/// Smooths each row of `src` into `dest` with a 1:2:1 kernel.
///
/// The first and last pixel of a row use themselves as their missing neighbour.
pub fn tent_horizontally(procs: &PictProcs, dest: &mut Picture, src: &Picture) -> PictResult<()> {
    check_same_size(dest, src)?;
    let dest_pitch = dest.stride();
    (procs.tent_horizontal)(
        dest.pixels_mut(),
        dest_pitch,
        src.pixels(),
        src.stride(),
        src.width(),
        src.height(),
    );
    Ok(())
}

/// Smooths each column of `src` into `dest` with a 1:2:1 kernel.
///
/// The first and last row use themselves as their missing neighbour.
pub fn tent_vertically(procs: &PictProcs, dest: &mut Picture, src: &Picture) -> PictResult<()> {
    check_same_size(dest, src)?;
    let dest_pitch = dest.stride();
    (procs.tent_vertical)(
        dest.pixels_mut(),
        dest_pitch,
        src.pixels(),
        src.stride(),
        src.width(),
        src.height(),
    );
    Ok(())
}

/// Blurs `src` on both axes into a new picture.
pub fn tent_picture(procs: &PictProcs, src: &Picture) -> PictResult<Picture> {
    let (width, height) = (src.width().get(), src.height().get());
    let mut tmp = Picture::new(width, height)?;
    let mut dest = Picture::new(width, height)?;
    tent_horizontally(procs, &mut tmp, src)?;
    tent_vertically(procs, &mut dest, &tmp)?;
    dest.set_flags(src.flags());
    Ok(dest)
}
