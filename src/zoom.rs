#[cfg(target_arch = "x86_64")]
pub(crate) mod avx2;
pub(crate) mod rust;


use std::num::NonZeroUsize;

use crate::{
    error::{PictError, PictResult},
    filter::{ResampleFilter, Sample, WEIGHT_BIAS, WEIGHT_BITS, compute_weights},
    picture::Picture,
    pixel::Pixel,
    procs::PictProcs,
};

/// Kernel signature for a horizontal pass. The destination width is the
/// number of samples; `height` rows are processed.
pub type ZoomHorizontalFn =
    fn(&mut [Pixel], NonZeroUsize, &[Pixel], NonZeroUsize, NonZeroUsize, &[Sample]);

/// Kernel signature for a vertical pass. The destination height is the
/// number of samples; `width` columns are processed.
pub type ZoomVerticalFn =
    fn(&mut [Pixel], NonZeroUsize, &[Pixel], NonZeroUsize, NonZeroUsize, &[Sample]);

/// Rounds an accumulated fixed-point sum and clamps it to a channel value.
#[inline]
#[must_use]
pub fn finish(acc: i32) -> u8 {
    ((acc + WEIGHT_BIAS) >> WEIGHT_BITS).clamp(0, 255) as u8
}

/// Resamples each row of `src` to the width of `dest`.
///
/// Both pictures must have the same height.
pub fn zoom_horizontally(
    procs: &PictProcs,
    dest: &mut Picture,
    src: &Picture,
    filter: ResampleFilter,
) -> PictResult<()> {
    if dest.height() != src.height() {
        return Err(PictError::geometry(format!(
            "horizontal zoom needs equal heights, got {} and {}",
            dest.height(),
            src.height()
        )));
    }
    let weights = compute_weights(src.width(), dest.width(), filter)?;
    let dest_pitch = dest.stride();
    (procs.zoom_horizontal)(
        dest.pixels_mut(),
        dest_pitch,
        src.pixels(),
        src.stride(),
        src.height(),
        weights.samples(),
    );
    Ok(())
}

/// Resamples each column of `src` to the height of `dest`.
///
/// Both pictures must have the same width.
pub fn zoom_vertically(
    procs: &PictProcs,
    dest: &mut Picture,
    src: &Picture,
    filter: ResampleFilter,
) -> PictResult<()> {
    if dest.width() != src.width() {
        return Err(PictError::geometry(format!(
            "vertical zoom needs equal widths, got {} and {}",
            dest.width(),
            src.width()
        )));
    }
    let weights = compute_weights(src.height(), dest.height(), filter)?;
    let dest_pitch = dest.stride();
    (procs.zoom_vertical)(
        dest.pixels_mut(),
        dest_pitch,
        src.pixels(),
        src.stride(),
        src.width(),
        weights.samples(),
    );
    Ok(())
}

/// Resamples `src` to the dimensions of `dest`: a horizontal pass into an
/// intermediate picture of `dest.width()` x `src.height()`, then a vertical
/// pass into `dest`.
///
/// Every allocation happens before `dest` is written, so on failure `dest`
/// is unchanged.
pub fn resample_picture(
    procs: &PictProcs,
    dest: &mut Picture,
    src: &Picture,
    h_filter: ResampleFilter,
    v_filter: ResampleFilter,
) -> PictResult<()> {
    let h_weights = compute_weights(src.width(), dest.width(), h_filter)?;
    let v_weights = compute_weights(src.height(), dest.height(), v_filter)?;
    let mut tmp = Picture::new(dest.width().get(), src.height().get())?;

    let tmp_pitch = tmp.stride();
    (procs.zoom_horizontal)(
        tmp.pixels_mut(),
        tmp_pitch,
        src.pixels(),
        src.stride(),
        src.height(),
        h_weights.samples(),
    );

    let dest_pitch = dest.stride();
    (procs.zoom_vertical)(
        dest.pixels_mut(),
        dest_pitch,
        tmp.pixels(),
        tmp.stride(),
        tmp.width(),
        v_weights.samples(),
    );
    dest.set_flags(src.flags());
    Ok(())
}

/// Creates a `width` x `height` copy of `src` resampled with `filter` on both axes.
pub fn resize_picture(
    procs: &PictProcs,
    src: &Picture,
    width: usize,
    height: usize,
    filter: ResampleFilter,
) -> PictResult<Picture> {
    let mut dest = Picture::new(width, height)?;
    resample_picture(procs, &mut dest, src, filter, filter)?;
    Ok(dest)
}
