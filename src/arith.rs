#[cfg(target_arch = "x86_64")]
pub(crate) mod avx2;
pub(crate) mod rust;


use std::{num::NonZeroUsize, str::FromStr};

use anyhow::{Result, bail};

use crate::{
    picture::{Picture, Region},
    pixel::Pixel,
    procs::PictProcs,
};

/// Kernel signature for combining a source region into a destination region.
pub type ApplyRegionFn =
    fn(&mut [Pixel], NonZeroUsize, &[Pixel], NonZeroUsize, NonZeroUsize, NonZeroUsize, ApplyOp);

/// Kernel signature for combining a constant pixel into a region.
pub type ApplyScalarFn = fn(&mut [Pixel], NonZeroUsize, NonZeroUsize, NonZeroUsize, Pixel, ApplyOp);

/// Per-channel operator applied by [`apply_picture_to_picture`] and
/// [`apply_scalar_to_picture`]. `d` is the destination channel and `s` the
/// source (or constant) channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplyOp {
    /// `min(d + s, 255)`
    Add,
    /// `max(d - s, 0)`
    Sub,
    /// `max(s - d, 0)`
    Rsub,
    And,
    Or,
    /// `!(d & s)`
    Nand,
    /// `!(d | s)`
    Nor,
    Xor,
    /// `d` when `d <= s`, otherwise `s`. Ties keep the destination.
    Min,
    /// `s` when `d <= s`, otherwise `d`. Ties take the source.
    Max,
}

impl ApplyOp {
    pub const ALL: [Self; 10] = [
        Self::Add,
        Self::Sub,
        Self::Rsub,
        Self::And,
        Self::Or,
        Self::Nand,
        Self::Nor,
        Self::Xor,
        Self::Min,
        Self::Max,
    ];

    /// Combines one destination channel with one source channel.
    #[inline]
    #[must_use]
    pub fn combine(self, d: u8, s: u8) -> u8 {
        match self {
            Self::Add => d.saturating_add(s),
            Self::Sub => d.saturating_sub(s),
            Self::Rsub => s.saturating_sub(d),
            Self::And => d & s,
            Self::Or => d | s,
            Self::Nand => !(d & s),
            Self::Nor => !(d | s),
            Self::Xor => d ^ s,
            Self::Min => {
                if d <= s {
                    d
                } else {
                    s
                }
            }
            Self::Max => {
                if d <= s {
                    s
                } else {
                    d
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn combine_pixel(self, d: Pixel, s: Pixel) -> Pixel {
        d.zip_with(s, |d, s| self.combine(d, s))
    }
}

impl FromStr for ApplyOp {
    type Err = anyhow::Error;

    fn from_str(val: &str) -> Result<Self> {
        Ok(match val {
            "add" => Self::Add,
            "subtract" | "sub" => Self::Sub,
            "rsub" | "rsubtract" => Self::Rsub,
            "and" => Self::And,
            "or" => Self::Or,
            "nand" => Self::Nand,
            "nor" => Self::Nor,
            "xor" => Self::Xor,
            "min" => Self::Min,
            "max" => Self::Max,
            _ => bail!(
                "Invalid operator '{val}', must be add, subtract, rsub, and, or, nand, nor, xor, min, or max."
            ),
        })
    }
}

/// Combines the `w`x`h` region of `src` at (`src_x`, `src_y`) into `dest` at
/// (`dest_x`, `dest_y`).
///
/// A region that runs past either picture is clipped to fit. A region that
/// starts outside either picture does nothing. Picture flags are not changed.
pub fn apply_picture_to_picture(
    procs: &PictProcs,
    dest: &mut Picture,
    src: &Picture,
    src_x: usize,
    src_y: usize,
    w: usize,
    h: usize,
    dest_x: usize,
    dest_y: usize,
    op: ApplyOp,
) {
    let Some(region) = Region::clip(dest, dest_x, dest_y, src, src_x, src_y, w, h) else {
        return;
    };
    let dest_pitch = dest.stride();
    (procs.apply_region)(
        dest.tail_mut(dest_x, dest_y),
        dest_pitch,
        src.tail(src_x, src_y),
        src.stride(),
        region.width,
        region.height,
        op,
    );
}

/// Combines every visible pixel of `dest` with the constant `value`, in place.
pub fn apply_scalar_to_picture(procs: &PictProcs, dest: &mut Picture, value: Pixel, op: ApplyOp) {
    let (pitch, width, height) = (dest.stride(), dest.width(), dest.height());
    (procs.apply_scalar)(dest.pixels_mut(), pitch, width, height, value, op);
}
