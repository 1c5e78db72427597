
use std::{f64::consts::PI, num::NonZeroUsize, str::FromStr};

use anyhow::{Result, bail};
use smallvec::SmallVec;

use crate::error::{PictError, PictResult};

/// Fractional bits of a fixed-point weight. `1.0` is stored as `1 << WEIGHT_BITS`.
pub const WEIGHT_BITS: u32 = 14;
pub const WEIGHT_ONE: i32 = 1 << WEIGHT_BITS;
/// Added before the final shift so the result is rounded to nearest.
pub const WEIGHT_BIAS: i32 = 1 << (WEIGHT_BITS - 1);

/// A continuous resampling kernel with a bounded support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResampleFilter {
    Box,
    Triangle,
    Bell,
    BSpline,
    CatmullRom,
    Gaussian,
    Hermite,
    Lanczos3,
    Mitchell,
    /// Blackman-windowed sinc.
    Sinc,
    Blackman,
}

impl ResampleFilter {
    pub const ALL: [Self; 11] = [
        Self::Box,
        Self::Triangle,
        Self::Bell,
        Self::BSpline,
        Self::CatmullRom,
        Self::Gaussian,
        Self::Hermite,
        Self::Lanczos3,
        Self::Mitchell,
        Self::Sinc,
        Self::Blackman,
    ];

    /// Half-width of the kernel. [`Self::evaluate`] is zero beyond it.
    #[must_use]
    pub fn support(self) -> f64 {
        match self {
            Self::Box => 0.5,
            Self::Triangle | Self::Hermite | Self::Blackman => 1.0,
            Self::Bell => 1.5,
            Self::Gaussian => 1.25,
            Self::BSpline | Self::CatmullRom | Self::Mitchell => 2.0,
            Self::Lanczos3 => 3.0,
            Self::Sinc => 4.0,
        }
    }

    #[must_use]
    pub fn evaluate(self, x: f64) -> f64 {
        let t = x.abs();
        if t > self.support() {
            return 0.0;
        }
        match self {
            // Half-open so that neighbouring samples never share a boundary.
            Self::Box => {
                if x > -0.5 && x <= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Triangle => 1.0 - t,
            Self::Bell => {
                if t < 0.5 {
                    0.75 - t * t
                } else {
                    let u = t - 1.5;
                    0.5 * u * u
                }
            }
            Self::BSpline => {
                if t < 1.0 {
                    (0.5 * t - 1.0).mul_add(t * t, 2.0 / 3.0)
                } else {
                    let u = 2.0 - t;
                    u * u * u / 6.0
                }
            }
            Self::CatmullRom => {
                if t < 1.0 {
                    (1.5 * t - 2.5).mul_add(t * t, 1.0)
                } else {
                    ((-0.5 * t + 2.5) * t - 4.0).mul_add(t, 2.0)
                }
            }
            Self::Gaussian => (-2.0 * t * t).exp() * (2.0 / PI).sqrt(),
            Self::Hermite => (2.0 * t - 3.0).mul_add(t * t, 1.0),
            Self::Lanczos3 => sinc(t) * sinc(t / 3.0),
            Self::Mitchell => mitchell(t),
            Self::Sinc => sinc(t) * blackman_window(t / 4.0),
            Self::Blackman => blackman_window(t),
        }
    }
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let x = x * PI;
        x.sin() / x
    }
}

fn blackman_window(x: f64) -> f64 {
    0.42 + 0.5 * (PI * x).cos() + 0.08 * (2.0 * PI * x).cos()
}

/// Mitchell-Netravali cubic with B = C = 1/3.
fn mitchell(t: f64) -> f64 {
    const B: f64 = 1.0 / 3.0;
    const C: f64 = 1.0 / 3.0;
    let t2 = t * t;
    let t3 = t2 * t;
    let v = if t < 1.0 {
        (12.0 - 9.0 * B - 6.0 * C) * t3 + (-18.0 + 12.0 * B + 6.0 * C) * t2 + (6.0 - 2.0 * B)
    } else {
        (-B - 6.0 * C) * t3 + (6.0 * B + 30.0 * C) * t2 + (-12.0 * B - 48.0 * C) * t
            + (8.0 * B + 24.0 * C)
    };
    v / 6.0
}

impl FromStr for ResampleFilter {
    type Err = anyhow::Error;

    fn from_str(val: &str) -> Result<Self> {
        Ok(match val {
            "box" => Self::Box,
            "triangle" | "tent" => Self::Triangle,
            "bell" => Self::Bell,
            "bspline" => Self::BSpline,
            "catrom" => Self::CatmullRom,
            "gaussian" => Self::Gaussian,
            "hermite" => Self::Hermite,
            "lanczos3" => Self::Lanczos3,
            "mitchell" => Self::Mitchell,
            "sinc" => Self::Sinc,
            "blackman" => Self::Blackman,
            _ => bail!("Invalid filter '{val}'."),
        })
    }
}

/// The source samples contributing to one output sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Index of the first contributing source sample.
    pub start: usize,
    /// Fixed-point weights for `start`, `start + 1`, and so on.
    pub weights: SmallVec<[i32; 8]>,
}

/// One [`Sample`] per output coordinate along an axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    src_len: NonZeroUsize,
    samples: Vec<Sample>,
}

impl WeightTable {
    #[must_use]
    pub fn src_len(&self) -> NonZeroUsize {
        self.src_len
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn dest_len(&self) -> usize {
        self.samples.len()
    }
}

/// Computes the weights for resizing an axis of `src_len` samples to `dest_len`.
///
/// Output sample `i` is centred on source coordinate `(i + 0.5) * src / dest - 0.5`.
/// When shrinking, the kernel is stretched by `src / dest` so that every
/// source sample contributes. Taps are clipped to the source, renormalised to
/// sum to one, and converted to fixed point by rounding their running total.
/// Each sample sums to exactly [`WEIGHT_ONE`] and every tap is within one unit
/// of its exact value.
pub fn compute_weights(
    src_len: NonZeroUsize,
    dest_len: NonZeroUsize,
    filter: ResampleFilter,
) -> PictResult<WeightTable> {
    let (src_n, dest_n) = (src_len.get(), dest_len.get());
    let ratio = src_n as f64 / dest_n as f64;
    let (radius, fscale) = if ratio > 1.0 {
        (filter.support() * ratio, 1.0 / ratio)
    } else {
        (filter.support(), 1.0)
    };
    log::trace!("computing {dest_n} weights from {src_n} samples with {filter:?}, radius {radius}");

    let mut samples = Vec::new();
    samples
        .try_reserve_exact(dest_n)
        .map_err(|_| PictError::out_of_memory("resample weights"))?;
    let last = (src_n - 1) as f64;

    for i in 0..dest_n {
        let center = (i as f64 + 0.5).mul_add(ratio, -0.5);
        let left = (center - radius).ceil().clamp(0.0, last) as usize;
        let right = (center + radius).floor().clamp(0.0, last) as usize;

        let mut raw: SmallVec<[f64; 8]> = SmallVec::new();
        raw.try_reserve(right + 1 - left.min(right))
            .map_err(|_| PictError::out_of_memory("resample weights"))?;
        let mut sum = 0.0;
        for j in left..=right {
            let w = filter.evaluate((j as f64 - center) * fscale);
            raw.push(w);
            sum += w;
        }

        let mut weights: SmallVec<[i32; 8]> = SmallVec::new();
        weights
            .try_reserve(raw.len())
            .map_err(|_| PictError::out_of_memory("resample weights"))?;
        if sum == 0.0 {
            // Nothing under the kernel: take the nearest sample.
            let nearest = center.round().clamp(0.0, last) as usize;
            weights.push(WEIGHT_ONE);
            samples.push(Sample {
                start: nearest,
                weights,
            });
            continue;
        }

        // Round the running total, not each tap.
        let factor = f64::from(WEIGHT_ONE) / sum;
        let (mut cum, mut prev) = (0.0f64, 0i32);
        for (k, w) in raw.iter().enumerate() {
            cum += w;
            let next = if k + 1 == raw.len() {
                WEIGHT_ONE
            } else {
                (cum * factor).round() as i32
            };
            weights.push(next - prev);
            prev = next;
        }
        samples.push(Sample {
            start: left,
            weights,
        });
    }

    Ok(WeightTable { src_len, samples })
}
