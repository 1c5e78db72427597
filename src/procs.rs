use std::sync::OnceLock;

use crate::{
    arith::{self, ApplyRegionFn, ApplyScalarFn},
    blend::{self, BlendFn},
    cpu,
    select::{self, SelectFn},
    tent::{self, TentFn},
    zoom::{self, ZoomHorizontalFn, ZoomVerticalFn},
};

/// The kernels every picture-level operation dispatches through.
///
/// A table is filled once and never changes afterwards, so it can be copied
/// freely and shared between threads.
#[derive(Debug, Clone, Copy)]
pub struct PictProcs {
    pub(crate) apply_region: ApplyRegionFn,
    pub(crate) apply_scalar: ApplyScalarFn,
    pub(crate) select: SelectFn,
    pub(crate) zoom_horizontal: ZoomHorizontalFn,
    pub(crate) zoom_vertical: ZoomVerticalFn,
    pub(crate) tent_horizontal: TentFn,
    pub(crate) tent_vertical: TentFn,
    pub(crate) blend: BlendFn,
    accelerated: bool,
}

static GLOBAL: OnceLock<PictProcs> = OnceLock::new();

impl PictProcs {
    /// The portable kernels, whatever the processor supports.
    #[must_use]
    pub fn scalar() -> Self {
        Self {
            apply_region: arith::rust::apply_region,
            apply_scalar: arith::rust::apply_scalar,
            select: select::rust::select_pixels,
            zoom_horizontal: zoom::rust::zoom_horizontal,
            zoom_vertical: zoom::rust::zoom_vertical,
            tent_horizontal: tent::rust::tent_horizontal,
            tent_vertical: tent::rust::tent_vertical,
            blend: blend::rust::blend,
            accelerated: false,
        }
    }

    /// The fastest kernels the running processor supports.
    #[must_use]
    pub fn detect() -> Self {
        let info = cpu::detect();
        let procs = if info.flags.accelerated() {
            Self::avx2().unwrap_or_else(Self::scalar)
        } else {
            Self::scalar()
        };
        log::debug!(
            "installing {} picture kernels",
            if procs.accelerated { "avx2" } else { "scalar" }
        );
        procs
    }

    /// A process-wide table, detected on first use.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::detect)
    }

    /// Whether the vectorised kernels are installed.
    #[must_use]
    pub fn is_accelerated(&self) -> bool {
        self.accelerated
    }

    #[cfg(target_arch = "x86_64")]
    #[allow(clippy::undocumented_unsafe_blocks)]
    fn avx2() -> Option<Self> {
        if !cpu::has_avx2() {
            return None;
        }
        // SAFETY: every closure below is only reachable through this table,
        // which is only built after AVX2 support was confirmed.
        Some(Self {
            apply_region: |d, dp, s, sp, w, h, op| unsafe {
                arith::avx2::apply_region(d, dp, s, sp, w, h, op)
            },
            apply_scalar: |d, dp, w, h, value, op| unsafe {
                arith::avx2::apply_scalar(d, dp, w, h, value, op)
            },
            select: |p, pitch, w, h, lower, upper| unsafe {
                select::avx2::select_pixels(p, pitch, w, h, lower, upper)
            },
            zoom_horizontal: |d, dp, s, sp, h, samples| unsafe {
                zoom::avx2::zoom_horizontal(d, dp, s, sp, h, samples)
            },
            zoom_vertical: |d, dp, s, sp, w, samples| unsafe {
                zoom::avx2::zoom_vertical(d, dp, s, sp, w, samples)
            },
            tent_horizontal: |d, dp, s, sp, w, h| unsafe {
                tent::avx2::tent_horizontal(d, dp, s, sp, w, h)
            },
            tent_vertical: |d, dp, s, sp, w, h| unsafe {
                tent::avx2::tent_vertical(d, dp, s, sp, w, h)
            },
            blend: |d, dp, s, sp, w, h| unsafe { blend::avx2::blend(d, dp, s, sp, w, h) },
            accelerated: true,
        })
    }

    #[cfg(not(target_arch = "x86_64"))]
    fn avx2() -> Option<Self> {
        None
    }
}

impl Default for PictProcs {
    fn default() -> Self {
        *Self::global()
    }
}
