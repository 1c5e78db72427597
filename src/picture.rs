
use std::num::NonZeroUsize;

use bitflags::bitflags;

use crate::{
    error::{PictError, PictResult},
    pixel::Pixel,
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PictureFlags: u32 {
        /// Colour channels are premultiplied by alpha.
        const ASSOCIATED = 1 << 0;
        /// Some pixels are partially transparent.
        const BLEND = 1 << 1;
        /// Pixels are selection masks, either all zero or all one.
        const MASK = 1 << 2;
        const GREYSCALE = 1 << 3;
    }
}

/// Row strides are rounded up to a multiple of this many pixels (16 bytes).
const STRIDE_ALIGN: usize = 4;

/// A rectangular grid of RGBA pixels stored row by row.
///
/// Rows are `stride` pixels apart, and `stride` may exceed `width`. Pixels in
/// the padding at the end of a row belong to nobody: no operation reads or
/// writes them.
#[derive(Debug, PartialEq, Eq)]
pub struct Picture {
    width: NonZeroUsize,
    height: NonZeroUsize,
    stride: NonZeroUsize,
    flags: PictureFlags,
    pixels: Vec<Pixel>,
}

/// Allocates `len` transparent pixels, reporting failure instead of aborting.
pub(crate) fn alloc_pixels(len: usize, what: &'static str) -> PictResult<Vec<Pixel>> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|_| PictError::out_of_memory(what))?;
    pixels.resize(len, Pixel::TRANSPARENT);
    Ok(pixels)
}

fn nonzero(value: usize, name: &str) -> PictResult<NonZeroUsize> {
    NonZeroUsize::new(value).ok_or_else(|| PictError::geometry(format!("{name} must be non-zero")))
}

impl Picture {
    /// Creates a transparent picture whose stride is padded to a 16-byte multiple.
    pub fn new(width: usize, height: usize) -> PictResult<Self> {
        let stride = width
            .checked_next_multiple_of(STRIDE_ALIGN)
            .ok_or_else(|| PictError::out_of_memory("picture pixels"))?;
        Self::with_stride(width, height, stride)
    }

    pub fn with_stride(width: usize, height: usize, stride: usize) -> PictResult<Self> {
        let width = nonzero(width, "width")?;
        let height = nonzero(height, "height")?;
        if stride < width.get() {
            return Err(PictError::geometry(format!(
                "stride {stride} is smaller than width {width}"
            )));
        }
        let stride = nonzero(stride, "stride")?;
        let len = stride
            .get()
            .checked_mul(height.get())
            .ok_or_else(|| PictError::out_of_memory("picture pixels"))?;
        Ok(Self {
            width,
            height,
            stride,
            flags: PictureFlags::empty(),
            pixels: alloc_pixels(len, "picture pixels")?,
        })
    }

    /// Wraps tightly packed pixels (`stride == width`).
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> PictResult<Self> {
        let width = nonzero(width, "width")?;
        let height = nonzero(height, "height")?;
        if pixels.len() != width.get() * height.get() {
            return Err(PictError::geometry(format!(
                "expected {} pixels for {width}x{height}, got {}",
                width.get() * height.get(),
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            stride: width,
            flags: PictureFlags::empty(),
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> NonZeroUsize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> NonZeroUsize {
        self.height
    }

    #[must_use]
    pub fn stride(&self) -> NonZeroUsize {
        self.stride
    }

    #[must_use]
    pub fn flags(&self) -> PictureFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: PictureFlags) {
        self.flags = flags;
    }

    pub fn insert_flags(&mut self, flags: PictureFlags) {
        self.flags.insert(flags);
    }

    pub fn remove_flags(&mut self, flags: PictureFlags) {
        self.flags.remove(flags);
    }

    /// The whole backing store, padding included.
    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// The visible pixels of row `y`.
    #[must_use]
    pub fn row(&self, y: usize) -> &[Pixel] {
        let start = y * self.stride.get();
        &self.pixels[start..start + self.width.get()]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        let start = y * self.stride.get();
        let width = self.width.get();
        &mut self.pixels[start..start + width]
    }

    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.row(y)[x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Pixel) {
        self.row_mut(y)[x] = pixel;
    }

    /// Iterates over the visible rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels
            .chunks(self.stride.get())
            .take(self.height.get())
            .map(|row| &row[..self.width.get()])
    }

    /// Reallocates the picture to new dimensions. The contents are cleared.
    ///
    /// Nothing is changed if the allocation fails.
    pub fn resize(&mut self, width: usize, height: usize) -> PictResult<()> {
        if width == self.width.get() && height == self.height.get() {
            return Ok(());
        }
        let flags = self.flags;
        *self = Self::new(width, height)?;
        self.flags = flags;
        Ok(())
    }

    /// Fills every visible pixel with `pixel`.
    pub fn blank(&mut self, pixel: Pixel) {
        let width = self.width.get();
        for row in self.pixels.chunks_mut(self.stride.get()) {
            row[..width].fill(pixel);
        }
        if pixel.a == 0xFF {
            self.flags.remove(PictureFlags::BLEND);
        } else {
            self.flags.insert(PictureFlags::BLEND);
        }
    }

    /// Copies a `w`x`h` region of `src` at (`x`, `y`) into `self` at (`dest_x`, `dest_y`).
    ///
    /// The region is clipped to both pictures.
    pub fn copy_region(
        &mut self,
        src: &Picture,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
        dest_x: usize,
        dest_y: usize,
    ) {
        let Some(region) = Region::clip(self, dest_x, dest_y, src, x, y, w, h) else {
            return;
        };
        let width = region.width.get();
        for row in 0..region.height.get() {
            let s = (y + row) * src.stride.get() + x;
            let d = (dest_y + row) * self.stride.get() + dest_x;
            self.pixels[d..d + width].copy_from_slice(&src.pixels[s..s + width]);
        }
    }

    /// Creates a new picture holding the clipped `w`x`h` region at (`x`, `y`).
    pub fn crop(&self, x: usize, y: usize, w: usize, h: usize) -> PictResult<Self> {
        let w = w.min(self.width.get().saturating_sub(x));
        let h = h.min(self.height.get().saturating_sub(y));
        let mut dest = Self::new(w, h)?;
        dest.copy_region(self, x, y, w, h, 0, 0);
        dest.flags = self.flags;
        Ok(dest)
    }

    /// Fallible deep copy, keeping the stride.
    pub fn try_clone(&self) -> PictResult<Self> {
        let mut pixels = alloc_pixels(self.pixels.len(), "picture copy")?;
        pixels.copy_from_slice(&self.pixels);
        Ok(Self {
            pixels,
            ..*self
        })
    }

    /// The backing store starting at pixel (`x`, `y`).
    pub(crate) fn tail(&self, x: usize, y: usize) -> &[Pixel] {
        &self.pixels[y * self.stride.get() + x..]
    }

    pub(crate) fn tail_mut(&mut self, x: usize, y: usize) -> &mut [Pixel] {
        let start = y * self.stride.get() + x;
        &mut self.pixels[start..]
    }
}

/// The size of a region after clipping it against two pictures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Region {
    pub width: NonZeroUsize,
    pub height: NonZeroUsize,
}

impl Region {
    /// Shrinks a `w`x`h` request so it fits inside both `dest` at (`dx`, `dy`)
    /// and `src` at (`sx`, `sy`). Returns `None` if nothing is left.
    pub fn clip(
        dest: &Picture,
        dx: usize,
        dy: usize,
        src: &Picture,
        sx: usize,
        sy: usize,
        w: usize,
        h: usize,
    ) -> Option<Self> {
        let w = w
            .min(src.width.get().saturating_sub(sx))
            .min(dest.width.get().saturating_sub(dx));
        let h = h
            .min(src.height.get().saturating_sub(sy))
            .min(dest.height.get().saturating_sub(dy));
        Some(Self {
            width: NonZeroUsize::new(w)?,
            height: NonZeroUsize::new(h)?,
        })
    }
}
