/// A single RGBA pixel, one byte per channel.
///
/// The in-memory layout is `r, g, b, a`, so a slice of pixels can be viewed
/// as a byte slice with four bytes per pixel. [`Pixel::to_u32`] packs the
/// channels little-endian, which matches that byte order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(C, align(4))]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Value written by pixel selection for a fully selected pixel.
    pub const SELECTED: Self = Self::new(0xFF, 0xFF, 0xFF, 0xFF);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        let [r, g, b, a] = value.to_le_bytes();
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn to_u32(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    #[must_use]
    pub const fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[must_use]
    pub const fn from_channels(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Applies `f` to each channel pair of `self` and `other`.
    #[inline]
    #[must_use]
    pub fn zip_with(self, other: Self, mut f: impl FnMut(u8, u8) -> u8) -> Self {
        Self::new(
            f(self.r, other.r),
            f(self.g, other.g),
            f(self.b, other.b),
            f(self.a, other.a),
        )
    }
}

impl From<u32> for Pixel {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl From<Pixel> for u32 {
    fn from(value: Pixel) -> Self {
        value.to_u32()
    }
}

/// Views a pixel slice as its raw channel bytes.
#[must_use]
pub fn as_bytes(pixels: &[Pixel]) -> &[u8] {
    // SAFETY: `Pixel` is `repr(C)` with four `u8` fields and no padding.
    unsafe { std::slice::from_raw_parts(pixels.as_ptr().cast::<u8>(), pixels.len() * 4) }
}

/// Views a mutable pixel slice as its raw channel bytes.
#[must_use]
pub fn as_bytes_mut(pixels: &mut [Pixel]) -> &mut [u8] {
    // SAFETY: `Pixel` is `repr(C)` with four `u8` fields and no padding,
    // and every byte pattern is a valid `Pixel`.
    unsafe { std::slice::from_raw_parts_mut(pixels.as_mut_ptr().cast::<u8>(), pixels.len() * 4) }
}
