#![allow(dead_code)]
#![allow(clippy::unwrap_used, reason = "allow in test files")]

use bltpict::{Picture, PictProcs, Pixel};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

/// Widths on both sides of the eight-pixel vector width, with and without
/// row padding.
pub const SHAPES: &[(usize, usize, usize)] = &[
    (1, 1, 0),
    (2, 3, 1),
    (3, 2, 0),
    (7, 5, 2),
    (8, 3, 0),
    (9, 4, 3),
    (16, 2, 0),
    (17, 6, 5),
    (31, 7, 1),
    (33, 3, 0),
    (64, 9, 4),
];

/// Channel values that sit on the edges of every saturating and rounding step.
const EDGE_VALUES: [u8; 8] = [0, 1, 2, 127, 128, 129, 254, 255];

pub fn rng() -> Xoshiro128StarStar {
    Xoshiro128StarStar::from_seed(*b"deadbeeflolcakes")
}

/// The scalar table and the table the running processor would get.
pub fn tables() -> (PictProcs, PictProcs) {
    (PictProcs::scalar(), PictProcs::detect())
}

pub fn random_picture(rng: &mut Xoshiro128StarStar, width: usize, height: usize, padding: usize) -> Picture {
    let mut pict = Picture::with_stride(width, height, width + padding).unwrap();
    for p in pict.pixels_mut() {
        *p = Pixel::from_u32(rng.random());
    }
    pict
}

/// A picture cycling through [`EDGE_VALUES`] with each channel out of step.
pub fn edge_picture(width: usize, height: usize, padding: usize) -> Picture {
    let mut pict = Picture::with_stride(width, height, width + padding).unwrap();
    for (i, p) in pict.pixels_mut().iter_mut().enumerate() {
        let v = |k: usize| EDGE_VALUES[(i * 3 + k * 5) % EDGE_VALUES.len()];
        *p = Pixel::new(v(0), v(1), v(2), v(3));
    }
    pict
}

/// Random and boundary-valued pictures in every shape of [`SHAPES`].
pub fn corpus() -> Vec<Picture> {
    let mut rng = rng();
    let mut out = Vec::new();
    for &(w, h, pad) in SHAPES {
        out.push(random_picture(&mut rng, w, h, pad));
        out.push(edge_picture(w, h, pad));
        let mut flat = Picture::with_stride(w, h, w + pad).unwrap();
        flat.blank(Pixel::SELECTED);
        out.push(flat);
    }
    out
}

/// Compares every stored pixel, padding included, and names the first mismatch.
macro_rules! assert_same_pixels {
    ($expected:expr, $actual:expr, $($ctx:tt)+) => {{
        let expected: &bltpict::Picture = &$expected;
        let actual: &bltpict::Picture = &$actual;
        assert_eq!(expected.width(), actual.width(), $($ctx)+);
        assert_eq!(expected.height(), actual.height(), $($ctx)+);
        if let Some(i) = expected
            .pixels()
            .iter()
            .zip(actual.pixels())
            .position(|(a, b)| a != b)
        {
            let stride = expected.stride().get();
            panic!(
                "{}: first mismatch at ({}, {}): scalar {:?}, detected {:?}",
                format!($($ctx)+),
                i % stride,
                i / stride,
                expected.pixels()[i],
                actual.pixels()[i],
            );
        }
    }};
}
