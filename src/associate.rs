//! Conversions between straight and premultiplied alpha.
//!
//! These run once per picture rather than per composite, so only a scalar
//! version exists.

use crate::{
    blend::mul_div255,
    picture::{Picture, PictureFlags},
    pixel::Pixel,
};

fn premultiply(p: Pixel) -> Pixel {
    Pixel::new(
        mul_div255(p.r, p.a),
        mul_div255(p.g, p.a),
        mul_div255(p.b, p.a),
        p.a,
    )
}

fn unpremultiply(p: Pixel) -> Pixel {
    if p.a == 0 {
        return p;
    }
    let a = u32::from(p.a);
    let scale = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
    Pixel::new(scale(p.r), scale(p.g), scale(p.b), p.a)
}

fn map_visible(pict: &mut Picture, f: impl Fn(Pixel) -> Pixel) {
    for y in 0..pict.height().get() {
        for p in pict.row_mut(y) {
            *p = f(*p);
        }
    }
}

/// Multiplies the colour channels of every pixel by its alpha and marks the
/// picture [`PictureFlags::ASSOCIATED`]. Does nothing if it already is.
pub fn associate_colors(pict: &mut Picture) {
    if pict.flags().contains(PictureFlags::ASSOCIATED) {
        return;
    }
    map_visible(pict, premultiply);
    pict.insert_flags(PictureFlags::ASSOCIATED);
}

/// Divides the colour channels of every pixel by its alpha and clears
/// [`PictureFlags::ASSOCIATED`]. Fully transparent pixels are left alone.
pub fn unassociate_colors(pict: &mut Picture) {
    if !pict.flags().contains(PictureFlags::ASSOCIATED) {
        return;
    }
    map_visible(pict, unpremultiply);
    pict.remove_flags(PictureFlags::ASSOCIATED);
}
