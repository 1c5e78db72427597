#[macro_use]
mod common;

use bltpict::{
    ApplyOp, PictProcs, Picture, PictureFlags, Pixel, ResampleFilter, arith, associate, blend,
    select, tent, zoom,
};
use common::*;
use rand::Rng;

fn row_picture(values: &[u8]) -> Picture {
    let pixels = values.iter().map(|&v| Pixel::new(v, v, v, v)).collect();
    Picture::from_pixels(values.len(), 1, pixels).unwrap()
}

#[test]
fn add_then_sub_restores_unsaturated_channels() {
    let procs = PictProcs::global();
    let mut rng = rng();

    for &(w, h, pad) in SHAPES {
        let original = random_picture(&mut rng, w, h, pad);
        let src = random_picture(&mut rng, w, h, 0);
        let mut pict = original.try_clone().unwrap();

        arith::apply_picture_to_picture(procs, &mut pict, &src, 0, 0, w, h, 0, 0, ApplyOp::Add);
        arith::apply_picture_to_picture(procs, &mut pict, &src, 0, 0, w, h, 0, 0, ApplyOp::Sub);

        for y in 0..h {
            for x in 0..w {
                let (a, b, out) = (original.pixel(x, y), src.pixel(x, y), pict.pixel(x, y));
                for ((a, b), out) in a.channels().into_iter().zip(b.channels()).zip(out.channels()) {
                    if u16::from(a) + u16::from(b) <= 255 {
                        assert_eq!(out, a, "({x}, {y}) in {w}x{h}");
                    }
                }
            }
        }
    }
}

#[test]
fn min_keeps_dest_and_max_takes_src_on_ties() {
    let procs = PictProcs::global();
    let value = Pixel::new(9, 99, 199, 255);

    for op in [ApplyOp::Min, ApplyOp::Max] {
        let mut dest = Picture::new(11, 2).unwrap();
        dest.blank(value);
        dest.insert_flags(PictureFlags::GREYSCALE);
        let mut src = Picture::new(11, 2).unwrap();
        src.blank(value);

        arith::apply_picture_to_picture(procs, &mut dest, &src, 0, 0, 11, 2, 0, 0, op);

        assert!(dest.rows().all(|row| row.iter().all(|p| *p == value)), "{op:?}");
        assert!(dest.flags().contains(PictureFlags::GREYSCALE));
    }
}

#[test]
fn mask_is_all_or_nothing_with_inclusive_bounds() {
    let procs = PictProcs::global();
    let lower = Pixel::new(10, 20, 30, 40);
    let upper = Pixel::new(50, 60, 70, 80);
    let pixels = vec![
        lower,
        upper,
        Pixel::new(9, 20, 30, 40),
        Pixel::new(50, 60, 70, 81),
        Pixel::new(30, 40, 50, 60),
        Pixel::new(30, 40, 71, 60),
        Pixel::new(10, 60, 30, 80),
        Pixel::new(255, 255, 255, 255),
        Pixel::new(0, 0, 0, 0),
    ];
    let expected = [true, true, false, false, true, false, true, false, false];
    let mut pict = Picture::from_pixels(pixels.len(), 1, pixels).unwrap();

    select::select_pixels_in_place(procs, &mut pict, lower, upper);

    for (x, selected) in expected.into_iter().enumerate() {
        let want = if selected { Pixel::SELECTED } else { Pixel::TRANSPARENT };
        assert_eq!(pict.pixel(x, 0), want, "pixel {x}");
    }
    assert!(pict.flags().contains(PictureFlags::MASK));
}

#[test]
fn resample_to_same_size_is_identity() {
    let procs = PictProcs::global();
    let mut rng = rng();
    let src = random_picture(&mut rng, 23, 14, 1);

    for filter in [
        ResampleFilter::Box,
        ResampleFilter::Triangle,
        ResampleFilter::CatmullRom,
        ResampleFilter::Lanczos3,
        ResampleFilter::Sinc,
    ] {
        let out = zoom::resize_picture(procs, &src, 23, 14, filter).unwrap();
        assert!(out.rows().eq(src.rows()), "{filter:?}");
    }
}

#[test]
fn smoothing_filters_keep_mean_at_same_size() {
    let procs = PictProcs::global();
    let mut rng = rng();
    let mut src = Picture::new(40, 40).unwrap();
    for y in 0..40 {
        for p in src.row_mut(y) {
            let v: u8 = rng.random_range(64..192);
            *p = Pixel::new(v, v, v, 255);
        }
    }
    let mean = |pict: &Picture| -> f64 {
        let sum: u64 = pict.rows().flatten().map(|p| u64::from(p.r)).sum();
        sum as f64 / 1600.0
    };

    for filter in ResampleFilter::ALL {
        let out = zoom::resize_picture(procs, &src, 40, 40, filter).unwrap();
        assert!((mean(&out) - mean(&src)).abs() < 1.0, "{filter:?}");
    }
}

#[test]
fn tent_replicates_edges() {
    let procs = PictProcs::global();
    let src = row_picture(&[10, 20, 30, 40, 50]);

    let out = tent::tent_picture(procs, &src).unwrap();

    let reds: Vec<u8> = out.row(0).iter().map(|p| p.r).collect();
    assert_eq!(reds, vec![13, 20, 30, 40, 48]);

    let mut column = Picture::new(1, 5).unwrap();
    for (y, v) in [10, 20, 30, 40, 50].into_iter().enumerate() {
        column.set_pixel(0, y, Pixel::new(v, v, v, v));
    }
    let out = tent::tent_picture(procs, &column).unwrap();
    let reds: Vec<u8> = out.rows().map(|row| row[0].r).collect();
    assert_eq!(reds, vec![13, 20, 30, 40, 48]);
}

#[test]
fn opaque_and_transparent_blend_boundaries() {
    let procs = PictProcs::global();
    let mut rng = rng();

    for &(w, h, pad) in SHAPES {
        let background = random_picture(&mut rng, w, h, pad);

        let mut opaque = random_picture(&mut rng, w, h, 0);
        for y in 0..h {
            for p in opaque.row_mut(y) {
                p.a = 255;
            }
        }
        let mut dest = background.try_clone().unwrap();
        blend::blend_pictures(procs, &mut dest, &opaque);
        assert!(dest.rows().eq(opaque.rows()), "opaque {w}x{h}");

        let mut clear = random_picture(&mut rng, w, h, 0);
        for y in 0..h {
            for p in clear.row_mut(y) {
                p.a = 0;
            }
        }
        associate::associate_colors(&mut clear);
        let mut dest = background.try_clone().unwrap();
        blend::blend_pictures(procs, &mut dest, &clear);
        assert_same_pixels!(background, dest, "transparent {w}x{h}");
    }
}

#[test]
fn padding_is_never_written() {
    let procs = PictProcs::global();
    let mut rng = rng();
    let src = random_picture(&mut rng, 13, 5, 0);
    let original = random_picture(&mut rng, 13, 5, 7);
    let stride = original.stride().get();

    let padding = |pict: &Picture| -> Vec<Pixel> {
        (0..5)
            .flat_map(|y| pict.pixels()[y * stride + 13..(y + 1) * stride].to_vec())
            .collect()
    };

    let mut pict = original.try_clone().unwrap();
    arith::apply_picture_to_picture(procs, &mut pict, &src, 0, 0, 13, 5, 0, 0, ApplyOp::Xor);
    arith::apply_scalar_to_picture(procs, &mut pict, Pixel::SELECTED, ApplyOp::Nand);
    blend::blend_pictures(procs, &mut pict, &src);
    select::select_pixels_in_place(procs, &mut pict, Pixel::TRANSPARENT, Pixel::new(128, 128, 128, 128));
    associate::associate_colors(&mut pict);

    assert_eq!(padding(&pict), padding(&original));
}
