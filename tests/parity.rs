//! The scalar kernels and the detected kernels must agree byte for byte.
//! On processors without AVX2 both tables are scalar and these tests are
//! trivially satisfied.

#[macro_use]
mod common;

use bltpict::{
    ApplyOp, Picture, Pixel, ResampleFilter, arith, associate, blend, select, tent, zoom,
};
use common::*;

#[test_log::test]
fn arith_region_ops_match() {
    let (scalar, detected) = tables();
    log::info!("detected kernels accelerated: {}", detected.is_accelerated());
    let corpus = corpus();

    for op in ApplyOp::ALL {
        for (i, dest) in corpus.iter().enumerate() {
            // Pair each picture with a differently shaped one to exercise clipping.
            let src = &corpus[(i + 4) % corpus.len()];
            for (sx, sy, dx, dy) in [(0, 0, 0, 0), (1, 0, 0, 1), (0, 2, 3, 0)] {
                let mut expected = dest.try_clone().unwrap();
                let mut actual = dest.try_clone().unwrap();
                arith::apply_picture_to_picture(&scalar, &mut expected, src, sx, sy, 100, 100, dx, dy, op);
                arith::apply_picture_to_picture(&detected, &mut actual, src, sx, sy, 100, 100, dx, dy, op);
                assert_same_pixels!(expected, actual, "{op:?} picture {i} offsets {:?}", (sx, sy, dx, dy));
            }
        }
    }
}

#[test]
fn arith_scalar_ops_match() {
    let (scalar, detected) = tables();
    let values = [
        Pixel::TRANSPARENT,
        Pixel::SELECTED,
        Pixel::new(1, 128, 254, 127),
        Pixel::new(200, 3, 77, 255),
    ];

    for op in ApplyOp::ALL {
        for (i, pict) in corpus().iter().enumerate() {
            for value in values {
                let mut expected = pict.try_clone().unwrap();
                let mut actual = pict.try_clone().unwrap();
                arith::apply_scalar_to_picture(&scalar, &mut expected, value, op);
                arith::apply_scalar_to_picture(&detected, &mut actual, value, op);
                assert_same_pixels!(expected, actual, "{op:?} picture {i} value {value:?}");
            }
        }
    }
}

#[test]
fn select_matches() {
    let (scalar, detected) = tables();
    let bounds = [
        (Pixel::TRANSPARENT, Pixel::SELECTED),
        (Pixel::new(1, 1, 1, 1), Pixel::new(254, 254, 254, 254)),
        (Pixel::new(0, 100, 0, 128), Pixel::new(128, 255, 200, 255)),
        (Pixel::new(128, 128, 128, 128), Pixel::new(128, 128, 128, 128)),
        (Pixel::SELECTED, Pixel::TRANSPARENT),
    ];

    for (i, src) in corpus().iter().enumerate() {
        for (lower, upper) in bounds {
            let mut expected = Picture::new(1, 1).unwrap();
            let mut actual = Picture::new(1, 1).unwrap();
            select::select_pixels(&scalar, &mut expected, src, lower, upper).unwrap();
            select::select_pixels(&detected, &mut actual, src, lower, upper).unwrap();
            assert_same_pixels!(expected, actual, "picture {i} bounds {lower:?}..={upper:?}");
            assert_eq!(expected.flags(), actual.flags());
        }
    }
}

#[test]
fn resample_matches() {
    let (scalar, detected) = tables();
    let targets = [(1, 1), (5, 3), (8, 8), (13, 2), (40, 17)];

    for filter in ResampleFilter::ALL {
        for (i, src) in corpus().iter().enumerate().step_by(2) {
            for (w, h) in targets.iter().copied().chain([(src.width().get(), src.height().get())]) {
                let expected = zoom::resize_picture(&scalar, src, w, h, filter).unwrap();
                let actual = zoom::resize_picture(&detected, src, w, h, filter).unwrap();
                assert_same_pixels!(expected, actual, "{filter:?} picture {i} to {w}x{h}");
            }
        }
    }
}

#[test]
fn mixed_filter_resample_matches() {
    let (scalar, detected) = tables();
    let mut rng = rng();
    let src = random_picture(&mut rng, 29, 21, 3);

    let mut expected = Picture::new(45, 10).unwrap();
    let mut actual = Picture::new(45, 10).unwrap();
    zoom::resample_picture(&scalar, &mut expected, &src, ResampleFilter::Lanczos3, ResampleFilter::Mitchell).unwrap();
    zoom::resample_picture(&detected, &mut actual, &src, ResampleFilter::Lanczos3, ResampleFilter::Mitchell).unwrap();

    assert_same_pixels!(expected, actual, "lanczos3 x mitchell");
}

#[test]
fn tent_matches() {
    let (scalar, detected) = tables();

    for (i, src) in corpus().iter().enumerate() {
        let expected = tent::tent_picture(&scalar, src).unwrap();
        let actual = tent::tent_picture(&detected, src).unwrap();
        assert_same_pixels!(expected, actual, "picture {i}");
    }
}

#[test]
fn blend_matches() {
    let (scalar, detected) = tables();
    let corpus = corpus();

    for (i, dest) in corpus.iter().enumerate() {
        for j in [i, (i + 1) % corpus.len(), (i + 7) % corpus.len()] {
            // Both the raw corpus and its premultiplied form.
            let raw = corpus[j].try_clone().unwrap();
            let mut premultiplied = raw.try_clone().unwrap();
            associate::associate_colors(&mut premultiplied);

            for src in [&raw, &premultiplied] {
                let mut expected = dest.try_clone().unwrap();
                let mut actual = dest.try_clone().unwrap();
                blend::blend_pictures(&scalar, &mut expected, src);
                blend::blend_pictures(&detected, &mut actual, src);
                assert_same_pixels!(expected, actual, "dest {i} src {j}");

                let mut expected = dest.try_clone().unwrap();
                let mut actual = dest.try_clone().unwrap();
                blend::blend_region(&scalar, &mut expected, src, 1, 0, 50, 50, 0, 1);
                blend::blend_region(&detected, &mut actual, src, 1, 0, 50, 50, 0, 1);
                assert_same_pixels!(expected, actual, "dest {i} src {j} offset");
            }
        }
    }
}
