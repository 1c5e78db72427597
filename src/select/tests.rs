#![allow(clippy::unwrap_used, reason = "allow in test files")]

use std::num::NonZeroUsize;

use pastey::paste;

use super::*;
use crate::tests::{random_picture, random_pixels, rng};

macro_rules! create_tests {
    ($module:ident) => {
        paste! {
            #[test]
            fn [<test_select_all_or_nothing_ $module>]() {
                let lower = Pixel::new(10, 20, 30, 40);
                let upper = Pixel::new(100, 100, 100, 100);
                let mut pixels = vec![
                    Pixel::new(50, 50, 50, 50),   // inside
                    Pixel::new(10, 20, 30, 40),   // exactly lower
                    Pixel::new(100, 100, 100, 100), // exactly upper
                    Pixel::new(9, 50, 50, 50),    // red below
                    Pixel::new(50, 50, 50, 101),  // alpha above
                    Pixel::new(0, 0, 0, 0),
                ];
                let pitch = NonZeroUsize::new(6).unwrap();
                let one = NonZeroUsize::new(1).unwrap();

                verify_asm!($module, select_pixels(&mut pixels, pitch, pitch, one, lower, upper));

                assert_eq!(pixels[0], Pixel::SELECTED);
                assert_eq!(pixels[1], Pixel::SELECTED);
                assert_eq!(pixels[2], Pixel::SELECTED);
                assert_eq!(pixels[3], Pixel::TRANSPARENT);
                assert_eq!(pixels[4], Pixel::TRANSPARENT);
                assert_eq!(pixels[5], Pixel::TRANSPARENT);
            }

            #[test]
            fn [<test_select_random_rows_ $module>]() {
                let mut rng = rng();
                let width = 29;
                let height = 4;
                let pitch = NonZeroUsize::new(32).unwrap();
                let original = random_pixels(&mut rng, pitch.get() * height);
                let lower = Pixel::new(0x20, 0x10, 0x00, 0x40);
                let upper = Pixel::new(0xF0, 0xFF, 0xE0, 0xFF);
                let mut pixels = original.clone();

                verify_asm!($module, select_pixels(
                    &mut pixels,
                    pitch,
                    NonZeroUsize::new(width).unwrap(),
                    NonZeroUsize::new(height).unwrap(),
                    lower,
                    upper,
                ));

                for (i, (p, o)) in pixels.iter().zip(&original).enumerate() {
                    let expected = if i % pitch.get() >= width {
                        *o
                    } else if in_range(*o, lower, upper) {
                        Pixel::SELECTED
                    } else {
                        Pixel::TRANSPARENT
                    };
                    assert_eq!(*p, expected, "pixel {i}");
                }
            }
        }
    };
}

create_tests!(rust);

#[cfg(target_arch = "x86_64")]
create_tests!(avx2);

#[test]
fn test_select_resizes_dest_and_sets_mask_flag() {
    let procs = PictProcs::scalar();
    let mut rng = rng();
    let src = random_picture(&mut rng, 7, 3, 1);
    let mut dest = Picture::new(2, 2).unwrap();
    dest.set_flags(PictureFlags::BLEND);

    select_pixels(&procs, &mut dest, &src, Pixel::TRANSPARENT, Pixel::SELECTED).unwrap();

    assert_eq!(dest.width().get(), 7);
    assert_eq!(dest.height().get(), 3);
    assert!(dest.flags().contains(PictureFlags::MASK));
    assert!(!dest.flags().contains(PictureFlags::BLEND));
    // The full range selects everything
    assert!(dest.rows().all(|row| row.iter().all(|p| *p == Pixel::SELECTED)));
}

#[test]
fn test_select_in_place_empty_range() {
    let procs = PictProcs::scalar();
    let mut pict = Picture::new(3, 3).unwrap();
    pict.blank(Pixel::new(5, 5, 5, 5));

    // lower > upper on one channel can never match
    select_pixels_in_place(&procs, &mut pict, Pixel::new(0, 0, 6, 0), Pixel::new(9, 9, 5, 9));

    assert!(pict.rows().all(|row| row.iter().all(|p| *p == Pixel::TRANSPARENT)));
}
