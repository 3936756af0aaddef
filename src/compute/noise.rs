//! Two-tone noise used to seed the first candidate.

use image::{Rgb, RgbImage};
use rand::Rng;

use crate::schema::TwoTone;

/// Image where every pixel is independently `dark` or `light` with probability 0.5.
pub fn noise<R: Rng + ?Sized>(width: u32, height: u32, colors: &TwoTone, rng: &mut R) -> RgbImage {
    RgbImage::from_fn(width, height, |_, _| {
        if rng.gen_bool(0.5) {
            Rgb(colors.dark)
        } else {
            Rgb(colors.light)
        }
    })
}
