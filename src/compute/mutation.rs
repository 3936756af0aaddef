//! Pixel-flip mutation followed by smoothed scoring.

use image::{Rgb, RgbImage};
use rand::Rng;

use super::metric::{MetricError, distance};
use super::smoothing::Smoother;
use crate::schema::{ColorMetric, TwoTone};

/// Fixed pieces of the mutate-and-score operator.
#[derive(Debug, Clone)]
pub struct MutationContext {
    pub colors: TwoTone,
    pub smoother: Smoother,
    pub metric: ColorMetric,
}

/// Result of one mutate-and-score step.
#[derive(Debug, Clone)]
pub struct Mutation {
    /// The raw mutated bitmap, before smoothing.
    pub image: RgbImage,
    /// Distance from the smoothed bitmap to the goal.
    pub distance: f64,
    /// Number of pixels flipped.
    pub flipped: usize,
}

/// Flip each pixel of `base` with probability `rate`.
///
/// Returns the new bitmap and the number of flipped pixels.
pub fn flip_pixels<R: Rng + ?Sized>(
    base: &RgbImage,
    rate: f64,
    colors: &TwoTone,
    rng: &mut R,
) -> (RgbImage, usize) {
    let mut flipped = 0;
    let mut out = base.clone();
    for pixel in out.pixels_mut() {
        if rng.r#gen::<f64>() < rate {
            *pixel = Rgb(colors.flip(pixel.0));
            flipped += 1;
        }
    }
    (out, flipped)
}

/// Mutate `base` and score the smoothed result against `goal`.
///
/// The returned image is the unsmoothed bitmap; only its score reflects
/// the smoothing pipeline.
pub fn mutate<R: Rng + ?Sized>(
    goal: &RgbImage,
    base: &RgbImage,
    rate: f64,
    ctx: &MutationContext,
    rng: &mut R,
) -> Result<Mutation, MetricError> {
    let (image, flipped) = flip_pixels(base, rate, &ctx.colors, rng);
    let smoothed = ctx.smoother.apply(&image);
    let distance = distance(&smoothed, goal, ctx.metric)?;
    Ok(Mutation {
        image,
        distance,
        flipped,
    })
}
