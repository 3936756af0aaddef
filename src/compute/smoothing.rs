//! Blur-then-sharpen post-processing applied before scoring.
//!
//! Smoothing biases the search toward contiguous regions: an isolated
//! flipped pixel is mostly washed out by the blur, while a flipped cluster
//! survives and is re-emphasized by the unsharp mask.

use image::{RgbImage, imageops};

use crate::schema::SmoothingConfig;

/// Gaussian blur with the given sigma. A zero sigma returns a copy.
pub fn gaussian_blur(img: &RgbImage, sigma: f32) -> RgbImage {
    if sigma <= 0.0 {
        return img.clone();
    }
    imageops::blur(img, sigma)
}

/// Unsharp mask: `orig + amount * (orig - blur(orig, radius))`, clamped per channel.
pub fn unsharp_mask(img: &RgbImage, radius: f32, amount: f32) -> RgbImage {
    if amount == 0.0 || radius <= 0.0 {
        return img.clone();
    }
    let blurred = gaussian_blur(img, radius);
    let mut out = img.clone();
    for (dst, soft) in out.iter_mut().zip(blurred.iter()) {
        let orig = *dst as f32;
        let sharpened = orig + amount * (orig - *soft as f32);
        *dst = sharpened.round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Fixed smoothing pipeline built from a [`SmoothingConfig`].
#[derive(Debug, Clone)]
pub struct Smoother {
    config: SmoothingConfig,
}

impl Smoother {
    pub fn new(config: SmoothingConfig) -> Self {
        Self { config }
    }

    /// Blur, then sharpen. Identity when smoothing is disabled.
    pub fn apply(&self, img: &RgbImage) -> RgbImage {
        if !self.config.enabled {
            return img.clone();
        }
        let blurred = gaussian_blur(img, self.config.blur_sigma);
        unsharp_mask(
            &blurred,
            self.config.sharpen_radius,
            self.config.sharpen_amount,
        )
    }
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(SmoothingConfig::default())
    }
}
