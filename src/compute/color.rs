//! Per-pixel perceptual color conversions.
//!
//! Samples are derived on demand from 8-bit RGB and never stored with an
//! image. All components are scaled into roughly unit ranges so the two
//! metrics produce comparable magnitudes.

use palette::{FromColor, Lab, Lch, LinSrgb, Srgb};

/// A pixel in CIE L*a*b* (D65), each component divided by 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabSample {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl LabSample {
    /// Euclidean distance to another sample.
    #[inline]
    pub fn distance(&self, other: &LabSample) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

/// A pixel in hue/chroma/lightness form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HclSample {
    /// Hue normalized to [0, 1).
    pub h: f64,
    /// Chroma divided by 100.
    pub c: f64,
    /// Lightness divided by 100.
    pub l: f64,
}

impl HclSample {
    /// Circular hue term plus squared chroma and lightness differences.
    #[inline]
    pub fn cost(&self, other: &HclSample) -> f64 {
        let dc = self.c - other.c;
        let dl = self.l - other.l;
        circular_distance(self.h, other.h, 1.0) + dc * dc + dl * dl
    }
}

fn lab_from_rgb(rgb: [u8; 3]) -> Lab {
    let srgb: Srgb<f32> = Srgb::new(
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
    );
    let lin: LinSrgb<f32> = srgb.into_linear();
    Lab::from_color(lin)
}

/// Convert an 8-bit RGB pixel into a scaled Lab sample.
pub fn lab_sample(rgb: [u8; 3]) -> LabSample {
    let lab = lab_from_rgb(rgb);
    LabSample {
        l: lab.l as f64 / 100.0,
        a: lab.a as f64 / 100.0,
        b: lab.b as f64 / 100.0,
    }
}

/// Scaled chroma below which a pixel is treated as achromatic.
pub const ACHROMATIC_CHROMA: f64 = 1e-3;

/// Convert an 8-bit RGB pixel into a scaled hue/chroma/lightness sample.
///
/// Greys carry no meaningful hue, so their hue is pinned to 0.
pub fn hcl_sample(rgb: [u8; 3]) -> HclSample {
    let lch: Lch = Lch::from_color(lab_from_rgb(rgb));
    let c = lch.chroma as f64 / 100.0;
    let h = if c < ACHROMATIC_CHROMA {
        0.0
    } else {
        // into_positive_degrees may return exactly 360.0 after rounding
        (lch.hue.into_positive_degrees() as f64 / 360.0).rem_euclid(1.0)
    };
    HclSample {
        h,
        c,
        l: lch.l as f64 / 100.0,
    }
}

/// Squared distance between two values on a circle of the given period.
///
/// With `d = max(a, b) - min(a, b)`, this is `min(d^2, (d - period)^2)`.
/// Inputs are expected in `[0, period)`.
#[inline]
pub fn circular_distance(a: f64, b: f64, period: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    let d = hi - lo;
    let wrapped = d - period;
    (d * d).min(wrapped * wrapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_circular_distance_wraps() {
        let across = circular_distance(0.01, 0.99, 1.0);
        let direct = circular_distance(0.0, 0.02, 1.0);
        assert!((across - direct).abs() < 1e-12);
        assert!(across < 0.98 * 0.98);
    }

    #[test]
    fn test_circular_distance_half_period() {
        assert!((circular_distance(0.0, 0.5, 1.0) - 0.25).abs() < 1e-12);
        assert!((circular_distance(0.25, 0.75, 1.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_lab_extremes() {
        let black = lab_sample([0, 0, 0]);
        let white = lab_sample([255, 255, 255]);
        assert!(black.l.abs() < 1e-3);
        assert!((white.l - 1.0).abs() < 1e-2);
        assert!(white.a.abs() < 1e-2 && white.b.abs() < 1e-2);
        assert!((black.distance(&white) - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_perceptual_vs_raw() {
        let navy = lab_sample([0, 0, 128]);
        let blue = lab_sample([0, 0, 255]);
        let gray_a = lab_sample([100, 100, 100]);
        let gray_b = lab_sample([100, 228, 100]);
        // Same raw gap of 127-128 on one channel, very different perceptual gaps.
        assert!(navy.distance(&blue) < gray_a.distance(&gray_b));
    }

    #[test]
    fn test_hcl_hue_range() {
        for rgb in [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 0, 255], [10, 10, 10]] {
            let s = hcl_sample(rgb);
            assert!((0.0..1.0).contains(&s.h), "{:?} -> {}", rgb, s.h);
        }
    }

    #[test]
    fn test_hcl_red_magenta_closer_than_red_cyan() {
        let red = hcl_sample([255, 0, 0]);
        let magenta = hcl_sample([255, 0, 255]);
        let cyan = hcl_sample([0, 255, 255]);
        assert!(red.cost(&magenta) < red.cost(&cyan));
    }

    #[test]
    fn test_hcl_greys_have_no_hue() {
        for v in [0u8, 1, 64, 128, 129, 200, 254, 255] {
            let s = hcl_sample([v, v, v]);
            assert_eq!(s.h, 0.0, "grey {} has hue {}", v, s.h);
            assert!(s.c < ACHROMATIC_CHROMA);
        }
    }

    #[test]
    fn test_hcl_near_grey_closer_than_far_grey() {
        let g128 = hcl_sample([128, 128, 128]);
        for (near, far) in [(129u8, 140u8), (129, 200), (140, 160), (160, 200)] {
            let near_cost = g128.cost(&hcl_sample([near, near, near]));
            let far_cost = g128.cost(&hcl_sample([far, far, far]));
            assert!(
                near_cost < far_cost,
                "grey {} cost {} >= grey {} cost {}",
                near,
                near_cost,
                far,
                far_cost
            );
        }
    }

    proptest! {
        #[test]
        fn prop_circular_distance_symmetric(a in 0.0f64..1.0, b in 0.0f64..1.0) {
            prop_assert_eq!(circular_distance(a, b, 1.0), circular_distance(b, a, 1.0));
        }

        #[test]
        fn prop_circular_distance_zero_on_equal(a in 0.0f64..1.0) {
            prop_assert_eq!(circular_distance(a, a, 1.0), 0.0);
        }

        #[test]
        fn prop_circular_distance_bounded(a in 0.0f64..1.0, b in 0.0f64..1.0) {
            prop_assert!(circular_distance(a, b, 1.0) <= 0.25 + 1e-12);
        }
    }
}
