//! Whole-image perceptual distance.

use image::RgbImage;

use super::color::{hcl_sample, lab_sample};
use crate::schema::ColorMetric;

/// Errors raised while scoring two images.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricError {
    #[error("Dimension mismatch: {a_width}x{a_height}, {b_width}x{b_height}")]
    DimensionMismatch {
        a_width: u32,
        a_height: u32,
        b_width: u32,
        b_height: u32,
    },
}

/// Sum of per-pixel perceptual costs between two equally sized images.
///
/// Lower is better; identical images score exactly zero. Alpha is not
/// represented in `RgbImage` and therefore never contributes.
pub fn distance(a: &RgbImage, b: &RgbImage, metric: ColorMetric) -> Result<f64, MetricError> {
    if a.dimensions() != b.dimensions() {
        return Err(MetricError::DimensionMismatch {
            a_width: a.width(),
            a_height: a.height(),
            b_width: b.width(),
            b_height: b.height(),
        });
    }

    let pairs = a.pixels().zip(b.pixels());
    let total: f64 = match metric {
        ColorMetric::Lab => pairs
            .map(|(pa, pb)| lab_sample(pa.0).distance(&lab_sample(pb.0)))
            .sum(),
        ColorMetric::Hcl => pairs
            .map(|(pa, pb)| hcl_sample(pa.0).cost(&hcl_sample(pb.0)))
            .sum(),
    };
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use proptest::prelude::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(rgb))
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = solid(2, 2, [0, 0, 0]);
        let b = solid(3, 2, [0, 0, 0]);
        for metric in [ColorMetric::Lab, ColorMetric::Hcl] {
            let err = distance(&a, &b, metric).unwrap_err();
            assert_eq!(
                err,
                MetricError::DimensionMismatch {
                    a_width: 2,
                    a_height: 2,
                    b_width: 3,
                    b_height: 2,
                }
            );
        }
    }

    #[test]
    fn test_all_white_goal_scores_zero() {
        let goal = solid(2, 2, [255, 255, 255]);
        let candidate = solid(2, 2, [255, 255, 255]);
        assert_eq!(distance(&candidate, &goal, ColorMetric::Lab).unwrap(), 0.0);
        assert_eq!(distance(&candidate, &goal, ColorMetric::Hcl).unwrap(), 0.0);
    }

    #[test]
    fn test_distance_is_sum_of_pixels() {
        let goal = solid(2, 1, [255, 255, 255]);
        let mut one_off = goal.clone();
        one_off.put_pixel(0, 0, Rgb([0, 0, 0]));
        let all_off = solid(2, 1, [0, 0, 0]);

        let d1 = distance(&one_off, &goal, ColorMetric::Lab).unwrap();
        let d2 = distance(&all_off, &goal, ColorMetric::Lab).unwrap();
        assert!(d1 > 0.0);
        assert!((d2 - 2.0 * d1).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_disagree_on_magnitude() {
        let a = solid(4, 4, [200, 30, 30]);
        let b = solid(4, 4, [30, 30, 200]);
        let lab = distance(&a, &b, ColorMetric::Lab).unwrap();
        let hcl = distance(&a, &b, ColorMetric::Hcl).unwrap();
        assert!(lab > 0.0 && hcl > 0.0);
        assert!((lab - hcl).abs() > 1e-6);
    }

    #[test]
    fn test_hcl_grey_distances_follow_lightness() {
        let base = solid(1, 1, [128, 128, 128]);
        let score = |v: u8| distance(&base, &solid(1, 1, [v, v, v]), ColorMetric::Hcl).unwrap();
        assert!(score(129) < score(140));
        assert!(score(140) < score(160));
        assert!(score(160) < score(200));
    }

    proptest! {
        #[test]
        fn prop_identical_images_score_zero(
            w in 1u32..6,
            h in 1u32..6,
            bytes in proptest::collection::vec(any::<u8>(), 108),
        ) {
            let img = RgbImage::from_fn(w, h, |x, y| {
                let i = ((y * w + x) * 3) as usize;
                Rgb([bytes[i], bytes[i + 1], bytes[i + 2]])
            });
            prop_assert_eq!(distance(&img, &img, ColorMetric::Lab).unwrap(), 0.0);
            prop_assert_eq!(distance(&img, &img, ColorMetric::Hcl).unwrap(), 0.0);
        }
    }
}
