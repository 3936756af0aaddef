//! Configuration types for a hill-climbing run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level run configuration.
///
/// The defaults reproduce the classic batch experiment: read `bc.png`,
/// climb for one million iterations, write `zz_cand_<i>.png` snapshots and
/// a final `cand.png` into the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbConfig {
    /// Path of the goal image (PNG).
    pub goal_path: PathBuf,
    /// Where snapshots and the final candidate are written.
    pub output: OutputConfig,
    /// Number of mutate-and-score iterations.
    pub iterations: u64,
    /// Upper bound (exclusive) for the per-iteration mutation rate.
    pub max_mutation_rate: f64,
    /// Post-processing applied to each mutated candidate before scoring.
    pub smoothing: SmoothingConfig,
    /// The two colors a pixel flips between.
    pub colors: TwoTone,
    /// Perceptual metric used for scoring.
    pub metric: ColorMetric,
    /// What to do when a snapshot cannot be written.
    pub snapshot_policy: SnapshotPolicy,
    /// Random seed for reproducibility.
    pub random_seed: Option<u64>,
}

impl Default for ClimbConfig {
    fn default() -> Self {
        Self {
            goal_path: PathBuf::from("bc.png"),
            output: OutputConfig::default(),
            iterations: 1_000_000,
            max_mutation_rate: 0.05,
            smoothing: SmoothingConfig::default(),
            colors: TwoTone::default(),
            metric: ColorMetric::default(),
            snapshot_policy: SnapshotPolicy::default(),
            random_seed: None,
        }
    }
}

/// Output locations for snapshots and the final candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the final candidate image.
    pub final_path: PathBuf,
    /// Directory receiving per-improvement snapshots.
    pub snapshot_dir: PathBuf,
    /// Filename prefix; the iteration index and `.png` are appended.
    pub snapshot_prefix: String,
    /// Disable to skip snapshot files entirely.
    pub snapshots: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            final_path: PathBuf::from("cand.png"),
            snapshot_dir: PathBuf::from("."),
            snapshot_prefix: "zz_cand_".to_string(),
            snapshots: true,
        }
    }
}

impl OutputConfig {
    /// Snapshot path for the given iteration.
    pub fn snapshot_path(&self, iteration: u64) -> PathBuf {
        self.snapshot_dir
            .join(format!("{}{}.png", self.snapshot_prefix, iteration))
    }
}

/// Blur-then-sharpen pipeline parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// When false, candidates are scored as-is.
    pub enabled: bool,
    /// Gaussian blur sigma in pixels.
    pub blur_sigma: f32,
    /// Unsharp mask blur radius in pixels.
    pub sharpen_radius: f32,
    /// Unsharp mask strength.
    pub sharpen_amount: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blur_sigma: 2.0,
            sharpen_radius: 2.0,
            sharpen_amount: 0.5,
        }
    }
}

impl SmoothingConfig {
    /// Pipeline that leaves images untouched.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// A pair of RGB colors; mutation flips a pixel from one to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoTone {
    pub dark: [u8; 3],
    pub light: [u8; 3],
}

impl Default for TwoTone {
    fn default() -> Self {
        Self {
            dark: [0, 0, 0],
            light: [255, 255, 255],
        }
    }
}

impl TwoTone {
    /// The opposite color. Anything that is not `dark` flips to `dark`.
    #[inline]
    pub fn flip(&self, rgb: [u8; 3]) -> [u8; 3] {
        if rgb == self.dark {
            self.light
        } else {
            self.dark
        }
    }
}

/// Perceptual distance used to score candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMetric {
    /// Euclidean distance in CIE L*a*b*, summed over pixels.
    #[default]
    Lab,
    /// Circular hue plus squared chroma and lightness differences.
    Hcl,
}

/// Handling of snapshot write failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnapshotPolicy {
    /// Any write failure ends the run.
    #[default]
    Abort,
    /// Log the failure and keep climbing.
    Warn,
}

impl ClimbConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        if !(0.0..=1.0).contains(&self.max_mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.max_mutation_rate));
        }
        let s = &self.smoothing;
        for (name, value) in [
            ("blur_sigma", s.blur_sigma),
            ("sharpen_radius", s.sharpen_radius),
            ("sharpen_amount", s.sharpen_amount),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidSmoothing { name, value });
            }
        }
        if self.colors.dark == self.colors.light {
            return Err(ConfigError::DegenerateColors);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Iteration count must be non-zero")]
    NoIterations,
    #[error("Mutation rate ceiling {0} is outside [0, 1]")]
    InvalidMutationRate(f64),
    #[error("Smoothing parameter {name} must be finite and non-negative, got {value}")]
    InvalidSmoothing { name: &'static str, value: f32 },
    #[error("Dark and light colors must differ")]
    DegenerateColors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        ClimbConfig::default().validate().unwrap();
    }

    #[test]
    fn test_snapshot_path() {
        let output = OutputConfig {
            snapshot_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(
            output.snapshot_path(42),
            PathBuf::from("out").join("zz_cand_42.png")
        );
    }

    #[test]
    fn test_flip() {
        let colors = TwoTone::default();
        assert_eq!(colors.flip([0, 0, 0]), [255, 255, 255]);
        assert_eq!(colors.flip([255, 255, 255]), [0, 0, 0]);
        assert_eq!(colors.flip([12, 34, 56]), [0, 0, 0]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ClimbConfig {
            iterations: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoIterations)));

        let config = ClimbConfig {
            max_mutation_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMutationRate(_))
        ));

        let config = ClimbConfig {
            smoothing: SmoothingConfig {
                blur_sigma: f32::NAN,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSmoothing {
                name: "blur_sigma",
                ..
            })
        ));

        let config = ClimbConfig {
            colors: TwoTone {
                dark: [9, 9, 9],
                light: [9, 9, 9],
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DegenerateColors)
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClimbConfig =
            serde_json::from_str(r#"{ "iterations": 10, "metric": "Hcl" }"#).unwrap();
        assert_eq!(config.iterations, 10);
        assert_eq!(config.metric, ColorMetric::Hcl);
        assert_eq!(config.goal_path, PathBuf::from("bc.png"));
        assert_eq!(config.max_mutation_rate, 0.05);
        assert!(config.smoothing.enabled);
        assert_eq!(config.snapshot_policy, SnapshotPolicy::Abort);
    }

    #[test]
    fn test_json_roundtrip_preserves_seed() {
        let config = ClimbConfig {
            random_seed: Some(7),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ClimbConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.random_seed, Some(7));
    }
}
