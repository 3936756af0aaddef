//! Pixel Climb - Approximate a goal image by stochastic hill climbing.
//!
//! A two-tone candidate bitmap starts as random noise. Each iteration flips
//! a random fraction of its pixels, smooths the result (Gaussian blur then
//! unsharp mask) and scores it against the goal with a perceptual color
//! distance. The mutation is kept only if it scores strictly lower.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration and progress/result types
//! - `compute`: Color metrics, noise, smoothing, mutation and the climber
//!
//! # Example
//!
//! ```rust,no_run
//! use pixel_climb::{
//!     compute::{HillClimber, MemorySink},
//!     schema::ClimbConfig,
//! };
//!
//! let config = ClimbConfig {
//!     iterations: 1_000,
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//! let goal = image::open("goal.png").unwrap().to_rgb8();
//!
//! let mut climber = HillClimber::new(config, goal, MemorySink::default()).unwrap();
//! let result = climber.run().unwrap();
//!
//! println!("Final distance: {}", result.candidate.distance);
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{ClimbError, ClimbResult, HillClimber, distance};
pub use schema::{ClimbConfig, ColorMetric, SmoothingConfig};
