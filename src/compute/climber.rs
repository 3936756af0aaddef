//! Stochastic hill-climbing engine.
//!
//! The engine moves through three phases: `Seeded` once a noise candidate
//! has been scored, `Iterating` while the mutate-and-score loop runs, and
//! `Terminated` after the final candidate has been handed to the sink.

use std::time::Instant;

use image::RgbImage;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::io::{ImageIoError, load_goal};
use super::metric::{MetricError, distance};
use super::mutation::{MutationContext, mutate};
use super::noise::noise;
use super::sink::{CandidateSink, PngSink};
use super::smoothing::Smoother;
use crate::schema::{
    ClimbConfig, ClimbPhase, ClimbProgress, ClimbStats, ConfigError, SnapshotPolicy,
};

/// Errors that end (or, for snapshots under [`SnapshotPolicy::Warn`], interrupt) a run.
#[derive(Debug, thiserror::Error)]
pub enum ClimbError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Could not load goal image: {0}")]
    Goal(#[source] ImageIoError),
    #[error(transparent)]
    Metric(#[from] MetricError),
    #[error("Snapshot at iteration {iteration} failed: {source}")]
    Snapshot {
        iteration: u64,
        #[source]
        source: ImageIoError,
    },
    #[error("Could not write final candidate: {0}")]
    Output(#[source] ImageIoError),
    #[error("Climber has already terminated")]
    Terminated,
}

impl ClimbError {
    /// True for failures the loop can survive without breaking its invariants.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ClimbError::Snapshot { .. })
    }
}

/// The kept image and its score.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub image: RgbImage,
    pub distance: f64,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct ClimbResult {
    pub candidate: Candidate,
    pub stats: ClimbStats,
}

/// Hill-climbing engine over a fixed goal image.
pub struct HillClimber<S: CandidateSink> {
    config: ClimbConfig,
    goal: RgbImage,
    rng: StdRng,
    ctx: MutationContext,
    sink: S,
    candidate: Candidate,
    initial_distance: f64,
    phase: ClimbPhase,
    iteration: u64,
    promotions: u64,
    snapshot_failures: u64,
}

impl HillClimber<PngSink> {
    /// Load the goal from `config.goal_path` and write PNGs per `config.output`.
    pub fn from_config(config: ClimbConfig) -> Result<Self, ClimbError> {
        config.validate()?;
        let goal = load_goal(&config.goal_path).map_err(ClimbError::Goal)?;
        let sink = PngSink::new(config.output.clone());
        Self::new(config, goal, sink)
    }
}

impl<S: CandidateSink> HillClimber<S> {
    /// Create an engine seeded from `config.random_seed`, or from entropy.
    pub fn new(config: ClimbConfig, goal: RgbImage, sink: S) -> Result<Self, ClimbError> {
        let seed = config.random_seed.unwrap_or_else(rand::random);
        Self::with_rng(config, goal, sink, StdRng::seed_from_u64(seed))
    }

    /// Create an engine drawing from the given random source.
    pub fn with_rng(
        config: ClimbConfig,
        goal: RgbImage,
        sink: S,
        mut rng: StdRng,
    ) -> Result<Self, ClimbError> {
        config.validate()?;

        let ctx = MutationContext {
            colors: config.colors,
            smoother: Smoother::new(config.smoothing.clone()),
            metric: config.metric,
        };

        let (width, height) = goal.dimensions();
        let image = noise(width, height, &ctx.colors, &mut rng);
        let initial_distance = distance(&image, &goal, ctx.metric)?;
        info!(
            "Seeded {}x{} candidate ({:?} metric), distance {:.6}",
            width, height, ctx.metric, initial_distance
        );

        Ok(Self {
            config,
            goal,
            rng,
            ctx,
            sink,
            candidate: Candidate {
                image,
                distance: initial_distance,
            },
            initial_distance,
            phase: ClimbPhase::Seeded,
            iteration: 0,
            promotions: 0,
            snapshot_failures: 0,
        })
    }

    pub fn phase(&self) -> ClimbPhase {
        self.phase
    }

    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn goal(&self) -> &RgbImage {
        &self.goal
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run one mutate-and-score iteration.
    ///
    /// A terminated climber is left untouched and reports `ClimbError::Terminated`.
    pub fn step(&mut self) -> Result<ClimbProgress, ClimbError> {
        if self.phase == ClimbPhase::Terminated {
            return Err(ClimbError::Terminated);
        }
        self.phase = ClimbPhase::Iterating;
        let iteration = self.iteration;
        let rate = self.rng.r#gen::<f64>() * self.config.max_mutation_rate;

        let trial = mutate(
            &self.goal,
            &self.candidate.image,
            rate,
            &self.ctx,
            &mut self.rng,
        )?;
        self.iteration += 1;

        let previous_distance = self.candidate.distance;
        let promoted = trial.distance < previous_distance;
        if promoted {
            debug!(
                "Promoted at gen {}: (mut: {:.6}, flipped: {}) {:.6} -> {:.6}",
                iteration, rate, trial.flipped, previous_distance, trial.distance
            );
            self.candidate = Candidate {
                image: trial.image,
                distance: trial.distance,
            };
            self.promotions += 1;

            if let Err(source) = self.sink.snapshot(iteration, &self.candidate.image) {
                let err = ClimbError::Snapshot { iteration, source };
                match self.config.snapshot_policy {
                    SnapshotPolicy::Abort => return Err(err),
                    SnapshotPolicy::Warn => {
                        warn!("{}", err);
                        self.snapshot_failures += 1;
                    }
                }
            }
        }

        Ok(ClimbProgress {
            iteration,
            total_iterations: self.config.iterations,
            mutation_rate: rate,
            previous_distance,
            trial_distance: trial.distance,
            kept_distance: self.candidate.distance,
            promoted,
        })
    }

    /// Run the remaining iterations, reporting progress after each one.
    ///
    /// On a fatal error the kept candidate is still handed to the sink's
    /// `finish` before the error is returned. The sink is finished at most
    /// once; running a terminated climber returns `ClimbError::Terminated`.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Result<ClimbResult, ClimbError>
    where
        F: FnMut(&ClimbProgress),
    {
        if self.phase == ClimbPhase::Terminated {
            return Err(ClimbError::Terminated);
        }

        let start_time = Instant::now();
        let start_iteration = self.iteration;

        while self.iteration < self.config.iterations {
            let iteration = self.iteration;
            match self.step() {
                Ok(progress) => callback(&progress),
                Err(err) => {
                    self.phase = ClimbPhase::Terminated;
                    error!("Aborting at iteration {}: {}", iteration, err);
                    if let Err(save_err) = self.sink.finish(&self.candidate.image) {
                        error!("Could not persist kept candidate: {}", save_err);
                    }
                    return Err(err);
                }
            }
        }

        self.phase = ClimbPhase::Terminated;
        self.sink
            .finish(&self.candidate.image)
            .map_err(ClimbError::Output)?;

        let elapsed = start_time.elapsed().as_secs_f64();
        let executed = self.iteration - start_iteration;
        let stats = ClimbStats {
            iterations: self.iteration,
            promotions: self.promotions,
            initial_distance: self.initial_distance,
            final_distance: self.candidate.distance,
            snapshot_failures: self.snapshot_failures,
            elapsed_seconds: elapsed,
            iterations_per_second: if elapsed > 0.0 {
                executed as f64 / elapsed
            } else {
                0.0
            },
        };
        info!(
            "Finished {} iterations, {} promotions, distance {:.6} -> {:.6}",
            stats.iterations, stats.promotions, stats.initial_distance, stats.final_distance
        );

        Ok(ClimbResult {
            candidate: self.candidate.clone(),
            stats,
        })
    }

    /// Run to completion (blocking).
    pub fn run(&mut self) -> Result<ClimbResult, ClimbError> {
        self.run_with_callback(|_| {})
    }
}
