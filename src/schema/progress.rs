//! Progress and result statistics for a hill-climbing run.

use serde::{Deserialize, Serialize};

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClimbPhase {
    /// Noise candidate generated and scored once.
    Seeded,
    /// Mutate-and-score loop in progress.
    Iterating,
    /// Loop finished or aborted; final candidate persisted.
    Terminated,
}

/// Per-iteration progress report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimbProgress {
    /// Zero-based iteration index.
    pub iteration: u64,
    /// Total iterations configured.
    pub total_iterations: u64,
    /// Mutation rate drawn for this iteration.
    pub mutation_rate: f64,
    /// Kept distance before this iteration.
    pub previous_distance: f64,
    /// Score of this iteration's trial candidate.
    pub trial_distance: f64,
    /// Kept distance after this iteration.
    pub kept_distance: f64,
    /// Whether the trial replaced the kept candidate.
    pub promoted: bool,
}

/// Summary statistics for a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimbStats {
    /// Iterations actually executed.
    pub iterations: u64,
    /// Number of times the kept candidate was replaced.
    pub promotions: u64,
    /// Distance of the seeded noise candidate.
    pub initial_distance: f64,
    /// Distance of the kept candidate at termination.
    pub final_distance: f64,
    /// Snapshot writes that failed and were tolerated.
    pub snapshot_failures: u64,
    pub elapsed_seconds: f64,
    pub iterations_per_second: f64,
}
