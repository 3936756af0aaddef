//! Destinations for snapshots and the final candidate.

use image::RgbImage;

use super::io::{ImageIoError, save_png};
use crate::schema::OutputConfig;

/// Receives improved candidates during a run and the kept one at the end.
pub trait CandidateSink {
    /// Called after every promotion.
    fn snapshot(&mut self, iteration: u64, candidate: &RgbImage) -> Result<(), ImageIoError>;

    /// Called once when the run terminates.
    fn finish(&mut self, candidate: &RgbImage) -> Result<(), ImageIoError>;
}

/// Writes PNG files to the locations in an [`OutputConfig`].
#[derive(Debug, Clone)]
pub struct PngSink {
    output: OutputConfig,
}

impl PngSink {
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }
}

impl CandidateSink for PngSink {
    fn snapshot(&mut self, iteration: u64, candidate: &RgbImage) -> Result<(), ImageIoError> {
        if !self.output.snapshots {
            return Ok(());
        }
        save_png(candidate, self.output.snapshot_path(iteration))
    }

    fn finish(&mut self, candidate: &RgbImage) -> Result<(), ImageIoError> {
        save_png(candidate, &self.output.final_path)
    }
}

/// Keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub snapshots: Vec<(u64, RgbImage)>,
    pub finished: Option<RgbImage>,
}

impl CandidateSink for MemorySink {
    fn snapshot(&mut self, iteration: u64, candidate: &RgbImage) -> Result<(), ImageIoError> {
        self.snapshots.push((iteration, candidate.clone()));
        Ok(())
    }

    fn finish(&mut self, candidate: &RgbImage) -> Result<(), ImageIoError> {
        self.finished = Some(candidate.clone());
        Ok(())
    }
}

impl<S: CandidateSink + ?Sized> CandidateSink for &mut S {
    fn snapshot(&mut self, iteration: u64, candidate: &RgbImage) -> Result<(), ImageIoError> {
        (**self).snapshot(iteration, candidate)
    }

    fn finish(&mut self, candidate: &RgbImage) -> Result<(), ImageIoError> {
        (**self).finish(candidate)
    }
}
