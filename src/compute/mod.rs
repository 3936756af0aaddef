//! Compute module - Scoring, mutation and search for Pixel Climb.

mod climber;
mod color;
mod io;
mod metric;
mod mutation;
mod noise;
mod sink;
mod smoothing;

pub use climber::*;
pub use color::*;
pub use io::*;
pub use metric::*;
pub use mutation::*;
pub use noise::*;
pub use sink::*;
pub use smoothing::*;
