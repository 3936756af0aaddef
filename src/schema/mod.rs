//! Schema module - Configuration and reporting types for hill-climbing runs.

mod config;
mod progress;

pub use config::*;
pub use progress::*;
