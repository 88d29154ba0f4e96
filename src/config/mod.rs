//! Configuration models for failure reporting and trace shortening.

pub mod runner;

pub use runner::{RunnerConfig, TraceConfig};
