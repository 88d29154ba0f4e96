//! Shared utilities.

pub mod telemetry;
pub mod trace;

pub use telemetry::*;
pub use trace::*;
