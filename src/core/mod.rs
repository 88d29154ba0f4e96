//! Core runner, failure collection, and error types.

pub mod error;
pub mod failures;
pub mod runner;

pub use error::{AppResult, BatchFailure, RunnerError};
pub use failures::{FailureLog, FailureRecord};
pub use runner::{Spawn, TaskRunner};
