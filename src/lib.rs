//! # Fanout Runner
//!
//! A small coordinator for unbounded fan-out of fallible, independent units
//! of work.
//!
//! This library solves one narrow problem well: submit any number of tasks
//! for concurrent execution on a host-provided runtime, then block until all
//! of them have finished and receive every failure that occurred along the
//! way as a single consolidated report. Nothing is retried, nothing is
//! cancelled, and no task result values are carried; the coordinator tracks
//! success or failure, nothing more.
//!
//! ## Core Problem Solved
//!
//! Batch workloads such as dependency resolution fan out into many
//! independent operations where:
//!
//! - **Failures must not be lost**: a single failing operation should not
//!   abort the batch, and every failure must reach the caller.
//! - **Completion must be exact**: the caller needs a point in time after
//!   which every submitted operation has observably finished.
//! - **The runtime is not ours to own**: work is dispatched onto whatever
//!   substrate the host application already runs (Tokio by default), with no
//!   worker threads created or sized here.
//!
//! ## Key Features
//!
//! - **Fire-and-forget submission**: [`TaskRunner::submit`] registers the
//!   task on a completion barrier before dispatch and returns immediately.
//! - **Single-use completion await**: [`TaskRunner::await_completion`]
//!   consumes the runner, blocks until the barrier drains, and returns one
//!   [`BatchFailure`] listing every numbered failure with a shortened trace.
//! - **Panic containment**: a task that panics is recorded as a failure and
//!   still releases its barrier registration.
//! - **Pluggable substrate**: the [`Spawn`] trait decouples the runner from
//!   the executor; a Tokio adapter ships behind the `tokio-runtime` feature.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fanout_runner::{TaskRunner, TokioSpawner};
//!
//! let runner = TaskRunner::new(TokioSpawner::current());
//!
//! for artifact in artifacts {
//!     runner.submit(async move { resolve_model(artifact).await });
//! }
//!
//! // Blocks until every task settled; failures arrive as one report.
//! runner.await_completion()?;
//! ```
//!
//! For complete examples, see `tests/runner_test.rs`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Counting completion barrier used to track in-flight tasks.
pub mod gate;
/// Core runner, failure collection, and error types.
pub mod core;
/// Configuration models for failure reporting and trace shortening.
pub mod config;
/// Runtime adapters implementing the dispatch substrate.
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use crate::config::{RunnerConfig, TraceConfig};
pub use crate::core::{
    AppResult, BatchFailure, FailureLog, FailureRecord, RunnerError, Spawn, TaskRunner,
};
pub use crate::gate::CompletionGate;
#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::TokioSpawner;
