//! Failure collection for in-flight task batches.

use std::backtrace::BacktraceStatus;

use crossbeam_channel::{unbounded, Receiver, Sender};

/// A single recorded task failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    /// Rendered failure message, including the error's context chain.
    pub message: String,
    /// Rendered backtrace captured where the error was created. Empty when
    /// backtrace capture was disabled in the environment.
    pub trace: String,
}

impl FailureRecord {
    /// Builds a record from a task error, rendering its context chain and
    /// capturing its creation-site backtrace when one exists.
    #[must_use]
    pub fn from_error(error: &anyhow::Error) -> Self {
        let trace = match error.backtrace().status() {
            BacktraceStatus::Captured => error.backtrace().to_string(),
            _ => String::new(),
        };
        Self {
            message: format!("{error:#}"),
            trace,
        }
    }

    /// Record for a task that terminated without reporting an outcome.
    pub(crate) fn abnormal(reason: &str) -> Self {
        Self {
            message: reason.to_string(),
            trace: String::new(),
        }
    }

    /// True when a backtrace was captured for this failure.
    #[must_use]
    pub fn has_trace(&self) -> bool {
        !self.trace.is_empty()
    }
}

/// Thread-safe, append-only collection of failure records.
///
/// Records arrive from concurrently running tasks and keep their arrival
/// order. The collection is drained exactly once, when the owning batch
/// finishes; appending never blocks.
#[derive(Debug)]
pub struct FailureLog {
    sender: Sender<FailureRecord>,
    receiver: Receiver<FailureRecord>,
}

impl Default for FailureLog {
    fn default() -> Self {
        Self::new()
    }
}

impl FailureLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Appends a record without blocking.
    pub fn record(&self, record: FailureRecord) {
        if self.sender.send(record).is_err() {
            tracing::warn!("failure log disconnected; record dropped");
        }
    }

    /// True while no record is waiting to be drained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Number of records waiting to be drained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Removes and returns every record in arrival order.
    pub fn drain(&self) -> Vec<FailureRecord> {
        self.receiver.try_iter().collect()
    }
}
