//! Unbounded fan-out task runner with a completion barrier.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use crate::config::RunnerConfig;
use crate::core::error::{AppResult, BatchFailure, RunnerError};
use crate::core::failures::{FailureLog, FailureRecord};
use crate::gate::CompletionGate;

/// Abstraction over the substrate that executes submitted tasks.
///
/// The runner never creates or sizes threads; it hands every task to an
/// implementation of this trait and relies on the host's executor for
/// concurrency.
pub trait Spawn {
    /// Hands a future to the underlying executor for concurrent execution.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Coordinates unbounded fan-out of fallible, independent tasks.
///
/// A runner serves exactly one batch. Tasks are submitted fire-and-forget
/// with [`submit`](Self::submit); the batch ends with a single call to
/// [`await_completion`](Self::await_completion), which consumes the runner,
/// blocks until every task has settled, and raises one [`BatchFailure`]
/// listing everything that went wrong.
///
/// Task failures never propagate to the submitting thread and never affect
/// sibling tasks. There is no concurrency bound, no retry, and no result
/// channel here; hosts needing those wrap the substrate, not the runner.
pub struct TaskRunner<S: Spawn> {
    spawner: S,
    config: RunnerConfig,
    /// Completion barrier. Holds one owner registration from construction
    /// until the final await retires it.
    gate: Arc<CompletionGate>,
    failures: Arc<FailureLog>,
    /// Tasks submitted over the runner's lifetime.
    submitted: AtomicU64,
    batch_id: Uuid,
}

impl<S: Spawn> TaskRunner<S> {
    /// Creates a runner with default reporting configuration.
    #[must_use]
    pub fn new(spawner: S) -> Self {
        let gate = CompletionGate::new();
        gate.register();
        Self {
            spawner,
            config: RunnerConfig::default(),
            gate: Arc::new(gate),
            failures: Arc::new(FailureLog::new()),
            submitted: AtomicU64::new(0),
            batch_id: Uuid::new_v4(),
        }
    }

    /// Creates a runner with a validated reporting configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidConfig`] when the configuration fails
    /// validation.
    pub fn with_config(spawner: S, config: RunnerConfig) -> Result<Self, RunnerError> {
        config.validate().map_err(RunnerError::InvalidConfig)?;
        let mut runner = Self::new(spawner);
        runner.config = config;
        Ok(runner)
    }

    /// Identifier of the batch this runner serves, for log correlation.
    #[must_use]
    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    /// Number of tasks submitted so far.
    #[must_use]
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Acquire)
    }

    /// Number of submitted tasks that have not yet settled.
    #[must_use]
    pub fn in_flight(&self) -> u64 {
        // The gate also holds the owner registration until the final await.
        self.gate.pending().saturating_sub(1)
    }

    /// Submits a task for concurrent execution and returns immediately.
    ///
    /// The task is registered on the completion barrier before it reaches
    /// the spawner, so a concurrent [`await_completion`](Self::await_completion)
    /// cannot release while this task is still in flight. A task failure is
    /// recorded for the final report and never propagates to the submitting
    /// thread.
    pub fn submit<F>(&self, task: F)
    where
        F: Future<Output = AppResult<()>> + Send + 'static,
    {
        let sequence = self.submitted.fetch_add(1, Ordering::AcqRel) + 1;
        let guard = ArrivalGuard::new(Arc::clone(&self.gate), Arc::clone(&self.failures));
        tracing::trace!("batch {} dispatching task #{}", self.batch_id, sequence);
        self.spawner.spawn(async move {
            match task.await {
                Ok(()) => guard.succeed(),
                Err(error) => guard.fail(&error),
            }
        });
    }

    /// Submits a synchronous closure as a task.
    ///
    /// The closure runs inside the spawned future, so it should not block
    /// for long unless the substrate tolerates blocking.
    pub fn submit_fn<T>(&self, task: T)
    where
        T: FnOnce() -> AppResult<()> + Send + 'static,
    {
        self.submit(async move { task() });
    }

    /// Blocks until every submitted task has settled, then reports failures.
    ///
    /// Consumes the runner, so nothing can be submitted to the batch
    /// afterwards. Returns `Ok(())` when no task failed; otherwise each
    /// failure is logged with its entry number and one [`BatchFailure`]
    /// carrying the numbered report is returned.
    ///
    /// This parks the calling thread. From async code, use
    /// [`await_completion_async`](Self::await_completion_async) instead.
    ///
    /// # Errors
    ///
    /// Returns [`BatchFailure`] when at least one task failed.
    pub fn await_completion(self) -> Result<(), BatchFailure> {
        self.gate.arrive();
        self.gate.wait_until_clear();
        self.finish()
    }

    /// Asynchronous variant of [`await_completion`](Self::await_completion).
    ///
    /// The barrier wait runs on the runtime's blocking thread pool, so the
    /// calling task does not stall an executor worker.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Interrupted`] when the runtime tears down the
    /// blocking wait, or [`RunnerError::TasksFailed`] when at least one task
    /// failed.
    #[cfg(feature = "tokio-runtime")]
    pub async fn await_completion_async(self) -> Result<(), RunnerError> {
        self.gate.arrive();
        let gate = Arc::clone(&self.gate);
        tokio::task::spawn_blocking(move || gate.wait_until_clear())
            .await
            .map_err(|e| RunnerError::Interrupted(e.to_string()))?;
        self.finish().map_err(RunnerError::from)
    }

    /// Drains recorded failures and builds the batch outcome.
    fn finish(self) -> Result<(), BatchFailure> {
        let submitted = self.submitted.load(Ordering::Acquire);
        let drained = self.failures.drain();
        match BatchFailure::from_records(drained, &self.config) {
            None => {
                tracing::debug!(
                    "batch {} completed: {} tasks, no failures",
                    self.batch_id,
                    submitted
                );
                Ok(())
            }
            Some(batch) => {
                tracing::error!("batch {}: {}", self.batch_id, self.config.report_header);
                for entry in batch.entries() {
                    tracing::error!("batch {} failure {}", self.batch_id, entry);
                }
                tracing::warn!(
                    "batch {} completed: {} of {} tasks failed",
                    self.batch_id,
                    batch.count(),
                    submitted
                );
                Err(batch)
            }
        }
    }
}

/// Retires a task's barrier registration exactly once.
///
/// Created before dispatch and consumed when the task settles. If the task
/// never settles, because its future panicked or was dropped by the
/// substrate, the guard records an abnormal failure on drop and still
/// arrives at the gate.
struct ArrivalGuard {
    gate: Arc<CompletionGate>,
    failures: Arc<FailureLog>,
    settled: bool,
}

impl ArrivalGuard {
    fn new(gate: Arc<CompletionGate>, failures: Arc<FailureLog>) -> Self {
        gate.register();
        Self {
            gate,
            failures,
            settled: false,
        }
    }

    fn succeed(mut self) {
        self.settled = true;
    }

    fn fail(mut self, error: &anyhow::Error) {
        self.failures.record(FailureRecord::from_error(error));
        self.settled = true;
    }
}

impl Drop for ArrivalGuard {
    fn drop(&mut self) {
        if !self.settled {
            let reason = if std::thread::panicking() {
                "task panicked before completing"
            } else {
                "task dropped before completing"
            };
            tracing::warn!("task terminated abnormally: {}", reason);
            self.failures.record(FailureRecord::abnormal(reason));
        }
        self.gate.arrive();
    }
}
