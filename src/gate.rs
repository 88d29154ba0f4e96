//! A counting completion barrier.
//!
//! [`CompletionGate`] tracks a number of outstanding registrations and lets
//! any thread block until that number returns to zero. It is the
//! synchronization core of the task runner: every submitted task registers
//! before dispatch and arrives exactly once when it settles, so a cleared
//! gate means no task is still in flight.
//!
//! The gate is deliberately minimal. It has no notion of phases or
//! generations: once the count reaches zero, waiters are released, and new
//! registrations simply raise the count again.

use std::time::Duration;

use parking_lot::{Condvar, Mutex};

/// A barrier that counts outstanding registrations and releases waiters
/// when the count drains to zero.
///
/// Registrations are made with [`register`](Self::register) and retired
/// with [`arrive`](Self::arrive). Threads block on
/// [`wait_until_clear`](Self::wait_until_clear) until every registration
/// has arrived.
///
/// A [`register`](Self::register) that races the count's drop to zero may
/// land after waiters have already been released. Callers that need the
/// wait to cover a registration must make it before waiting starts, or
/// from a context that still holds its own registration. The task runner
/// does the latter: its owner registration is retired only once no further
/// submissions can occur.
///
/// # Examples
///
/// ```
/// use std::{sync::Arc, thread};
///
/// use fanout_runner::CompletionGate;
///
/// let gate = Arc::new(CompletionGate::new());
/// gate.register();
///
/// let worker = Arc::clone(&gate);
/// thread::spawn(move || {
///     // ... do some work ...
///     worker.arrive();
/// });
///
/// gate.wait_until_clear();
/// assert_eq!(gate.pending(), 0);
/// ```
#[derive(Debug, Default)]
pub struct CompletionGate {
    pending: Mutex<u64>,
    cleared: Condvar,
}

impl CompletionGate {
    /// Creates a gate with no outstanding registrations.
    ///
    /// A fresh gate is already clear: [`wait_until_clear`](Self::wait_until_clear)
    /// returns immediately until something registers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(0),
            cleared: Condvar::new(),
        }
    }

    /// Adds one outstanding registration.
    ///
    /// Must be paired with exactly one later call to [`arrive`](Self::arrive).
    pub fn register(&self) {
        let mut pending = self.pending.lock();
        *pending += 1;
    }

    /// Retires one registration, waking all waiters if the count reaches
    /// zero.
    ///
    /// # Panics
    ///
    /// Panics if there is no outstanding registration. An arrival without a
    /// matching registration is a bookkeeping bug in the caller, not a
    /// recoverable condition.
    pub fn arrive(&self) {
        let mut pending = self.pending.lock();
        assert!(*pending > 0, "CompletionGate::arrive without registration");
        *pending -= 1;
        if *pending == 0 {
            self.cleared.notify_all();
        }
    }

    /// Blocks the calling thread until the count of outstanding
    /// registrations is zero.
    ///
    /// Returns immediately if the gate is already clear. Spurious wakeups
    /// are absorbed internally.
    pub fn wait_until_clear(&self) {
        let mut pending = self.pending.lock();
        while *pending > 0 {
            self.cleared.wait(&mut pending);
        }
    }

    /// Blocks until the gate clears or `timeout` elapses.
    ///
    /// Returns `true` if the gate was clear when the call returned, `false`
    /// on timeout with registrations still outstanding.
    pub fn wait_until_clear_for(&self, timeout: Duration) -> bool {
        let deadline = std::time::Instant::now() + timeout;
        let mut pending = self.pending.lock();
        while *pending > 0 {
            if self.cleared.wait_until(&mut pending, deadline).timed_out() {
                return *pending == 0;
            }
        }
        true
    }

    /// Returns the current number of outstanding registrations.
    ///
    /// The value is a snapshot; by the time the caller inspects it, other
    /// threads may have registered or arrived.
    #[must_use]
    pub fn pending(&self) -> u64 {
        *self.pending.lock()
    }
}
