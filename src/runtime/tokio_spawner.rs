//! Tokio runtime spawner implementation.

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::{Builder, Handle, Runtime};

use crate::core::Spawn;

/// Tokio-based spawner that executes tasks on a tokio runtime.
///
/// Cloning is cheap and clones dispatch onto the same runtime. When the
/// spawner built its own runtime, that runtime stays alive as long as any
/// clone of the spawner does.
#[derive(Clone)]
pub struct TokioSpawner {
    handle: Handle,
    /// Present when this spawner built the runtime itself.
    owned: Option<Arc<Runtime>>,
}

impl TokioSpawner {
    /// Creates a spawner from an existing runtime handle.
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            owned: None,
        }
    }

    /// Creates a spawner for the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime. Use [`new`](Self::new)
    /// when a handle is already available.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Creates a spawner that owns a new multi-threaded runtime.
    ///
    /// A `worker_threads` of zero sizes the runtime to the number of
    /// available CPUs.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from the runtime builder when worker thread
    /// creation fails.
    pub fn with_worker_threads(worker_threads: usize) -> Result<Self, std::io::Error> {
        let threads = if worker_threads == 0 {
            num_cpus::get()
        } else {
            worker_threads
        };
        let runtime = Builder::new_multi_thread()
            .worker_threads(threads)
            .thread_name("fanout-runner")
            .enable_all()
            .build()?;
        Ok(Self {
            handle: runtime.handle().clone(),
            owned: Some(Arc::new(runtime)),
        })
    }

    /// True when this spawner keeps its own runtime alive, as opposed to
    /// borrowing the host's.
    #[must_use]
    pub fn owns_runtime(&self) -> bool {
        self.owned.is_some()
    }
}

impl Spawn for TokioSpawner {
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let _detached = self.handle.spawn(fut);
    }
}
