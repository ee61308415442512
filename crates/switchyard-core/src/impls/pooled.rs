//! PooledStrategy - named worker pool backed by a dedicated tokio runtime
//!
//! # Sizing
//! - default: available parallelism × `POOL_MULTIPLIER`
//! - fixed for the lifetime of the pool
//!
//! # Worker names
//! `<prefix>-<index>`, index starting at 0, so a stack dump shows which pool a
//! thread belongs to.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use serde::{Deserialize, Serialize};
use tokio::runtime::{Builder, Handle, Runtime};

use crate::domain::{DispatchError, Task};
use crate::ports::{ExecutionStrategy, ManagedPool};

/// Workers per unit of available parallelism.
pub const POOL_MULTIPLIER: usize = 2;

pub const DEFAULT_THREAD_NAME_PREFIX: &str = "switchyard";

/// Construction options for a `PooledStrategy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// `None` sizes the pool from the host's parallelism.
    pub workers: Option<usize>,
    pub thread_name_prefix: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: None,
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
        }
    }
}

impl PoolConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Number of workers this config produces.
    pub fn resolved_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
                * POOL_MULTIPLIER
        })
    }
}

/// Bounded pool running tasks concurrently, off the submitting thread.
///
/// Submission never waits for a free worker; tasks queue inside the runtime and
/// may finish in any order.
pub struct PooledStrategy {
    handle: Handle,
    /// Taken on shutdown.
    runtime: Mutex<Option<Runtime>>,
    shut_down: AtomicBool,
    workers: usize,
    thread_name_prefix: String,
}

impl PooledStrategy {
    pub fn new(config: &PoolConfig) -> Result<Self, DispatchError> {
        let workers = config.resolved_workers();
        if workers == 0 {
            return Err(DispatchError::InvalidArgument("pool needs at least one worker"));
        }

        let prefix = config.thread_name_prefix.clone();
        let next_index = Arc::new(AtomicUsize::new(0));
        let runtime = Builder::new_multi_thread()
            .worker_threads(workers)
            .thread_name_fn(move || {
                let index = next_index.fetch_add(1, Ordering::Relaxed);
                format!("{prefix}-{index}")
            })
            .enable_all()
            .build()?;

        tracing::info!(workers, prefix = %config.thread_name_prefix, "worker pool started");

        Ok(Self {
            handle: runtime.handle().clone(),
            runtime: Mutex::new(Some(runtime)),
            shut_down: AtomicBool::new(false),
            workers,
            thread_name_prefix: config.thread_name_prefix.clone(),
        })
    }

    pub fn thread_name_prefix(&self) -> &str {
        &self.thread_name_prefix
    }
}

impl ExecutionStrategy for PooledStrategy {
    fn name(&self) -> &'static str {
        "pooled"
    }

    fn execute(&self, task: Task) -> Result<(), DispatchError> {
        if self.shut_down.load(Ordering::Acquire) {
            return Err(DispatchError::Rejected { strategy: self.name() });
        }
        // detached: the task reports back through its own channel
        drop(self.handle.spawn(async move { task() }));
        Ok(())
    }

    fn into_managed(self: Arc<Self>) -> Option<Arc<dyn ManagedPool>> {
        Some(self)
    }
}

impl ManagedPool for PooledStrategy {
    fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            return;
        }
        let runtime = self
            .runtime
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(runtime) = runtime {
            tracing::info!(prefix = %self.thread_name_prefix, "worker pool shutting down");
            runtime.shutdown_background();
        }
    }

    fn is_shutdown(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }

    fn worker_count(&self) -> usize {
        self.workers
    }
}

impl Drop for PooledStrategy {
    fn drop(&mut self) {
        // a plain Runtime drop panics inside async contexts
        self.shutdown();
    }
}

impl std::fmt::Debug for PooledStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledStrategy")
            .field("workers", &self.workers)
            .field("thread_name_prefix", &self.thread_name_prefix)
            .field("shut_down", &self.is_shutdown())
            .finish()
    }
}
