//! ExecutionStrategy port - where a submitted task runs
//!
//! # Implementations
//! - `PooledStrategy`: shared worker pool (default)
//! - `InlineStrategy`: the submitting thread
//! - anything a host installs through `Dispatcher::set`

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::domain::{Completion, DispatchError, Task, TaskError};
use crate::ports::ManagedPool;

/// Shared handle to a strategy, as held by the dispatcher.
pub type StrategyRef = Arc<dyn ExecutionStrategy>;

/// ExecutionStrategy runs opaque tasks somewhere.
///
/// # Thread Safety
/// - `Send + Sync`: the active strategy is shared by every submitting thread
pub trait ExecutionStrategy: Send + Sync {
    /// Short name used in logs and rejection errors.
    fn name(&self) -> &'static str;

    /// Run `task` now or later.
    ///
    /// Returning `Err` means the task was not accepted and will never run.
    fn execute(&self, task: Task) -> Result<(), DispatchError>;

    /// Capability query: strategies owning shutdown-able workers return
    /// themselves as a `ManagedPool`.
    fn into_managed(self: Arc<Self>) -> Option<Arc<dyn ManagedPool>> {
        None
    }
}

/// Value-returning submission on top of `ExecutionStrategy::execute`.
///
/// Failures of the task itself (panics) are caught where the task runs and
/// delivered through the returned `Completion`.
pub trait StrategyExt: ExecutionStrategy {
    fn submit<T, F>(&self, task: F) -> Completion<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Task = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(task)).map_err(TaskError::from_panic);
            // receiver gone means nobody is waiting for the result
            let _ = tx.send(outcome);
        });

        if let Err(err) = self.execute(job) {
            tracing::debug!(strategy = self.name(), error = %err, "task rejected");
            return Completion::ready(Err(TaskError::Rejected(err.to_string())));
        }
        Completion::from_receiver(rx)
    }
}

impl<S: ExecutionStrategy + ?Sized> StrategyExt for S {}
