//! ManagedPool port - strategies that own worker threads

use crate::ports::ExecutionStrategy;

/// A strategy whose workers can be counted and shut down.
///
/// Only needed by legacy call sites that manage the pool directly; new code
/// should go through `Dispatcher::current()`.
pub trait ManagedPool: ExecutionStrategy {
    /// Stop accepting tasks. Already queued tasks may still finish.
    /// Calling it again has no effect.
    fn shutdown(&self);

    fn is_shutdown(&self) -> bool;

    fn worker_count(&self) -> usize;
}
