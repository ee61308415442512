//! switchyard-core
//!
//! Process-wide task dispatch switch: every unit of work a host submits either
//! runs on a shared worker pool or inline on the submitting thread.
//!
//! # Modules
//! - **domain**: errors, the `Task` unit of work, the `Completion` handle, strategy kinds
//! - **ports**: `ExecutionStrategy` and the `ManagedPool` capability
//! - **impls**: `PooledStrategy` (default) and `InlineStrategy`
//! - **app**: the `Dispatcher` and the host-facing startup toggle
//!
//! # Example
//! ```no_run
//! use switchyard_core::app::Dispatcher;
//!
//! let done = Dispatcher::submit(|| 40 + 2);
//! assert_eq!(done.join().unwrap(), 42);
//!
//! Dispatcher::use_inline();
//! assert!(Dispatcher::is_inline());
//! Dispatcher::use_default();
//! ```

pub mod domain;
pub mod ports;
pub mod impls;
pub mod app;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::app::{DispatchConfig, Dispatcher};
pub use self::domain::{Completion, DispatchError, DispatchMode, StrategyKind, Task, TaskError};
pub use self::impls::{InlineStrategy, PoolConfig, PooledStrategy};
pub use self::ports::{ExecutionStrategy, ManagedPool, StrategyExt, StrategyRef};
