//! Dispatcher - the process-wide execution strategy switch
//!
//! # Lifecycle
//! - created on first use, lives until process exit, never torn down
//! - starts out with the default `PooledStrategy`
//!
//! # Concurrency
//! The active strategy is a single `Arc` behind a lock that is only held to
//! clone or replace that `Arc`. Tasks are never submitted under the lock, and a
//! switch never touches tasks already handed to the previous strategy.

use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use crate::domain::{Completion, DispatchError, StrategyKind};
use crate::impls::{InlineStrategy, PoolConfig, PooledStrategy};
use crate::ports::{ManagedPool, StrategyExt, StrategyRef};

static DEFAULT_POOL: Lazy<Arc<PooledStrategy>> = Lazy::new(|| {
    let pool = PooledStrategy::new(&PoolConfig::default())
        .unwrap_or_else(|err| panic!("default worker pool could not start: {err}"));
    Arc::new(pool)
});

static STATE: Lazy<DispatcherState> = Lazy::new(DispatcherState::new);

struct DispatcherState {
    /// Never empty: only ever replaced wholesale.
    active: RwLock<StrategyRef>,
}

impl DispatcherState {
    fn new() -> Self {
        let default: StrategyRef = Dispatcher::default_pool();
        Self {
            active: RwLock::new(default),
        }
    }

    fn load(&self) -> StrategyRef {
        Arc::clone(&self.active.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn store(&self, strategy: StrategyRef) -> StrategyRef {
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *active, strategy)
    }
}

/// Process-wide holder of the active execution strategy.
///
/// All operations are associated functions; there is no instance to pass
/// around.
///
/// # Example
/// ```no_run
/// use switchyard_core::app::Dispatcher;
/// use switchyard_core::ports::StrategyExt;
///
/// Dispatcher::use_inline();
/// let answer = Dispatcher::current().submit(|| 42).join();
/// assert_eq!(answer, Ok(42));
/// Dispatcher::use_default();
/// ```
pub struct Dispatcher;

impl Dispatcher {
    /// The strategy new tasks should go to.
    pub fn current() -> StrategyRef {
        STATE.load()
    }

    /// Install `strategy` for every task submitted from now on.
    ///
    /// `None` is rejected and leaves the active strategy untouched.
    pub fn set(strategy: Option<StrategyRef>) -> Result<(), DispatchError> {
        let strategy =
            strategy.ok_or(DispatchError::InvalidArgument("execution strategy cannot be absent"))?;
        Self::replace(strategy);
        Ok(())
    }

    /// Run every task on the thread that submits it.
    pub fn use_inline() {
        Self::replace(InlineStrategy::shared());
    }

    /// Go back to the default worker pool.
    pub fn use_default() {
        Self::replace(Self::default_pool());
    }

    /// True only if the active strategy is the shared `InlineStrategy`.
    pub fn is_inline() -> bool {
        let inline: StrategyRef = InlineStrategy::shared();
        Arc::ptr_eq(&Self::current(), &inline)
    }

    pub fn mode() -> StrategyKind {
        Self::kind_of(&Self::current())
    }

    /// The pool installed at startup. Built on first use, never shut down by
    /// the dispatcher.
    pub fn default_pool() -> Arc<PooledStrategy> {
        Arc::clone(&DEFAULT_POOL)
    }

    /// Active strategy if it manages a pool, the default pool otherwise.
    #[deprecated(note = "Use `Dispatcher::current()` instead. Kept for callers that manage the pool directly.")]
    pub fn pool() -> Arc<dyn ManagedPool> {
        match Self::current().into_managed() {
            Some(pool) => pool,
            None => Self::default_pool(),
        }
    }

    /// Submit `task` to the active strategy.
    pub fn submit<T, F>(task: F) -> Completion<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        Self::current().submit(task)
    }

    fn replace(strategy: StrategyRef) {
        let new_kind = Self::kind_of(&strategy);
        let previous = STATE.store(strategy);
        tracing::debug!(from = %Self::kind_of(&previous), to = %new_kind, "execution strategy switched");
    }

    /// Identity check only; never builds the default pool.
    fn kind_of(strategy: &StrategyRef) -> StrategyKind {
        let inline: StrategyRef = InlineStrategy::shared();
        if Arc::ptr_eq(strategy, &inline) {
            return StrategyKind::Inline;
        }
        match Lazy::get(&DEFAULT_POOL) {
            Some(pool) if Arc::ptr_eq(strategy, &(Arc::clone(pool) as StrategyRef)) => StrategyKind::Pooled,
            _ => StrategyKind::Custom,
        }
    }
}
