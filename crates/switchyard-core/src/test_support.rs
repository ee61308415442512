//! Serialises tests that switch the process-wide strategy.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::app::Dispatcher;

static DISPATCHER_LOCK: Mutex<()> = Mutex::new(());

/// Exclusive access to the dispatcher; restores the default strategy on drop.
pub(crate) struct DispatcherGuard {
    _lock: MutexGuard<'static, ()>,
}

pub(crate) fn exclusive_dispatcher() -> DispatcherGuard {
    let lock = DISPATCHER_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    Dispatcher::use_default();
    DispatcherGuard { _lock: lock }
}

impl Drop for DispatcherGuard {
    fn drop(&mut self) {
        Dispatcher::use_default();
    }
}
