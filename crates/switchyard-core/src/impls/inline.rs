//! InlineStrategy - run the task before `execute` returns
//!
//! The submitting thread is blocked for the whole task, including any task the
//! task itself submits (those run depth-first on the same thread). Thread-local
//! state of the submitter is visible to the task.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::domain::{DispatchError, Task};
use crate::ports::ExecutionStrategy;

static SHARED: Lazy<Arc<InlineStrategy>> = Lazy::new(|| Arc::new(InlineStrategy { _private: () }));

/// Stateless strategy executing every task on the caller's thread.
///
/// There is exactly one instance; the dispatcher recognises inline mode by
/// comparing against it.
#[derive(Debug)]
pub struct InlineStrategy {
    _private: (),
}

impl InlineStrategy {
    /// The process-wide instance.
    pub fn shared() -> Arc<InlineStrategy> {
        Arc::clone(&SHARED)
    }
}

impl ExecutionStrategy for InlineStrategy {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn execute(&self, task: Task) -> Result<(), DispatchError> {
        task();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskError;
    use crate::ports::StrategyExt;
    use std::cell::Cell;
    use std::sync::Mutex;
    use std::thread;

    #[test]
    fn test_shared_is_a_single_instance() {
        assert!(Arc::ptr_eq(&InlineStrategy::shared(), &InlineStrategy::shared()));
    }

    #[test]
    fn test_runs_on_the_calling_thread() {
        let caller = thread::current().id();
        let completion = InlineStrategy::shared().submit(move || thread::current().id() == caller);

        assert!(completion.is_ready());
        assert_eq!(completion.join(), Ok(true));
    }

    #[test]
    fn test_sees_thread_local_state_of_the_caller() {
        thread_local! {
            static REQUEST_ID: Cell<u32> = const { Cell::new(0) };
        }
        REQUEST_ID.with(|id| id.set(41));

        let seen = InlineStrategy::shared().submit(|| REQUEST_ID.with(Cell::get)).join();
        assert_eq!(seen, Ok(41));
    }

    #[test]
    fn test_nested_submissions_run_depth_first() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let inline = InlineStrategy::shared();

        let outer_order = Arc::clone(&order);
        let outer_inline = Arc::clone(&inline);
        inline
            .submit(move || {
                outer_order.lock().unwrap().push("outer-start");
                let inner_order = Arc::clone(&outer_order);
                outer_inline
                    .submit(move || inner_order.lock().unwrap().push("inner"))
                    .join()
                    .unwrap();
                outer_order.lock().unwrap().push("outer-end");
            })
            .join()
            .unwrap();
        order.lock().unwrap().push("after");

        assert_eq!(*order.lock().unwrap(), vec!["outer-start", "inner", "outer-end", "after"]);
    }

    #[test]
    fn test_panics_are_delivered_not_raised() {
        let completion = InlineStrategy::shared().submit(|| -> u8 { panic!("bad input") });
        assert_eq!(completion.join(), Err(TaskError::Panicked("bad input".to_string())));
    }

    #[test]
    fn test_is_not_a_managed_pool() {
        let strategy: crate::ports::StrategyRef = InlineStrategy::shared();
        assert!(strategy.into_managed().is_none());
    }
}
