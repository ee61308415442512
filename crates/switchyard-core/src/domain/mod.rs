//! Domain - the vocabulary shared by strategies and the dispatcher
//!
//! # Contents
//! - **errors**: `DispatchError` (switching / submission) and `TaskError` (task outcome)
//! - **task**: the opaque unit of work
//! - **completion**: the handle a submitter waits on
//! - **mode**: `StrategyKind` and the host-facing `DispatchMode`

pub mod completion;
pub mod errors;
pub mod mode;
pub mod task;

pub use self::completion::{Completion, Outcome};
pub use self::errors::{DispatchError, TaskError};
pub use self::mode::{DispatchMode, StrategyKind};
pub use self::task::Task;
