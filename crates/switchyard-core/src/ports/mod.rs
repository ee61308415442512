//! Ports - the seams a host can plug into
//!
//! # Traits
//! - **ExecutionStrategy**: decides where a task runs
//! - **ManagedPool**: optional capability of strategies that own workers

pub mod execution_strategy;
pub mod managed_pool;

pub use self::execution_strategy::{ExecutionStrategy, StrategyExt, StrategyRef};
pub use self::managed_pool::ManagedPool;
