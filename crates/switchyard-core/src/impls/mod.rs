//! Impls - the two built-in execution strategies
//!
//! # Contents
//! - **PooledStrategy**: named worker pool, the process default
//! - **InlineStrategy**: runs tasks on the submitting thread
//!
//! Host-specific strategies live in the host and are installed with
//! `Dispatcher::set`.

pub mod inline;
pub mod pooled;

pub use self::inline::InlineStrategy;
pub use self::pooled::{POOL_MULTIPLIER, PoolConfig, PooledStrategy};
