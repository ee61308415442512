//! App - process-wide wiring
//!
//! # Components
//! - **Dispatcher**: holds the active execution strategy
//! - **DispatchConfig**: host toggle applied once at startup

pub mod config;
pub mod dispatcher;

pub use self::config::{DispatchConfig, MODE_ENV_VAR};
pub use self::dispatcher::Dispatcher;
