//! Errors - dispatcher errors and task outcomes
//!
//! The two are kept apart on purpose: `DispatchError` is returned synchronously
//! by the dispatcher and strategies, `TaskError` only ever travels through a
//! `Completion`.

use std::any::Any;
use std::io;

use thiserror::Error;

/// Errors raised while switching strategies or handing a task to one.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("task rejected by {strategy} strategy")]
    Rejected { strategy: &'static str },

    #[error("failed to start worker pool: {0}")]
    PoolStartup(#[from] io::Error),
}

/// Why a submitted task produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Rejected(String),

    /// The strategy discarded the task without running it.
    #[error("task dropped before completion")]
    Dropped,
}

impl TaskError {
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        TaskError::Panicked(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_payloads_are_rendered() {
        let err = TaskError::from_panic(Box::new("boom"));
        assert_eq!(err, TaskError::Panicked("boom".to_string()));

        let err = TaskError::from_panic(Box::new(format!("code {}", 7)));
        assert_eq!(err.to_string(), "task panicked: code 7");

        let err = TaskError::from_panic(Box::new(17_u32));
        assert!(matches!(err, TaskError::Panicked(msg) if msg.contains("non-string")));
    }

    #[test]
    fn test_rejection_names_the_strategy() {
        let err = DispatchError::Rejected { strategy: "pooled" };
        assert_eq!(err.to_string(), "task rejected by pooled strategy");
    }
}
