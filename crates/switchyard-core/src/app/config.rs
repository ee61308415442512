//! Config - startup toggle between pooled and inline dispatch
//!
//! Hosts read this once during initialization and apply it; nothing here is
//! consulted again afterwards.

use std::env;

use serde::{Deserialize, Serialize};

use crate::app::Dispatcher;
use crate::domain::DispatchMode;

/// Environment variable holding the startup mode.
pub const MODE_ENV_VAR: &str = "SWITCHYARD_DISPATCH_MODE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub mode: DispatchMode,
}

impl DispatchConfig {
    pub fn new(mode: DispatchMode) -> Self {
        Self { mode }
    }

    /// Read `SWITCHYARD_DISPATCH_MODE`. Unset or unparsable values fall back to
    /// pooled dispatch.
    pub fn from_env() -> Self {
        Self::from_value(env::var(MODE_ENV_VAR).ok().as_deref())
    }

    fn from_value(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match raw.parse() {
            Ok(mode) => Self { mode },
            Err(err) => {
                tracing::warn!(value = raw, error = %err, "ignoring {MODE_ENV_VAR}, using pooled dispatch");
                Self::default()
            }
        }
    }

    /// Install the configured mode on the dispatcher.
    pub fn apply(&self) {
        match self.mode {
            DispatchMode::Pooled => Dispatcher::use_default(),
            DispatchMode::Inline => Dispatcher::use_inline(),
        }
        tracing::info!(mode = ?self.mode, "dispatch mode applied");
    }
}
