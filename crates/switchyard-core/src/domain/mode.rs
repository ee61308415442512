//! Mode - classifying the active strategy and choosing one at startup

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DispatchError;

/// Which of the well-known strategies is active.
///
/// Decided by identity: a custom strategy that happens to run tasks on the
/// caller's thread is still `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Pooled,
    Inline,
    Custom,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrategyKind::Pooled => "pooled",
            StrategyKind::Inline => "inline",
            StrategyKind::Custom => "custom",
        };
        f.write_str(s)
    }
}

/// Execution mode a host selects at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    #[default]
    Pooled,
    Inline,
}

impl FromStr for DispatchMode {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pooled" | "default" => Ok(DispatchMode::Pooled),
            "inline" | "direct" => Ok(DispatchMode::Inline),
            _ => Err(DispatchError::InvalidArgument(
                "dispatch mode must be one of: pooled, default, inline, direct",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::pooled("pooled", DispatchMode::Pooled)]
    #[case::default_alias("default", DispatchMode::Pooled)]
    #[case::inline("inline", DispatchMode::Inline)]
    #[case::direct_alias("direct", DispatchMode::Inline)]
    #[case::mixed_case(" Inline ", DispatchMode::Inline)]
    fn test_parses_modes(#[case] raw: &str, #[case] expected: DispatchMode) {
        assert_eq!(raw.parse::<DispatchMode>().unwrap(), expected);
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let err = "threaded".parse::<DispatchMode>().unwrap_err();
        assert!(matches!(err, DispatchError::InvalidArgument(_)));
    }

    #[test]
    fn test_kinds_serialize_lowercase() {
        let json = serde_json::to_string(&StrategyKind::Inline).unwrap();
        assert_eq!(json, "\"inline\"");
        assert_eq!(StrategyKind::Custom.to_string(), "custom");
    }
}
