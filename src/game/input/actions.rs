//! Control Events
//!
//! The discrete events a frontend can raise against a running scene.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Events consumed between fixed steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlEvent {
    /// Clear every body and regenerate from the configured seed
    Restart,
    /// Freeze or resume time; `advance` is a no-op while paused
    TogglePause,
}

impl fmt::Display for ControlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlEvent::Restart => f.write_str("restart"),
            ControlEvent::TogglePause => f.write_str("pause"),
        }
    }
}

/// Error for an event name that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown control event `{0}` (expected `restart` or `pause`)")]
pub struct UnknownEvent(pub String);

impl FromStr for ControlEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "restart" | "reset" => Ok(ControlEvent::Restart),
            "pause" | "toggle_pause" | "unpause" => Ok(ControlEvent::TogglePause),
            other => Err(UnknownEvent(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_names() {
        assert_eq!("restart".parse(), Ok(ControlEvent::Restart));
        assert_eq!(" Pause ".parse(), Ok(ControlEvent::TogglePause));
        assert_eq!("toggle_pause".parse(), Ok(ControlEvent::TogglePause));
        assert!("jump".parse::<ControlEvent>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for event in [ControlEvent::Restart, ControlEvent::TogglePause] {
            assert_eq!(event.to_string().parse(), Ok(event));
        }
    }
}
