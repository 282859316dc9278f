//! Cluster State
//!
//! Lifecycle state of a cluster. The server may send states this crate does
//! not know about yet; those are kept as written so they survive a round
//! trip.

use serde::{Serialize, Serializer};
use std::fmt;

/// Overall state of a cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ClusterState {
    Error,
    Hibernating,
    Installing,
    Pending,
    PoweringDown,
    Ready,
    Resuming,
    Uninstalling,
    Validating,
    Waiting,
    #[default]
    Unknown,
    /// A state not known to this crate, kept verbatim
    Other(String),
}

impl ClusterState {
    /// Wire representation of the state
    pub fn as_str(&self) -> &str {
        match self {
            ClusterState::Error => "error",
            ClusterState::Hibernating => "hibernating",
            ClusterState::Installing => "installing",
            ClusterState::Pending => "pending",
            ClusterState::PoweringDown => "powering_down",
            ClusterState::Ready => "ready",
            ClusterState::Resuming => "resuming",
            ClusterState::Uninstalling => "uninstalling",
            ClusterState::Validating => "validating",
            ClusterState::Waiting => "waiting",
            ClusterState::Unknown => "unknown",
            ClusterState::Other(text) => text,
        }
    }

    /// Map an `Other` holding a known wire name to its variant, so every
    /// state has a single representation.
    pub fn canonical(self) -> Self {
        match self {
            ClusterState::Other(text) => ClusterState::from(text.as_str()),
            known => known,
        }
    }
}

impl From<&str> for ClusterState {
    fn from(text: &str) -> Self {
        match text {
            "error" => ClusterState::Error,
            "hibernating" => ClusterState::Hibernating,
            "installing" => ClusterState::Installing,
            "pending" => ClusterState::Pending,
            "powering_down" => ClusterState::PoweringDown,
            "ready" => ClusterState::Ready,
            "resuming" => ClusterState::Resuming,
            "uninstalling" => ClusterState::Uninstalling,
            "validating" => ClusterState::Validating,
            "waiting" => ClusterState::Waiting,
            "unknown" => ClusterState::Unknown,
            other => ClusterState::Other(other.to_string()),
        }
    }
}

impl From<String> for ClusterState {
    fn from(text: String) -> Self {
        ClusterState::from(text.as_str())
    }
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ClusterState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_states() {
        assert_eq!(ClusterState::from("powering_down"), ClusterState::PoweringDown);
        assert_eq!(ClusterState::Ready.to_string(), "ready");
    }

    #[test]
    fn test_other_with_known_name_is_canonical() {
        let state = ClusterState::Other("ready".to_string()).canonical();
        assert_eq!(state, ClusterState::Ready);
        let state = ClusterState::Other("migrating".to_string()).canonical();
        assert_eq!(state, ClusterState::Other("migrating".to_string()));
    }

    #[test]
    fn test_unknown_state_is_preserved() {
        let state = ClusterState::from("migrating");
        assert_eq!(state, ClusterState::Other("migrating".to_string()));
        assert_eq!(serde_json::to_string(&state).unwrap(), r#""migrating""#);
    }
}
