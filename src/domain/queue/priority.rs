//! Priority classification for queue entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Treatment priority assigned by triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Critical,
    NonCritical,
    #[default]
    Normal,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Critical => "CRITICAL",
            Priority::NonCritical => "NON_CRITICAL",
            Priority::Normal => "NORMAL",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_wire_format() {
        assert_eq!(
            serde_json::to_string(&Priority::NonCritical).unwrap(),
            "\"NON_CRITICAL\""
        );
        assert_eq!(
            serde_json::to_string(&Priority::Critical).unwrap(),
            "\"CRITICAL\""
        );
    }

    #[test]
    fn deserializes_from_wire_format() {
        let p: Priority = serde_json::from_str("\"NORMAL\"").unwrap();
        assert_eq!(p, Priority::Normal);
    }

    #[test]
    fn default_is_normal() {
        assert_eq!(Priority::default(), Priority::Normal);
    }
}
