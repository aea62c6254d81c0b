//! QueueStatus enum for the coarse lifecycle status stored on the wire.
//!
//! The wire contract carries `status` plus a separate `admitted` flag; the
//! derived five-state machine over both fields lives in
//! [`QueueState`](super::QueueState).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse lifecycle status of a queue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueStatus {
    #[default]
    Waiting,
    Admitted,
    Outpatient,
    Cancelled,
}

impl QueueStatus {
    /// Returns true for the terminal statuses.
    pub fn is_terminal(&self) -> bool {
        matches!(self, QueueStatus::Outpatient | QueueStatus::Cancelled)
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueueStatus::Waiting => "WAITING",
            QueueStatus::Admitted => "ADMITTED",
            QueueStatus::Outpatient => "OUTPATIENT",
            QueueStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}
