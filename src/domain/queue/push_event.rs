//! PushEvent - server-originated queue change notifications.
//!
//! Frames arrive as untyped text over the push channel and are validated
//! here, at the parse boundary. Anything that does not decode into a known
//! event shape is a recognized "ignored" outcome, never an error that
//! could take the session down.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::QueueId;

use super::QueueEntry;

/// A queue change pushed by the server.
///
/// Events are not ordered relative to REST responses; consumers must apply
/// them as idempotent upserts/removes keyed by entry id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PushEvent {
    #[serde(rename = "QUEUE_CREATED")]
    Created { payload: Option<QueueEntry> },

    #[serde(rename = "QUEUE_UPDATED")]
    Updated { payload: Option<QueueEntry> },

    #[serde(rename = "QUEUE_DELETED")]
    Deleted {
        #[serde(rename = "queueId")]
        queue_id: QueueId,
    },
}

impl PushEvent {
    /// Parses a raw frame into an event.
    ///
    /// Returns `None` for malformed JSON, unknown tags, or payloads that do
    /// not match the tagged shape; callers drop those frames silently.
    pub fn parse(text: &str) -> Option<PushEvent> {
        serde_json::from_str(text).ok()
    }
}
