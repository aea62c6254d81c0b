//! QueueService port - the queue CRUD collaborator.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{PatientId, QueueId, TriageId};
use crate::domain::queue::{Priority, QueueEntry, QueueError, QueueState, QueueStatus};

/// Request body for creating a queue entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQueueRequest {
    pub patient_id: PatientId,
    pub patient_name: String,
    pub triage_id: TriageId,
    pub triage_level: u8,
    pub priority: Priority,
}

/// Request body for a partial queue entry update.
///
/// Only the set fields are sent; the server merges them over the stored
/// entry and returns the full updated snapshot.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQueueRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QueueStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admitted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl UpdateQueueRequest {
    /// An update that moves the entry to the given lifecycle state.
    pub fn transition(target: QueueState) -> Self {
        let (status, admitted) = target.into_parts();
        Self {
            status: Some(status),
            admitted: Some(admitted),
            priority: None,
        }
    }

    /// An update that only changes the priority.
    pub fn priority(priority: Priority) -> Self {
        Self {
            status: None,
            admitted: None,
            priority: Some(priority),
        }
    }
}

/// Port for the queue CRUD collaborator.
#[async_trait]
pub trait QueueService: Send + Sync {
    /// Lists all queue entries.
    async fn list(&self) -> Result<Vec<QueueEntry>, QueueError>;

    /// Fetches a single entry by id.
    async fn get(&self, id: QueueId) -> Result<QueueEntry, QueueError>;

    /// Creates a new waiting entry.
    async fn create(&self, req: CreateQueueRequest) -> Result<QueueEntry, QueueError>;

    /// Applies a partial update and returns the full updated entry.
    async fn update(&self, id: QueueId, req: UpdateQueueRequest) -> Result<QueueEntry, QueueError>;

    /// Deletes an entry. Admin-only override in this deployment.
    async fn delete(&self, id: QueueId) -> Result<(), QueueError>;

    /// Best-effort pre-check: does the patient already have a blocking
    /// entry or active admission? The server remains authoritative.
    async fn has_active_admission(&self, patient_id: PatientId) -> Result<bool, QueueError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_request_carries_both_wire_fields() {
        let req = UpdateQueueRequest::transition(QueueState::AdmittedConfirmed);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["status"], "ADMITTED");
        assert_eq!(json["admitted"], true);
        assert!(json.get("priority").is_none());
    }

    #[test]
    fn priority_request_omits_status_fields() {
        let req = UpdateQueueRequest::priority(Priority::Critical);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["priority"], "CRITICAL");
        assert!(json.get("status").is_none());
        assert!(json.get("admitted").is_none());
    }

    // Compile-time check that the trait is object-safe.
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn QueueService) {}
}
