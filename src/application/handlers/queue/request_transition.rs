//! RequestTransitionHandler - role-gated lifecycle transition requests.

use std::sync::Arc;

use crate::application::QueueCache;
use crate::domain::foundation::{QueueId, Role};
use crate::domain::queue::{authorize_request, QueueEntry, QueueError, QueueState};
use crate::ports::{QueueService, UpdateQueueRequest};

/// Command requesting a lifecycle transition for a queue entry.
#[derive(Debug, Clone)]
pub struct RequestTransitionCommand {
    pub queue_id: QueueId,
    pub target: QueueState,
    pub role: Role,
}

/// Handler validating and issuing lifecycle transitions.
///
/// Every guard is checked locally, against the cached snapshot, before the
/// remote update is issued; a rejected request never causes a partial
/// mutation.
pub struct RequestTransitionHandler {
    queue: Arc<dyn QueueService>,
    cache: Arc<QueueCache>,
}

impl RequestTransitionHandler {
    pub fn new(queue: Arc<dyn QueueService>, cache: Arc<QueueCache>) -> Self {
        Self { queue, cache }
    }

    pub async fn handle(&self, cmd: RequestTransitionCommand) -> Result<QueueEntry, QueueError> {
        let current = self
            .cache
            .get_by_id(cmd.queue_id)
            .ok_or(QueueError::EntryNotFound {
                queue_id: cmd.queue_id,
            })?;

        authorize_request(cmd.role, current.state(), cmd.target)?;

        // Admitting requires that no other blocking entry or active
        // admission exists for the patient.
        if cmd.target == QueueState::AdmittedUnconfirmed
            && self.queue.has_active_admission(current.patient_id).await?
        {
            return Err(QueueError::PatientAlreadyQueued {
                patient_id: current.patient_id,
            });
        }

        let updated = self
            .queue
            .update(cmd.queue_id, UpdateQueueRequest::transition(cmd.target))
            .await?;

        tracing::info!(
            queue_id = %cmd.queue_id,
            from = %current.state(),
            to = %cmd.target,
            role = %cmd.role,
            "queue transition applied"
        );
        self.cache.upsert(updated.clone());
        Ok(updated)
    }
}
