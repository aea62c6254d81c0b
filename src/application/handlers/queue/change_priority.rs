//! ChangePriorityHandler - doctor edits of an entry's priority.

use std::sync::Arc;

use crate::application::QueueCache;
use crate::domain::foundation::{QueueId, Role};
use crate::domain::queue::{Priority, QueueEntry, QueueError, QueueState};
use crate::ports::{QueueService, UpdateQueueRequest};

/// Command to change the priority of a queue entry.
#[derive(Debug, Clone)]
pub struct ChangePriorityCommand {
    pub queue_id: QueueId,
    pub priority: Priority,
    pub role: Role,
}

/// Handler for doctor priority edits.
///
/// Priority edits do not move the lifecycle, but they are still a doctor
/// action and only make sense while the entry is in a blocking state.
pub struct ChangePriorityHandler {
    queue: Arc<dyn QueueService>,
    cache: Arc<QueueCache>,
}

impl ChangePriorityHandler {
    pub fn new(queue: Arc<dyn QueueService>, cache: Arc<QueueCache>) -> Self {
        Self { queue, cache }
    }

    pub async fn handle(&self, cmd: ChangePriorityCommand) -> Result<QueueEntry, QueueError> {
        let current = self
            .cache
            .get_by_id(cmd.queue_id)
            .ok_or(QueueError::EntryNotFound {
                queue_id: cmd.queue_id,
            })?;

        let state = current.state();
        if !cmd.role.is_doctor() {
            return Err(QueueError::Forbidden {
                role: cmd.role,
                from: state,
                to: state,
            });
        }
        if !state.is_blocking() {
            return Err(QueueError::InvalidTransition {
                from: state,
                to: state,
            });
        }

        let updated = self
            .queue
            .update(cmd.queue_id, UpdateQueueRequest::priority(cmd.priority))
            .await?;

        self.cache.upsert(updated.clone());
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockQueueService;
    use crate::domain::foundation::{PatientId, TriageId};
    use crate::domain::queue::QueueStatus;

    fn entry(id: i64, status: QueueStatus) -> QueueEntry {
        let mut e = QueueEntry::new(
            QueueId::new(id),
            PatientId::new(100 + id),
            "Amina Diallo",
            TriageId::new(11),
            3,
            Priority::Normal,
        )
        .unwrap();
        e.status = status;
        e
    }

    fn setup(e: QueueEntry) -> (Arc<MockQueueService>, Arc<QueueCache>, ChangePriorityHandler) {
        let queue = Arc::new(MockQueueService::new());
        queue.seed(e.clone());
        let cache = Arc::new(QueueCache::new());
        cache.upsert(e);
        let handler = ChangePriorityHandler::new(Arc::clone(&queue) as _, Arc::clone(&cache));
        (queue, cache, handler)
    }

    #[tokio::test]
    async fn doctor_escalates_priority() {
        let (_, cache, handler) = setup(entry(7, QueueStatus::Waiting));

        let updated = handler
            .handle(ChangePriorityCommand {
                queue_id: QueueId::new(7),
                priority: Priority::Critical,
                role: Role::Doctor,
            })
            .await
            .unwrap();

        assert_eq!(updated.priority, Priority::Critical);
        assert_eq!(
            cache.get_by_id(QueueId::new(7)).unwrap().priority,
            Priority::Critical
        );
    }

    #[tokio::test]
    async fn nurse_may_not_edit_priority() {
        let (queue, _, handler) = setup(entry(7, QueueStatus::Waiting));

        let err = handler
            .handle(ChangePriorityCommand {
                queue_id: QueueId::new(7),
                priority: Priority::Critical,
                role: Role::Nurse,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, QueueError::Forbidden { .. }));
        assert_eq!(queue.update_calls(), 0);
    }

    #[tokio::test]
    async fn priority_of_a_terminal_entry_is_immutable() {
        let (queue, _, handler) = setup(entry(7, QueueStatus::Cancelled));

        let err = handler
            .handle(ChangePriorityCommand {
                queue_id: QueueId::new(7),
                priority: Priority::Critical,
                role: Role::Doctor,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, QueueError::InvalidTransition { .. }));
        assert_eq!(queue.update_calls(), 0);
    }
}
