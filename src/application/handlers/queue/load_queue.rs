//! LoadQueueHandler - hydrates the read-model cache from the server.

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::QueueCache;
use crate::domain::foundation::QueueId;
use crate::domain::queue::{QueueEntry, QueueError};
use crate::ports::QueueService;

/// Handler fetching the full queue and reconciling the cache with it.
///
/// Run at session start and whenever the operator forces a refresh. The
/// fetched snapshots land through the cache's merge rule, so a refresh
/// racing a push event can never regress a newer entry; cached entries
/// absent from the response were deleted server-side and are dropped.
pub struct LoadQueueHandler {
    queue: Arc<dyn QueueService>,
    cache: Arc<QueueCache>,
}

impl LoadQueueHandler {
    pub fn new(queue: Arc<dyn QueueService>, cache: Arc<QueueCache>) -> Self {
        Self { queue, cache }
    }

    pub async fn handle(&self) -> Result<Vec<QueueEntry>, QueueError> {
        let entries = self.queue.list().await?;

        let listed: HashSet<QueueId> = entries.iter().map(|e| e.id).collect();
        for cached in self.cache.get() {
            if !listed.contains(&cached.id) {
                self.cache.remove(cached.id);
            }
        }
        for entry in &entries {
            self.cache.upsert(entry.clone());
        }

        tracing::info!(count = entries.len(), "queue cache refreshed");
        Ok(self.cache.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockQueueService;
    use crate::domain::foundation::{PatientId, Timestamp, TriageId};
    use crate::domain::queue::{Priority, QueueStatus};

    fn entry(id: i64) -> QueueEntry {
        let mut e = QueueEntry::new(
            QueueId::new(id),
            PatientId::new(100 + id),
            format!("patient-{id}"),
            TriageId::new(200 + id),
            2,
            Priority::Normal,
        )
        .unwrap();
        e.created_at = Timestamp::from_unix_secs(1_000 + id as u64);
        e
    }

    fn setup() -> (Arc<MockQueueService>, Arc<QueueCache>, LoadQueueHandler) {
        let queue = Arc::new(MockQueueService::new());
        let cache = Arc::new(QueueCache::new());
        let handler = LoadQueueHandler::new(Arc::clone(&queue) as _, Arc::clone(&cache));
        (queue, cache, handler)
    }

    #[tokio::test]
    async fn hydrates_an_empty_cache_from_the_server() {
        let (queue, cache, handler) = setup();
        queue.seed(entry(7));
        queue.seed(entry(8));

        let entries = handler.handle().await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(cache.len(), 2);
        assert!(cache.get_by_id(QueueId::new(7)).is_some());
    }

    #[tokio::test]
    async fn drops_cached_entries_deleted_server_side() {
        let (queue, cache, handler) = setup();
        queue.seed(entry(7));
        cache.upsert(entry(7));
        cache.upsert(entry(9));

        handler.handle().await.unwrap();

        assert_eq!(cache.len(), 1);
        assert!(cache.get_by_id(QueueId::new(9)).is_none());
    }

    #[tokio::test]
    async fn refresh_never_regresses_a_newer_cached_entry() {
        let (queue, cache, handler) = setup();
        queue.seed(entry(7));

        // A push event already delivered a newer snapshot.
        let mut newer = entry(7);
        newer.status = QueueStatus::Admitted;
        newer.updated_at = Some(Timestamp::from_unix_secs(5_000));
        cache.upsert(newer);

        handler.handle().await.unwrap();

        assert_eq!(
            cache.get_by_id(QueueId::new(7)).unwrap().status,
            QueueStatus::Admitted
        );
    }

    #[tokio::test]
    async fn remote_failure_leaves_the_cache_untouched() {
        let (queue, cache, handler) = setup();
        cache.upsert(entry(9));
        queue.fail_next_list("queue service down");

        let err = handler.handle().await.unwrap_err();

        assert!(matches!(err, QueueError::Remote { .. }));
        assert_eq!(cache.len(), 1);
    }
}
