//! Queue read-model cache.
//!
//! The single read path for every view of the queue. The REST mutation
//! handlers patch it optimistically and the push channel applies server
//! events to it; both converge on the same idempotent upsert keyed by
//! entry id, so the two paths can arrive in either order.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::QueueId;
use crate::domain::queue::QueueEntry;

/// In-memory keyed store of queue-entry snapshots.
///
/// All operations are synchronous and total: no entry id ever produces an
/// error, and removing an absent entry is a no-op.
#[derive(Debug, Default)]
pub struct QueueCache {
    entries: RwLock<HashMap<QueueId, QueueEntry>>,
}

impl QueueCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all cached entries, ordered by creation time then id for a
    /// stable view order.
    pub fn get(&self) -> Vec<QueueEntry> {
        let entries = self.entries.read().expect("queue cache lock poisoned");
        let mut all: Vec<QueueEntry> = entries.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        all
    }

    /// Returns a single entry by id.
    pub fn get_by_id(&self, id: QueueId) -> Option<QueueEntry> {
        self.entries
            .read()
            .expect("queue cache lock poisoned")
            .get(&id)
            .cloned()
    }

    /// Replaces-or-inserts an entry by id.
    ///
    /// Merging follows [`QueueEntry::merge_from`]: a snapshot whose
    /// `updated_at` is strictly older than the cached one is discarded,
    /// which makes optimistic local updates and push events
    /// order-independent.
    pub fn upsert(&self, entry: QueueEntry) {
        let mut entries = self.entries.write().expect("queue cache lock poisoned");
        match entries.get_mut(&entry.id) {
            Some(existing) => {
                existing.merge_from(entry);
            }
            None => {
                entries.insert(entry.id, entry);
            }
        }
    }

    /// Removes an entry by id. Absent ids are a no-op.
    pub fn remove(&self, id: QueueId) {
        self.entries
            .write()
            .expect("queue cache lock poisoned")
            .remove(&id);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().expect("queue cache lock poisoned").len()
    }

    /// Returns true when no entries are cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached entry (session teardown).
    pub fn clear(&self) {
        self.entries
            .write()
            .expect("queue cache lock poisoned")
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PatientId, Timestamp, TriageId};
    use crate::domain::queue::{Priority, QueueStatus};

    fn entry(id: i64, created_secs: u64) -> QueueEntry {
        let mut e = QueueEntry::new(
            QueueId::new(id),
            PatientId::new(100 + id),
            format!("patient-{id}"),
            TriageId::new(200 + id),
            2,
            Priority::Normal,
        )
        .unwrap();
        e.created_at = Timestamp::from_unix_secs(created_secs);
        e
    }

    #[test]
    fn upsert_inserts_then_replaces_by_id() {
        let cache = QueueCache::new();
        cache.upsert(entry(7, 100));
        assert_eq!(cache.len(), 1);

        let mut updated = entry(7, 100);
        updated.status = QueueStatus::Admitted;
        cache.upsert(updated);

        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get_by_id(QueueId::new(7)).unwrap().status,
            QueueStatus::Admitted
        );
    }

    #[test]
    fn upsert_is_idempotent() {
        let cache = QueueCache::new();
        let e = entry(7, 100);

        cache.upsert(e.clone());
        let once = cache.get();
        cache.upsert(e);
        let twice = cache.get();

        assert_eq!(once, twice);
    }

    #[test]
    fn stale_snapshot_does_not_resurrect_older_status() {
        let cache = QueueCache::new();

        let mut local = entry(7, 100);
        local.status = QueueStatus::Outpatient;
        local.updated_at = Some(Timestamp::from_unix_secs(2_000));
        cache.upsert(local);

        let mut stale = entry(7, 100);
        stale.status = QueueStatus::Waiting;
        stale.updated_at = Some(Timestamp::from_unix_secs(1_000));
        cache.upsert(stale);

        assert_eq!(
            cache.get_by_id(QueueId::new(7)).unwrap().status,
            QueueStatus::Outpatient
        );
    }

    #[test]
    fn order_independent_for_timestamped_updates() {
        let mut a = entry(7, 100);
        a.status = QueueStatus::Admitted;
        a.updated_at = Some(Timestamp::from_unix_secs(1_000));

        let mut b = entry(7, 100);
        b.status = QueueStatus::Outpatient;
        b.updated_at = Some(Timestamp::from_unix_secs(2_000));

        let forward = QueueCache::new();
        forward.upsert(a.clone());
        forward.upsert(b.clone());

        let reverse = QueueCache::new();
        reverse.upsert(b);
        reverse.upsert(a);

        assert_eq!(forward.get(), reverse.get());
        assert_eq!(
            forward.get_by_id(QueueId::new(7)).unwrap().status,
            QueueStatus::Outpatient
        );
    }

    #[test]
    fn remove_is_total() {
        let cache = QueueCache::new();
        cache.remove(QueueId::new(99)); // absent: no-op

        cache.upsert(entry(7, 100));
        cache.remove(QueueId::new(7));
        assert!(cache.is_empty());
        assert_eq!(cache.get_by_id(QueueId::new(7)), None);
    }

    #[test]
    fn get_orders_by_creation_time_then_id() {
        let cache = QueueCache::new();
        cache.upsert(entry(3, 300));
        cache.upsert(entry(1, 100));
        cache.upsert(entry(5, 100));

        let ids: Vec<i64> = cache.get().iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, vec![1, 5, 3]);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = QueueCache::new();
        cache.upsert(entry(1, 100));
        cache.upsert(entry(2, 200));
        cache.clear();
        assert!(cache.is_empty());
    }
}
