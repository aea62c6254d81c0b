//! In-memory queue service for testing.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{PatientId, QueueId, Timestamp};
use crate::domain::queue::{QueueEntry, QueueError, QueueStatus};
use crate::ports::{CreateQueueRequest, QueueService, UpdateQueueRequest};

/// In-memory [`QueueService`] with failure injection.
///
/// Entries live in a locked map; `updated_at` is stamped on every update,
/// matching the server contract the cache's merge rule depends on.
pub struct MockQueueService {
    entries: Mutex<HashMap<QueueId, QueueEntry>>,
    active_admissions: Mutex<HashSet<PatientId>>,
    next_id: AtomicI64,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    fail_create: Mutex<Option<String>>,
    fail_update: Mutex<Option<String>>,
    fail_list: Mutex<Option<String>>,
}

impl MockQueueService {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            active_admissions: Mutex::new(HashSet::new()),
            next_id: AtomicI64::new(1),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            fail_create: Mutex::new(None),
            fail_update: Mutex::new(None),
            fail_list: Mutex::new(None),
        }
    }

    /// Seeds an existing entry.
    pub fn seed(&self, entry: QueueEntry) {
        self.entries
            .lock()
            .expect("mock queue lock poisoned")
            .insert(entry.id, entry);
    }

    /// Marks whether a patient has an active admission.
    pub fn set_active_admission(&self, patient_id: PatientId, active: bool) {
        let mut set = self
            .active_admissions
            .lock()
            .expect("mock queue lock poisoned");
        if active {
            set.insert(patient_id);
        } else {
            set.remove(&patient_id);
        }
    }

    /// Fails the next `create` call with a remote error.
    pub fn fail_next_create(&self, message: impl Into<String>) {
        *self.fail_create.lock().expect("mock queue lock poisoned") = Some(message.into());
    }

    /// Fails the next `update` call with a remote error.
    pub fn fail_next_update(&self, message: impl Into<String>) {
        *self.fail_update.lock().expect("mock queue lock poisoned") = Some(message.into());
    }

    /// Fails the next `list` call with a remote error.
    pub fn fail_next_list(&self, message: impl Into<String>) {
        *self.fail_list.lock().expect("mock queue lock poisoned") = Some(message.into());
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockQueueService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueueService for MockQueueService {
    async fn list(&self) -> Result<Vec<QueueEntry>, QueueError> {
        if let Some(message) = self
            .fail_list
            .lock()
            .expect("mock queue lock poisoned")
            .take()
        {
            return Err(QueueError::remote(message));
        }

        let entries = self.entries.lock().expect("mock queue lock poisoned");
        let mut all: Vec<QueueEntry> = entries.values().cloned().collect();
        all.sort_by_key(|e| e.id);
        Ok(all)
    }

    async fn get(&self, id: QueueId) -> Result<QueueEntry, QueueError> {
        self.entries
            .lock()
            .expect("mock queue lock poisoned")
            .get(&id)
            .cloned()
            .ok_or(QueueError::EntryNotFound { queue_id: id })
    }

    async fn create(&self, req: CreateQueueRequest) -> Result<QueueEntry, QueueError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self
            .fail_create
            .lock()
            .expect("mock queue lock poisoned")
            .take()
        {
            return Err(QueueError::remote(message));
        }

        let mut entries = self.entries.lock().expect("mock queue lock poisoned");
        // Server-side blocking-entry invariant.
        if entries
            .values()
            .any(|e| e.patient_id == req.patient_id && e.is_blocking())
        {
            return Err(QueueError::conflict(format!(
                "patient {} already queued",
                req.patient_id
            )));
        }

        let entry = QueueEntry {
            id: QueueId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            patient_id: req.patient_id,
            patient_name: req.patient_name,
            triage_id: req.triage_id,
            triage_level: req.triage_level,
            priority: req.priority,
            status: QueueStatus::Waiting,
            admitted: false,
            created_at: Timestamp::now(),
            updated_at: None,
        };
        entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update(&self, id: QueueId, req: UpdateQueueRequest) -> Result<QueueEntry, QueueError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self
            .fail_update
            .lock()
            .expect("mock queue lock poisoned")
            .take()
        {
            return Err(QueueError::remote(message));
        }

        let mut entries = self.entries.lock().expect("mock queue lock poisoned");
        let entry = entries
            .get_mut(&id)
            .ok_or(QueueError::EntryNotFound { queue_id: id })?;

        if let Some(status) = req.status {
            entry.status = status;
        }
        if let Some(admitted) = req.admitted {
            entry.admitted = admitted;
        }
        if let Some(priority) = req.priority {
            entry.priority = priority;
        }
        entry.updated_at = Some(Timestamp::now());
        Ok(entry.clone())
    }

    async fn delete(&self, id: QueueId) -> Result<(), QueueError> {
        self.entries
            .lock()
            .expect("mock queue lock poisoned")
            .remove(&id);
        Ok(())
    }

    async fn has_active_admission(&self, patient_id: PatientId) -> Result<bool, QueueError> {
        Ok(self
            .active_admissions
            .lock()
            .expect("mock queue lock poisoned")
            .contains(&patient_id))
    }
}
