//! In-memory admission service for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::admission::Admission;
use crate::domain::foundation::{AdmissionId, BedId};
use crate::domain::queue::QueueError;
use crate::ports::{AdmissionService, CreateAdmissionRequest};

/// In-memory [`AdmissionService`] enforcing the one-admission-per-bed
/// invariant, so bed races between sessions are reproducible in tests.
pub struct MockAdmissionService {
    occupied: Mutex<HashSet<BedId>>,
    created: Mutex<Vec<Admission>>,
    next_id: AtomicI64,
}

impl MockAdmissionService {
    pub fn new() -> Self {
        Self {
            occupied: Mutex::new(HashSet::new()),
            created: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Marks a bed as already taken, as if another session allocated it.
    pub fn occupy_bed(&self, bed_id: BedId) {
        self.occupied
            .lock()
            .expect("mock admission lock poisoned")
            .insert(bed_id);
    }

    /// All admissions created so far.
    pub fn created(&self) -> Vec<Admission> {
        self.created
            .lock()
            .expect("mock admission lock poisoned")
            .clone()
    }
}

impl Default for MockAdmissionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdmissionService for MockAdmissionService {
    async fn create(&self, req: CreateAdmissionRequest) -> Result<Admission, QueueError> {
        let mut occupied = self.occupied.lock().expect("mock admission lock poisoned");
        if !occupied.insert(req.bed_id) {
            return Err(QueueError::conflict(format!(
                "bed {} already taken",
                req.bed_id
            )));
        }

        let admission = Admission {
            id: AdmissionId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            patient_id: req.patient_id,
            queue_id: req.queue_id,
            bed_id: req.bed_id,
            status: req.status,
        };
        self.created
            .lock()
            .expect("mock admission lock poisoned")
            .push(admission.clone());
        Ok(admission)
    }
}
