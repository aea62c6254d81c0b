//! AdmissionService port - the admission CRUD collaborator.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::admission::{Admission, AdmissionStatus};
use crate::domain::foundation::{BedId, PatientId, QueueId};
use crate::domain::queue::QueueError;

/// Request body for creating an admission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdmissionRequest {
    pub patient_id: PatientId,
    pub queue_id: QueueId,
    pub bed_id: BedId,
    pub status: AdmissionStatus,
}

impl CreateAdmissionRequest {
    /// An active admission binding a patient and queue entry to a bed.
    pub fn active(patient_id: PatientId, queue_id: QueueId, bed_id: BedId) -> Self {
        Self {
            patient_id,
            queue_id,
            bed_id,
            status: AdmissionStatus::Active,
        }
    }
}

/// Port for the admission collaborator.
///
/// The server enforces the one-active-admission-per-bed invariant
/// atomically; a rejection here is an expected race outcome, surfaced as
/// [`QueueError::Conflict`].
#[async_trait]
pub trait AdmissionService: Send + Sync {
    /// Creates an admission resource.
    async fn create(&self, req: CreateAdmissionRequest) -> Result<Admission, QueueError>;
}
