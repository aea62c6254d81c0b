//! RegisterPatientHandler - nurse inserts a patient into the waiting queue.

use std::sync::Arc;

use crate::application::QueueCache;
use crate::domain::foundation::{PatientId, TriageId};
use crate::domain::queue::{Priority, QueueEntry, QueueError};
use crate::ports::{CreateQueueRequest, QueueService};

/// Command to register a patient into the waiting queue.
#[derive(Debug, Clone)]
pub struct RegisterPatientCommand {
    pub patient_id: PatientId,
    pub patient_name: String,
    pub triage_id: TriageId,
    pub triage_level: u8,
    pub priority: Priority,
}

/// Handler for nurse registration into the queue.
pub struct RegisterPatientHandler {
    queue: Arc<dyn QueueService>,
    cache: Arc<QueueCache>,
}

impl RegisterPatientHandler {
    pub fn new(queue: Arc<dyn QueueService>, cache: Arc<QueueCache>) -> Self {
        Self { queue, cache }
    }

    /// Registers the patient, pre-checking the one-blocking-entry-per-patient
    /// invariant before the remote create. The server stays authoritative;
    /// its rejection surfaces as a conflict.
    pub async fn handle(&self, cmd: RegisterPatientCommand) -> Result<QueueEntry, QueueError> {
        if cmd.triage_level > crate::domain::queue::MAX_TRIAGE_LEVEL {
            return Err(QueueError::InvalidTriageLevel {
                actual: cmd.triage_level,
            });
        }

        if self.queue.has_active_admission(cmd.patient_id).await? {
            return Err(QueueError::PatientAlreadyQueued {
                patient_id: cmd.patient_id,
            });
        }

        let entry = self
            .queue
            .create(CreateQueueRequest {
                patient_id: cmd.patient_id,
                patient_name: cmd.patient_name,
                triage_id: cmd.triage_id,
                triage_level: cmd.triage_level,
                priority: cmd.priority,
            })
            .await?;

        tracing::info!(queue_id = %entry.id, patient_id = %entry.patient_id, "patient registered");
        self.cache.upsert(entry.clone());
        Ok(entry)
    }
}
