//! SubmitAdmitHandler - the two-step admission saga.
//!
//! Step 1 creates the admission resource; step 2 updates the queue entry
//! to its confirmed state. The steps run in fixed order with distinct
//! failure handling: a step-1 failure (typically a bed race lost to
//! another session) leaves the queue untouched, while a step-2 failure
//! records a pending-confirmation marker so only the confirmation is ever
//! retried. Re-running step 1 could create a duplicate admission.

use std::sync::{Arc, Mutex};

use crate::application::QueueCache;
use crate::domain::admission::{Admission, BedSelection};
use crate::domain::foundation::{AdmissionId, QueueId};
use crate::domain::queue::{QueueEntry, QueueError, QueueState};
use crate::ports::{AdmissionService, CreateAdmissionRequest, QueueService, UpdateQueueRequest};

/// Command to confirm an unconfirmed admission against a concrete bed.
#[derive(Debug, Clone)]
pub struct SubmitAdmitCommand {
    pub queue_id: QueueId,
    pub selection: BedSelection,
}

/// Marker recorded between a successful step 1 and a failed step 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingConfirmation {
    admission_id: AdmissionId,
    queue_id: QueueId,
}

/// Handler executing the admission allocation protocol.
pub struct SubmitAdmitHandler {
    admissions: Arc<dyn AdmissionService>,
    queue: Arc<dyn QueueService>,
    cache: Arc<QueueCache>,
    pending: Mutex<Option<PendingConfirmation>>,
}

impl SubmitAdmitHandler {
    pub fn new(
        admissions: Arc<dyn AdmissionService>,
        queue: Arc<dyn QueueService>,
        cache: Arc<QueueCache>,
    ) -> Self {
        Self {
            admissions,
            queue,
            cache,
            pending: Mutex::new(None),
        }
    }

    /// Runs the composite allocation.
    ///
    /// Validation failures and step-1 rejections surface before any cache
    /// mutation; the entry stays admitted-unconfirmed and the operator
    /// reselects a bed. A step-2 failure surfaces as
    /// [`QueueError::UnconfirmedAdmission`], retryable through [`resume`].
    ///
    /// [`resume`]: SubmitAdmitHandler::resume
    pub async fn handle(&self, cmd: SubmitAdmitCommand) -> Result<QueueEntry, QueueError> {
        let (_, _, bed_id) = cmd.selection.validate()?;

        let entry = self
            .cache
            .get_by_id(cmd.queue_id)
            .ok_or(QueueError::EntryNotFound {
                queue_id: cmd.queue_id,
            })?;

        if entry.state() != QueueState::AdmittedUnconfirmed {
            return Err(QueueError::InvalidTransition {
                from: entry.state(),
                to: QueueState::AdmittedConfirmed,
            });
        }

        // Step 1: bind the bed. The server enforces the one-admission-per-
        // bed invariant atomically; losing the race is an expected outcome.
        let admission = self
            .admissions
            .create(CreateAdmissionRequest::active(
                entry.patient_id,
                cmd.queue_id,
                bed_id,
            ))
            .await?;

        tracing::info!(
            queue_id = %cmd.queue_id,
            admission_id = %admission.id,
            bed_id = %bed_id,
            "admission created, confirming queue entry"
        );

        self.confirm(admission).await
    }

    /// Retries a failed confirmation (step 2 only).
    ///
    /// Returns [`QueueError::NothingToResume`] when no confirmation is
    /// pending.
    pub async fn resume(&self) -> Result<QueueEntry, QueueError> {
        let pending = self
            .pending
            .lock()
            .expect("pending confirmation lock poisoned")
            .ok_or(QueueError::NothingToResume)?;

        tracing::info!(
            queue_id = %pending.queue_id,
            admission_id = %pending.admission_id,
            "resuming admission confirmation"
        );

        let updated = self
            .queue
            .update(
                pending.queue_id,
                UpdateQueueRequest::transition(QueueState::AdmittedConfirmed),
            )
            .await
            .map_err(|err| QueueError::UnconfirmedAdmission {
                admission_id: pending.admission_id,
                queue_id: pending.queue_id,
                reason: err.to_string(),
            })?;

        *self
            .pending
            .lock()
            .expect("pending confirmation lock poisoned") = None;
        self.cache.upsert(updated.clone());
        Ok(updated)
    }

    /// Returns true when an admission exists whose queue confirmation is
    /// still outstanding.
    pub fn has_pending_confirmation(&self) -> bool {
        self.pending
            .lock()
            .expect("pending confirmation lock poisoned")
            .is_some()
    }

    /// Step 2: mark the queue entry confirmed.
    async fn confirm(&self, admission: Admission) -> Result<QueueEntry, QueueError> {
        let marker = PendingConfirmation {
            admission_id: admission.id,
            queue_id: admission.queue_id,
        };
        *self
            .pending
            .lock()
            .expect("pending confirmation lock poisoned") = Some(marker);

        self.resume().await
    }
}
