//! Error types for queue coordination.
//!
//! The taxonomy separates local validation failures (correct and resubmit),
//! conflicts raised by a concurrent session (retryable), remote call
//! failures, and the partial-composite case where an admission exists but
//! the queue entry is not yet confirmed (retry scoped to the second step).

use thiserror::Error;

use crate::domain::foundation::{AdmissionId, PatientId, QueueId, Role};

use super::QueueState;

/// Errors surfaced by the queue coordination components.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueueError {
    #[error("Queue entry {queue_id} not found")]
    EntryNotFound { queue_id: QueueId },

    #[error("Triage level must be between 0 and 5, got {actual}")]
    InvalidTriageLevel { actual: u8 },

    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: QueueState, to: QueueState },

    #[error("A {role} may not request the transition from {from} to {to}")]
    Forbidden {
        role: Role,
        from: QueueState,
        to: QueueState,
    },

    #[error("Confirming an admission requires a bed allocation")]
    BedRequired,

    #[error("Selection incomplete, missing: {}", fields.join(", "))]
    MissingSelection { fields: Vec<&'static str> },

    #[error("Patient {patient_id} already has an active queue entry")]
    PatientAlreadyQueued { patient_id: PatientId },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Admission {admission_id} exists but queue entry {queue_id} is not confirmed: {reason}")]
    UnconfirmedAdmission {
        admission_id: AdmissionId,
        queue_id: QueueId,
        reason: String,
    },

    #[error("No pending admission confirmation to resume")]
    NothingToResume,

    #[error("Remote call failed: {message}")]
    Remote { message: String },
}

impl QueueError {
    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        QueueError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a remote call failure.
    pub fn remote(message: impl Into<String>) -> Self {
        QueueError::Remote {
            message: message.into(),
        }
    }

    /// Returns true when the operator can meaningfully retry the action.
    ///
    /// Conflicts mean a concurrent session won a race (reselect and retry);
    /// an unconfirmed admission retries only its confirmation step; remote
    /// failures may be transient.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            QueueError::Conflict { .. }
                | QueueError::UnconfirmedAdmission { .. }
                | QueueError::Remote { .. }
        )
    }

    /// Returns true for local validation failures that need correction,
    /// not retry.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            QueueError::InvalidTriageLevel { .. }
                | QueueError::InvalidTransition { .. }
                | QueueError::Forbidden { .. }
                | QueueError::BedRequired
                | QueueError::MissingSelection { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_is_retryable() {
        assert!(QueueError::conflict("bed 9 already taken").is_retryable());
    }

    #[test]
    fn unconfirmed_admission_is_retryable() {
        let err = QueueError::UnconfirmedAdmission {
            admission_id: AdmissionId::new(1),
            queue_id: QueueId::new(7),
            reason: "timeout".to_string(),
        };
        assert!(err.is_retryable());
        assert!(!err.is_validation());
    }

    #[test]
    fn validation_errors_are_not_retryable() {
        let err = QueueError::MissingSelection {
            fields: vec!["ward", "bed"],
        };
        assert!(err.is_validation());
        assert!(!err.is_retryable());
    }

    #[test]
    fn missing_selection_names_the_fields() {
        let err = QueueError::MissingSelection {
            fields: vec!["department", "bed"],
        };
        assert_eq!(
            format!("{}", err),
            "Selection incomplete, missing: department, bed"
        );
    }
}
