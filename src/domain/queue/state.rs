//! The queue lifecycle state machine.
//!
//! The wire contract stores a coarse `status` plus an `admitted` flag; this
//! module derives the five effective lifecycle states from that pair and
//! gates which transitions a caller may request, independent of how the
//! mutation reaches the server. Guard violations fail here, locally,
//! before any remote call is issued.

use std::fmt;

use crate::domain::foundation::{Role, StateMachine};

use super::{QueueError, QueueStatus};

/// Effective lifecycle state of a queue entry.
///
/// Derived from `(status, admitted)`: an `ADMITTED` entry with
/// `admitted = false` is awaiting bed confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueState {
    Waiting,
    AdmittedUnconfirmed,
    AdmittedConfirmed,
    Outpatient,
    Cancelled,
}

impl QueueState {
    /// Derives the effective state from the wire representation.
    pub fn from_parts(status: QueueStatus, admitted: bool) -> Self {
        match (status, admitted) {
            (QueueStatus::Waiting, _) => QueueState::Waiting,
            (QueueStatus::Admitted, false) => QueueState::AdmittedUnconfirmed,
            (QueueStatus::Admitted, true) => QueueState::AdmittedConfirmed,
            (QueueStatus::Outpatient, _) => QueueState::Outpatient,
            (QueueStatus::Cancelled, _) => QueueState::Cancelled,
        }
    }

    /// Splits the state back into its wire representation.
    pub fn into_parts(self) -> (QueueStatus, bool) {
        match self {
            QueueState::Waiting => (QueueStatus::Waiting, false),
            QueueState::AdmittedUnconfirmed => (QueueStatus::Admitted, false),
            QueueState::AdmittedConfirmed => (QueueStatus::Admitted, true),
            QueueState::Outpatient => (QueueStatus::Outpatient, false),
            QueueState::Cancelled => (QueueStatus::Cancelled, false),
        }
    }

    /// Returns true for states that block a new entry for the same patient.
    pub fn is_blocking(&self) -> bool {
        matches!(self, QueueState::Waiting | QueueState::AdmittedUnconfirmed)
    }
}

impl StateMachine for QueueState {
    type Error = QueueError;

    fn can_transition_to(&self, target: &Self) -> bool {
        use QueueState::*;
        matches!(
            (self, target),
            (Waiting, AdmittedUnconfirmed)
                | (Waiting, Outpatient)
                | (Waiting, Cancelled)
                | (AdmittedUnconfirmed, AdmittedConfirmed)
                | (AdmittedUnconfirmed, Outpatient)
                | (AdmittedUnconfirmed, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use QueueState::*;
        match self {
            Waiting => vec![AdmittedUnconfirmed, Outpatient, Cancelled],
            AdmittedUnconfirmed => vec![AdmittedConfirmed, Outpatient, Cancelled],
            AdmittedConfirmed | Outpatient | Cancelled => vec![],
        }
    }

    fn rejection(&self, target: &Self) -> QueueError {
        QueueError::InvalidTransition {
            from: *self,
            to: *target,
        }
    }
}

/// Validates a caller-requested transition against both the state machine
/// and the caller's role.
///
/// Confirmation of an admission (`AdmittedUnconfirmed -> AdmittedConfirmed`)
/// is never grantable through a bare status edit; it must go through the
/// allocation protocol, which performs the bed binding first.
pub fn authorize_request(role: Role, from: QueueState, to: QueueState) -> Result<(), QueueError> {
    if !from.can_transition_to(&to) {
        return Err(from.rejection(&to));
    }

    if to == QueueState::AdmittedConfirmed {
        return Err(QueueError::BedRequired);
    }

    let allowed = match (from, to) {
        (QueueState::Waiting, QueueState::AdmittedUnconfirmed) => role.is_doctor(),
        // Routing to outpatient or cancelling is a doctor or nurse action,
        // from waiting and from an unconfirmed admission alike.
        (QueueState::Waiting, _) | (QueueState::AdmittedUnconfirmed, _) => {
            role.is_doctor() || role.is_nurse()
        }
        _ => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(QueueError::Forbidden { role, from, to })
    }
}

impl fmt::Display for QueueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueueState::Waiting => "waiting",
            QueueState::AdmittedUnconfirmed => "admitted (unconfirmed)",
            QueueState::AdmittedConfirmed => "admitted (confirmed)",
            QueueState::Outpatient => "outpatient",
            QueueState::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}
