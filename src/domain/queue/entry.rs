//! QueueEntry - one patient's record in the triage/admission pipeline.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PatientId, QueueId, Timestamp, TriageId};

use super::{Priority, QueueError, QueueState, QueueStatus};

/// Highest triage level (least severe). Level 0 is the most severe.
pub const MAX_TRIAGE_LEVEL: u8 = 5;

/// One patient's place in the triage/admission pipeline.
///
/// Entries are produced by the queue REST collaborator and by push events;
/// both converge on the read-model cache keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: QueueId,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub triage_id: TriageId,
    /// 0-5, lower is more severe.
    pub triage_level: u8,
    pub priority: Priority,
    pub status: QueueStatus,
    /// Meaningful only when `status` is `Admitted`: false = awaiting bed
    /// confirmation, true = admission finalized.
    pub admitted: bool,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl QueueEntry {
    /// Creates a waiting entry, validating the triage level.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: QueueId,
        patient_id: PatientId,
        patient_name: impl Into<String>,
        triage_id: TriageId,
        triage_level: u8,
        priority: Priority,
    ) -> Result<Self, QueueError> {
        if triage_level > MAX_TRIAGE_LEVEL {
            return Err(QueueError::InvalidTriageLevel {
                actual: triage_level,
            });
        }

        Ok(Self {
            id,
            patient_id,
            patient_name: patient_name.into(),
            triage_id,
            triage_level,
            priority,
            status: QueueStatus::Waiting,
            admitted: false,
            created_at: Timestamp::now(),
            updated_at: None,
        })
    }

    /// The effective lifecycle state derived from `(status, admitted)`.
    pub fn state(&self) -> QueueState {
        QueueState::from_parts(self.status, self.admitted)
    }

    /// Returns true while this entry blocks a new entry for the patient.
    pub fn is_blocking(&self) -> bool {
        self.state().is_blocking()
    }

    /// Merges an incoming snapshot of the same entry into this one.
    ///
    /// Precedence rule: when both sides carry `updated_at` and the incoming
    /// snapshot is strictly older, it is discarded, so a stale push event
    /// can never resurrect a superseded status. Otherwise the incoming
    /// snapshot wins, retaining the existing `updated_at` when the incoming
    /// one is absent. Returns true when the incoming snapshot was applied.
    pub fn merge_from(&mut self, incoming: QueueEntry) -> bool {
        debug_assert_eq!(self.id, incoming.id);

        if let (Some(current), Some(candidate)) = (&self.updated_at, &incoming.updated_at) {
            if candidate.is_before(current) {
                return false;
            }
        }

        let retained = self.updated_at;
        *self = incoming;
        if self.updated_at.is_none() {
            self.updated_at = retained;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64) -> QueueEntry {
        QueueEntry::new(
            QueueId::new(id),
            PatientId::new(100 + id),
            "Amina Diallo",
            TriageId::new(200 + id),
            2,
            Priority::Normal,
        )
        .unwrap()
    }

    #[test]
    fn new_entry_starts_waiting_and_blocking() {
        let e = entry(7);
        assert_eq!(e.state(), QueueState::Waiting);
        assert!(e.is_blocking());
        assert!(!e.admitted);
    }

    #[test]
    fn triage_level_above_five_is_rejected() {
        let result = QueueEntry::new(
            QueueId::new(1),
            PatientId::new(1),
            "x",
            TriageId::new(1),
            6,
            Priority::Normal,
        );
        assert_eq!(result, Err(QueueError::InvalidTriageLevel { actual: 6 }));
    }

    #[test]
    fn merge_applies_a_newer_snapshot() {
        let mut cached = entry(7);
        cached.updated_at = Some(Timestamp::from_unix_secs(1_000));

        let mut incoming = entry(7);
        incoming.status = QueueStatus::Admitted;
        incoming.updated_at = Some(Timestamp::from_unix_secs(2_000));

        assert!(cached.merge_from(incoming));
        assert_eq!(cached.state(), QueueState::AdmittedUnconfirmed);
    }

    #[test]
    fn merge_discards_a_stale_snapshot() {
        let mut cached = entry(7);
        cached.status = QueueStatus::Outpatient;
        cached.updated_at = Some(Timestamp::from_unix_secs(2_000));

        let mut stale = entry(7);
        stale.status = QueueStatus::Waiting;
        stale.updated_at = Some(Timestamp::from_unix_secs(1_000));

        assert!(!cached.merge_from(stale));
        assert_eq!(cached.status, QueueStatus::Outpatient);
    }

    #[test]
    fn merge_without_incoming_timestamp_keeps_the_existing_one() {
        let mut cached = entry(7);
        let ts = Timestamp::from_unix_secs(1_000);
        cached.updated_at = Some(ts);

        let mut incoming = entry(7);
        incoming.priority = Priority::Critical;
        incoming.updated_at = None;

        assert!(cached.merge_from(incoming));
        assert_eq!(cached.priority, Priority::Critical);
        assert_eq!(cached.updated_at, Some(ts));
    }

    #[test]
    fn deserializes_from_camel_case_wire_json() {
        let json = r#"{
            "id": 7,
            "patientId": 42,
            "patientName": "Amina Diallo",
            "triageId": 11,
            "triageLevel": 1,
            "priority": "CRITICAL",
            "status": "WAITING",
            "admitted": false,
            "createdAt": "2026-08-28T09:00:00Z"
        }"#;

        let e: QueueEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.id, QueueId::new(7));
        assert_eq!(e.priority, Priority::Critical);
        assert_eq!(e.updated_at, None);
    }
}
