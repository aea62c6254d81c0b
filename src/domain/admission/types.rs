//! Ward directory records and the admission resource.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AdmissionId, BedId, DepartmentId, PatientId, QueueId, WardId};

/// A hospital department, the root of the cascading bed selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

/// A ward within a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ward {
    pub id: WardId,
    pub department_id: DepartmentId,
    pub name: String,
}

/// A bed within a ward.
///
/// `is_taken` is advisory at read time. At most one active admission may
/// reference a bed, but that invariant is enforced server-side at
/// allocation; a bed shown as free here may still be rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    pub id: BedId,
    pub ward_id: WardId,
    pub is_taken: bool,
}

/// Lifecycle status of an admission resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdmissionStatus {
    #[default]
    Active,
    Discharged,
}

/// An admission binding a patient and queue entry to a specific bed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    pub id: AdmissionId,
    pub patient_id: PatientId,
    pub queue_id: QueueId,
    pub bed_id: BedId,
    pub status: AdmissionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bed_deserializes_from_wire_json() {
        let bed: Bed = serde_json::from_str(r#"{"id": 9, "wardId": 2, "isTaken": false}"#).unwrap();
        assert_eq!(bed.id, BedId::new(9));
        assert_eq!(bed.ward_id, WardId::new(2));
        assert!(!bed.is_taken);
    }

    #[test]
    fn admission_status_uses_wire_casing() {
        assert_eq!(
            serde_json::to_string(&AdmissionStatus::Active).unwrap(),
            "\"ACTIVE\""
        );
    }
}
