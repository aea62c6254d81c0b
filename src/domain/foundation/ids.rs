//! Strongly-typed identifier value objects.
//!
//! The REST collaborators address every resource by a numeric id, so the
//! identifiers here are thin newtypes over `i64` rather than UUIDs. Keeping
//! them distinct types prevents a `bed_id` from ever being passed where a
//! `queue_id` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from its raw numeric value.
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw numeric value.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Unique identifier for a queue entry.
    QueueId
);
numeric_id!(
    /// Unique identifier for a patient.
    PatientId
);
numeric_id!(
    /// Unique identifier for a triage assessment.
    TriageId
);
numeric_id!(
    /// Unique identifier for an admission.
    AdmissionId
);
numeric_id!(
    /// Unique identifier for a department.
    DepartmentId
);
numeric_id!(
    /// Unique identifier for a ward.
    WardId
);
numeric_id!(
    /// Unique identifier for a bed.
    BedId
);
