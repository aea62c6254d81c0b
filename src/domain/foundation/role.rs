//! Operator roles and their transition rights.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the operator driving a session.
///
/// The queue lifecycle grants different transition rights per role; the
/// concrete table lives with [`QueueState`](crate::domain::queue::QueueState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Nurse,
    Doctor,
    Admin,
}

impl Role {
    /// Returns true for roles with clinical transition rights (doctor-level).
    pub fn is_doctor(&self) -> bool {
        matches!(self, Role::Doctor | Role::Admin)
    }

    /// Returns true for roles with front-desk rights (nurse-level).
    pub fn is_nurse(&self) -> bool {
        matches!(self, Role::Nurse | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Nurse => "nurse",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}
