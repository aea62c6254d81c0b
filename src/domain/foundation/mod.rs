//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the timestamp value object, the operator session
//! context, roles, and the generic state machine trait that the queue
//! lifecycle builds on.

mod ids;
mod role;
mod session;
mod state_machine;
mod timestamp;

pub use ids::{AdmissionId, BedId, DepartmentId, PatientId, QueueId, TriageId, WardId};
pub use role::Role;
pub use session::OperatorSession;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
