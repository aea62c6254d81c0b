//! Queue lifecycle command handlers.

mod change_priority;
mod load_queue;
mod register_patient;
mod request_transition;

pub use change_priority::{ChangePriorityCommand, ChangePriorityHandler};
pub use load_queue::LoadQueueHandler;
pub use register_patient::{RegisterPatientCommand, RegisterPatientHandler};
pub use request_transition::{RequestTransitionCommand, RequestTransitionHandler};
