//! Queue domain - one patient's place in the triage/admission pipeline.

mod entry;
mod errors;
mod priority;
mod push_event;
mod state;
mod status;

pub use entry::{QueueEntry, MAX_TRIAGE_LEVEL};
pub use errors::QueueError;
pub use priority::Priority;
pub use push_event::PushEvent;
pub use state::{authorize_request, QueueState};
pub use status::QueueStatus;
