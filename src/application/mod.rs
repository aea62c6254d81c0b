//! Application layer - the coordination components.
//!
//! Everything the surrounding UI talks to lives here: the queue read-model
//! cache, the push synchronization channel, the lifecycle command handlers,
//! the admission allocation protocol, and the sensitive-action gate.

pub mod cache;
pub mod gate;
pub mod handlers;
pub mod sync;

pub use cache::QueueCache;
pub use gate::{GatePrompt, GateState, SensitiveAction, SensitiveGate};
pub use sync::PushChannel;
