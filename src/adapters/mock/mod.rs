//! In-memory mock adapters for testing.
//!
//! Deterministic implementations of every port, with failure injection
//! for the error paths. Not for production use.

mod admission;
mod directory;
mod push;
mod queue;
mod verifier;

pub use admission::MockAdmissionService;
pub use directory::StaticWardDirectory;
pub use push::{ScriptedPushTransport, SharedFrameSender};
pub use queue::MockQueueService;
pub use verifier::MockCredentialVerifier;
