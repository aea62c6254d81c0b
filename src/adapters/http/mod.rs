//! REST adapters for the hospital API collaborators.
//!
//! A shared [`ApiClient`] owns the reqwest client, base URL, and bearer
//! token; the per-port adapters compose paths and map response statuses.

mod admission;
mod client;
mod directory;
mod queue;
mod verify;

pub use admission::RestAdmissionService;
pub use client::{ApiClient, ApiError};
pub use directory::RestWardDirectory;
pub use queue::RestQueueService;
pub use verify::RestCredentialVerifier;
