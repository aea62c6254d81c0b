//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the coordination layer and the outside world. Adapters implement them.
//! Every collaborator here is opaque; only its contract matters.
//!
//! - `QueueService` - queue entry CRUD plus the blocking-entry pre-check
//! - `AdmissionService` - admission creation
//! - `WardDirectory` - department/ward/bed read endpoints
//! - `CredentialVerifier` - password re-verification
//! - `PushTransport` / `PushConnection` - the server-push message stream

mod admission_service;
mod credential_verifier;
mod push_transport;
mod queue_service;
mod ward_directory;

pub use admission_service::{AdmissionService, CreateAdmissionRequest};
pub use credential_verifier::CredentialVerifier;
pub use push_transport::{PushConnection, PushTransport, TransportError};
pub use queue_service::{CreateQueueRequest, QueueService, UpdateQueueRequest};
pub use ward_directory::WardDirectory;
