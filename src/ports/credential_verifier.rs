//! CredentialVerifier port - password re-verification.

use async_trait::async_trait;

use crate::domain::queue::QueueError;

/// Port for the password verification collaborator used by the
/// sensitive-action gate.
///
/// Returns `Ok(false)` for a wrong password; `Err` is reserved for the
/// verification call itself failing.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verifies the operator's password.
    async fn verify(&self, username: &str, password: &str) -> Result<bool, QueueError>;
}
