//! Fixed-password credential verifier for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::queue::QueueError;
use crate::ports::CredentialVerifier;

/// [`CredentialVerifier`] accepting one configured password.
pub struct MockCredentialVerifier {
    accepted: String,
    calls: AtomicUsize,
    fail_next: Mutex<Option<String>>,
}

impl MockCredentialVerifier {
    pub fn accepting(password: impl Into<String>) -> Self {
        Self {
            accepted: password.into(),
            calls: AtomicUsize::new(0),
            fail_next: Mutex::new(None),
        }
    }

    /// Fails the next `verify` call itself (not a wrong password).
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock().expect("mock verifier lock poisoned") = Some(message.into());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialVerifier for MockCredentialVerifier {
    async fn verify(&self, _username: &str, password: &str) -> Result<bool, QueueError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self
            .fail_next
            .lock()
            .expect("mock verifier lock poisoned")
            .take()
        {
            return Err(QueueError::remote(message));
        }
        Ok(password == self.accepted)
    }
}
