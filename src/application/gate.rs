//! Sensitive-action gate.
//!
//! Wraps an arbitrary pending mutation so it only executes after the
//! operator re-enters their password and it is verified. The gate is an
//! explicit state machine (`Idle -> Prompting -> Verifying -> Running`)
//! holding a single command object, so every path, including action
//! failure and retry, is observable and testable.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::OperatorSession;
use crate::domain::queue::QueueError;
use crate::ports::CredentialVerifier;

/// The pending mutation guarded by the gate.
#[async_trait]
pub trait SensitiveAction: Send + Sync {
    /// Executes the mutation.
    async fn run(&self) -> Result<(), QueueError>;

    /// Action name for logging.
    fn name(&self) -> &'static str;
}

/// Title and description shown while prompting for the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePrompt {
    pub title: String,
    pub description: String,
}

impl GatePrompt {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Observable state of the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// No pending action; the gate is closed.
    Idle,
    /// Awaiting the operator's password. `error` carries the previous
    /// verification or action failure for inline display.
    Prompting {
        prompt: GatePrompt,
        error: Option<String>,
    },
    /// The password verification call is in flight.
    Verifying,
    /// Verification succeeded; the pending action is executing.
    Running,
}

/// Errors surfaced by [`SensitiveGate::confirm`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GateError {
    #[error("No sensitive action is awaiting confirmation")]
    NotPrompting,

    #[error("Password verification failed")]
    VerificationFailed,

    #[error("Password verification call failed: {0}")]
    VerifierUnavailable(#[source] QueueError),

    #[error("Sensitive action failed: {0}")]
    ActionFailed(#[source] QueueError),
}

struct GateInner {
    state: GateState,
    pending: Option<Arc<dyn SensitiveAction>>,
}

/// Password re-verification wrapper around a pending mutation.
pub struct SensitiveGate {
    verifier: Arc<dyn CredentialVerifier>,
    session: OperatorSession,
    inner: Mutex<GateInner>,
}

impl SensitiveGate {
    /// Creates a gate for the given operator session.
    pub fn new(verifier: Arc<dyn CredentialVerifier>, session: OperatorSession) -> Self {
        Self {
            verifier,
            session,
            inner: Mutex::new(GateInner {
                state: GateState::Idle,
                pending: None,
            }),
        }
    }

    /// Opens the gate with a pending action.
    ///
    /// Only one pending action is held at a time: asking again while the
    /// gate is prompting replaces the previous closure. While a
    /// verification or action is in flight the request is ignored, so a
    /// half-completed sensitive mutation is never swapped out from under
    /// the operator.
    pub fn ask(&self, prompt: GatePrompt, action: Arc<dyn SensitiveAction>) {
        let mut inner = self.inner.lock().expect("gate lock poisoned");
        if matches!(inner.state, GateState::Verifying | GateState::Running) {
            tracing::warn!(action = action.name(), "gate busy, ignoring new request");
            return;
        }
        inner.pending = Some(action);
        inner.state = GateState::Prompting {
            prompt,
            error: None,
        };
    }

    /// Verifies the password and, on success, runs the pending action.
    ///
    /// On verification failure the gate stays open with an inline error
    /// and the action never runs. If the action fails, the gate re-opens
    /// with the action's error and the pending closure is retained so the
    /// operator can retry without re-navigating.
    pub async fn confirm(&self, password: &str) -> Result<(), GateError> {
        let (prompt, action) = {
            let mut inner = self.inner.lock().expect("gate lock poisoned");
            let (prompt, action) = match (&inner.state, &inner.pending) {
                (GateState::Prompting { prompt, .. }, Some(action)) => {
                    (prompt.clone(), Arc::clone(action))
                }
                _ => return Err(GateError::NotPrompting),
            };
            inner.state = GateState::Verifying;
            (prompt, action)
        };

        match self
            .verifier
            .verify(self.session.username(), password)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                self.reopen(prompt, "Password verification failed");
                return Err(GateError::VerificationFailed);
            }
            Err(err) => {
                self.reopen(prompt, &err.to_string());
                return Err(GateError::VerifierUnavailable(err));
            }
        }

        {
            let mut inner = self.inner.lock().expect("gate lock poisoned");
            inner.state = GateState::Running;
        }

        tracing::info!(action = action.name(), "running gated action");
        match action.run().await {
            Ok(()) => {
                let mut inner = self.inner.lock().expect("gate lock poisoned");
                inner.state = GateState::Idle;
                inner.pending = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(action = action.name(), error = %err, "gated action failed");
                self.reopen(prompt, &err.to_string());
                Err(GateError::ActionFailed(err))
            }
        }
    }

    /// Closes the gate and discards the pending action.
    ///
    /// No-op while a verification or action is in flight: a submitted
    /// sensitive mutation cannot be abandoned halfway.
    pub fn close(&self) {
        let mut inner = self.inner.lock().expect("gate lock poisoned");
        if matches!(inner.state, GateState::Verifying | GateState::Running) {
            return;
        }
        inner.state = GateState::Idle;
        inner.pending = None;
    }

    /// Snapshot of the current gate state.
    pub fn state(&self) -> GateState {
        self.inner
            .lock()
            .expect("gate lock poisoned")
            .state
            .clone()
    }

    fn reopen(&self, prompt: GatePrompt, error: &str) {
        let mut inner = self.inner.lock().expect("gate lock poisoned");
        inner.state = GateState::Prompting {
            prompt,
            error: Some(error.to_string()),
        };
    }
}
