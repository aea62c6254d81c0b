//! Operator session context.
//!
//! The current user and bearer token are passed explicitly to the
//! components that need them (push channel, REST adapters, gate) instead
//! of living in ambient global state, so every component is testable by
//! injection.

use secrecy::{ExposeSecret, Secret};

use super::Role;

/// Identity and credential of the operator driving this session.
#[derive(Clone)]
pub struct OperatorSession {
    username: String,
    role: Role,
    token: Secret<String>,
}

impl OperatorSession {
    /// Creates a session context for an authenticated operator.
    pub fn new(username: impl Into<String>, role: Role, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role,
            token: Secret::new(token.into()),
        }
    }

    /// The operator's login name, used for password re-verification.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The operator's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Exposes the bearer token for an outgoing request.
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

impl std::fmt::Debug for OperatorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorSession")
            .field("username", &self.username)
            .field("role", &self.role)
            .field("token", &"<redacted>")
            .finish()
    }
}
