//! PushTransport port - the server-push message stream.
//!
//! The synchronization channel drives this port; injecting it keeps the
//! channel testable without a live socket.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a push transport.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Failed to establish the connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A protocol-level error on an established connection.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// A live push connection delivering raw text frames.
#[async_trait]
pub trait PushConnection: Send {
    /// Awaits the next text frame.
    ///
    /// Returns `None` once the connection is closed; the channel then
    /// reconnects with backoff.
    async fn next_message(&mut self) -> Option<String>;
}

/// Port for establishing push connections.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Connects and subscribes to the given topic with the session's
    /// bearer token.
    async fn connect(
        &self,
        token: &str,
        topic: &str,
    ) -> Result<Box<dyn PushConnection>, TransportError>;
}
