//! Scripted push transport for testing.
//!
//! Lets a test feed frames into a running push channel as if the server
//! had published them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::domain::queue::PushEvent;
use crate::ports::{PushConnection, PushTransport, TransportError};

/// Sender half handed to the test; each frame reaches the live connection.
#[derive(Clone)]
pub struct SharedFrameSender(UnboundedSender<String>);

impl SharedFrameSender {
    /// Sends a raw text frame.
    pub fn send_raw(&self, frame: impl Into<String>) {
        let _ = self.0.send(frame.into());
    }

    /// Sends a serialized push event.
    pub fn send_event(&self, event: &PushEvent) {
        let frame = serde_json::to_string(event).expect("push event serializes");
        self.send_raw(frame);
    }
}

/// [`PushTransport`] serving a single scripted connection.
///
/// The first `connect` hands out the frame stream; later connects fail,
/// which also makes reconnect behavior observable via `connect_count`.
pub struct ScriptedPushTransport {
    receiver: Mutex<Option<UnboundedReceiver<String>>>,
    connects: AtomicUsize,
}

impl ScriptedPushTransport {
    /// Creates a transport plus the sender used to feed it frames.
    pub fn channel() -> (Self, SharedFrameSender) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                receiver: Mutex::new(Some(rx)),
                connects: AtomicUsize::new(0),
            },
            SharedFrameSender(tx),
        )
    }

    /// Number of connection attempts made against this transport.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

struct ScriptedConnection {
    receiver: UnboundedReceiver<String>,
}

#[async_trait]
impl PushConnection for ScriptedConnection {
    async fn next_message(&mut self) -> Option<String> {
        self.receiver.recv().await
    }
}

#[async_trait]
impl PushTransport for ScriptedPushTransport {
    async fn connect(
        &self,
        _token: &str,
        _topic: &str,
    ) -> Result<Box<dyn PushConnection>, TransportError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        match self
            .receiver
            .lock()
            .expect("scripted transport lock poisoned")
            .take()
        {
            Some(receiver) => Ok(Box::new(ScriptedConnection { receiver })),
            None => Err(TransportError::Connection(
                "scripted connection already consumed".to_string(),
            )),
        }
    }
}
