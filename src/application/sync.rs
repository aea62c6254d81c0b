//! Push synchronization channel.
//!
//! Maintains at most one live subscription to the server push stream per
//! session and translates inbound frames into cache operations. The
//! channel is a latency optimization, not the source of truth: every
//! failure here is recovered internally and the UI stays usable through
//! the REST collaborators.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::PushConfig;
use crate::domain::foundation::OperatorSession;
use crate::domain::queue::PushEvent;
use crate::ports::PushTransport;

use super::QueueCache;

/// The live push subscription for one session.
pub struct PushChannel {
    transport: Arc<dyn PushTransport>,
    cache: Arc<QueueCache>,
    topic: String,
    reconnect_backoff: Duration,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl PushChannel {
    /// Creates a channel over the given transport and cache.
    pub fn new(
        transport: Arc<dyn PushTransport>,
        cache: Arc<QueueCache>,
        topic: impl Into<String>,
        reconnect_backoff: Duration,
    ) -> Self {
        Self {
            transport,
            cache,
            topic: topic.into(),
            reconnect_backoff,
            worker: Mutex::new(None),
        }
    }

    /// Creates a channel from the push configuration section.
    pub fn from_config(
        transport: Arc<dyn PushTransport>,
        cache: Arc<QueueCache>,
        config: &PushConfig,
    ) -> Self {
        Self::new(transport, cache, config.topic.clone(), config.reconnect_backoff())
    }

    /// Starts the subscription worker for the session.
    ///
    /// Idempotent: when a live worker already exists this is a no-op, so
    /// repeated mounts never open duplicate subscriptions.
    pub fn start(&self, session: &OperatorSession) {
        let mut worker = self.worker.lock().expect("push channel lock poisoned");
        if worker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            tracing::debug!(topic = %self.topic, "push channel already running");
            return;
        }

        let transport = Arc::clone(&self.transport);
        let cache = Arc::clone(&self.cache);
        let topic = self.topic.clone();
        let token = session.token().to_string();
        let backoff = self.reconnect_backoff;

        *worker = Some(tokio::spawn(async move {
            run_subscription(transport, cache, token, topic, backoff).await;
        }));
    }

    /// Tears down the subscription. Safe to call when never started.
    pub fn stop(&self) {
        let mut worker = self.worker.lock().expect("push channel lock poisoned");
        if let Some(handle) = worker.take() {
            handle.abort();
            tracing::info!(topic = %self.topic, "push channel stopped");
        }
    }

    /// Returns true while a subscription worker is live.
    pub fn is_running(&self) -> bool {
        self.worker
            .lock()
            .expect("push channel lock poisoned")
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

/// Connects, consumes frames, and reconnects with fixed backoff on drop.
///
/// No ordering is guaranteed across a reconnect; every frame is applied as
/// an idempotent upsert/remove, so redundant deliveries are harmless.
async fn run_subscription(
    transport: Arc<dyn PushTransport>,
    cache: Arc<QueueCache>,
    token: String,
    topic: String,
    backoff: Duration,
) {
    loop {
        match transport.connect(&token, &topic).await {
            Ok(mut connection) => {
                tracing::info!(topic = %topic, "push channel connected");
                while let Some(frame) = connection.next_message().await {
                    match PushEvent::parse(&frame) {
                        Some(event) => apply_event(&cache, event),
                        None => {
                            tracing::debug!(topic = %topic, "dropping unrecognized push frame");
                        }
                    }
                }
                tracing::warn!(topic = %topic, "push connection closed, reconnecting");
            }
            Err(err) => {
                tracing::warn!(topic = %topic, error = %err, "push connect failed");
            }
        }
        tokio::time::sleep(backoff).await;
    }
}

/// Applies one push event to the cache.
///
/// Create and update both land as the same upsert; events without a
/// payload are dropped.
fn apply_event(cache: &QueueCache, event: PushEvent) {
    match event {
        PushEvent::Created { payload: Some(entry) } | PushEvent::Updated { payload: Some(entry) } => {
            cache.upsert(entry);
        }
        PushEvent::Created { payload: None } | PushEvent::Updated { payload: None } => {
            tracing::debug!("dropping push event without payload");
        }
        PushEvent::Deleted { queue_id } => {
            cache.remove(queue_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PatientId, QueueId, Role, TriageId};
    use crate::domain::queue::{Priority, QueueEntry};
    use crate::ports::{PushConnection, TransportError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(id: i64) -> QueueEntry {
        QueueEntry::new(
            QueueId::new(id),
            PatientId::new(100 + id),
            format!("patient-{id}"),
            TriageId::new(200 + id),
            2,
            Priority::Normal,
        )
        .unwrap()
    }

    fn session() -> OperatorSession {
        OperatorSession::new("n.okafor", Role::Nurse, "tok")
    }

    /// Transport yielding one scripted connection, then failing connects.
    struct ScriptedTransport {
        frames: Mutex<Option<Vec<String>>>,
        connects: AtomicUsize,
    }

    impl ScriptedTransport {
        fn new(frames: Vec<String>) -> Self {
            Self {
                frames: Mutex::new(Some(frames)),
                connects: AtomicUsize::new(0),
            }
        }
    }

    struct ScriptedConnection {
        frames: VecDeque<String>,
    }

    #[async_trait]
    impl PushConnection for ScriptedConnection {
        async fn next_message(&mut self) -> Option<String> {
            self.frames.pop_front()
        }
    }

    #[async_trait]
    impl PushTransport for ScriptedTransport {
        async fn connect(
            &self,
            _token: &str,
            _topic: &str,
        ) -> Result<Box<dyn PushConnection>, TransportError> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            match self.frames.lock().unwrap().take() {
                Some(frames) => Ok(Box::new(ScriptedConnection {
                    frames: frames.into(),
                })),
                None => Err(TransportError::Connection("no more connections".into())),
            }
        }
    }

    fn channel_with(
        frames: Vec<String>,
        cache: Arc<QueueCache>,
    ) -> (PushChannel, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new(frames));
        let channel = PushChannel::new(
            Arc::clone(&transport) as Arc<dyn PushTransport>,
            cache,
            "/topic/queue",
            Duration::from_millis(10),
        );
        (channel, transport)
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn applies_created_and_deleted_frames_to_the_cache() {
        let cache = Arc::new(QueueCache::new());
        cache.upsert(entry(3));

        let created = serde_json::to_string(&PushEvent::Created {
            payload: Some(entry(7)),
        })
        .unwrap();
        let deleted = serde_json::to_string(&PushEvent::Deleted {
            queue_id: QueueId::new(3),
        })
        .unwrap();

        let (channel, _) = channel_with(vec![created, deleted], Arc::clone(&cache));
        channel.start(&session());
        settle().await;

        assert_eq!(cache.get_by_id(QueueId::new(7)).map(|e| e.id), Some(QueueId::new(7)));
        assert_eq!(cache.get_by_id(QueueId::new(3)), None);
        channel.stop();
    }

    #[tokio::test]
    async fn malformed_frames_are_dropped_silently() {
        let cache = Arc::new(QueueCache::new());
        let created = serde_json::to_string(&PushEvent::Created {
            payload: Some(entry(7)),
        })
        .unwrap();

        let frames = vec![
            "garbage".to_string(),
            r#"{"type": "UNKNOWN_EVENT"}"#.to_string(),
            r#"{"type": "QUEUE_UPDATED"}"#.to_string(),
            created,
        ];

        let (channel, _) = channel_with(frames, Arc::clone(&cache));
        channel.start(&session());
        settle().await;

        // Only the well-formed created event landed.
        assert_eq!(cache.len(), 1);
        channel.stop();
    }

    #[tokio::test]
    async fn start_is_idempotent_while_running() {
        let cache = Arc::new(QueueCache::new());
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let channel = PushChannel::new(
            Arc::clone(&transport) as Arc<dyn PushTransport>,
            cache,
            "/topic/queue",
            Duration::from_secs(60),
        );

        channel.start(&session());
        channel.start(&session());
        channel.start(&session());
        settle().await;

        // One worker, one initial connect (the retry is still backing off).
        assert_eq!(transport.connects.load(Ordering::SeqCst), 1);
        channel.stop();
    }

    #[tokio::test]
    async fn reconnects_with_backoff_after_drop() {
        let cache = Arc::new(QueueCache::new());
        let (channel, transport) = channel_with(vec![], Arc::clone(&cache));

        channel.start(&session());
        tokio::time::sleep(Duration::from_millis(100)).await;

        // First connect succeeded, stream ended, then the loop kept
        // retrying on the 10ms backoff.
        assert!(transport.connects.load(Ordering::SeqCst) >= 2);
        channel.stop();
    }

    #[tokio::test]
    async fn stop_without_start_is_safe() {
        let cache = Arc::new(QueueCache::new());
        let (channel, _) = channel_with(vec![], cache);
        channel.stop();
        assert!(!channel.is_running());
    }
}
