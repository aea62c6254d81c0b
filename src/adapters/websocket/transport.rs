//! WebSocket push transport over tokio-tungstenite.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

use crate::config::PushConfig;
use crate::ports::{PushConnection, PushTransport, TransportError};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Subscription frame sent after the handshake.
#[derive(Debug, Serialize)]
struct SubscribeFrame<'a> {
    action: &'static str,
    topic: &'a str,
}

/// Push transport connecting to the hospital's WebSocket endpoint.
pub struct TungsteniteTransport {
    url: String,
}

impl TungsteniteTransport {
    pub fn new(config: &PushConfig) -> Self {
        Self {
            url: config.url.clone(),
        }
    }
}

#[async_trait]
impl PushTransport for TungsteniteTransport {
    async fn connect(
        &self,
        token: &str,
        topic: &str,
    ) -> Result<Box<dyn PushConnection>, TransportError> {
        // Unique client id so the server can address this session.
        let client_id = uuid::Uuid::new_v4().to_string();
        let url = format!("{}?clientId={}", self.url, client_id);

        let mut request = url
            .into_client_request()
            .map_err(|e| TransportError::Connection(format!("Invalid push URL: {e}")))?;
        let bearer = format!("Bearer {token}")
            .parse()
            .map_err(|_| TransportError::Connection("Invalid bearer token".to_string()))?;
        request.headers_mut().insert(AUTHORIZATION, bearer);

        let (mut ws_stream, _response) = connect_async(request).await.map_err(|e| {
            TransportError::Connection(format!("Failed to connect to {}: {e}", self.url))
        })?;

        let subscribe = SubscribeFrame {
            action: "subscribe",
            topic,
        };
        let frame = serde_json::to_string(&subscribe)
            .map_err(|e| TransportError::Protocol(format!("Failed to encode subscribe: {e}")))?;
        ws_stream
            .send(Message::Text(frame))
            .await
            .map_err(|e| TransportError::Protocol(format!("Failed to subscribe: {e}")))?;

        info!(client_id = %client_id, topic, "Connected to push endpoint at {}", self.url);

        Ok(Box::new(TungsteniteConnection { ws_stream }))
    }
}

/// A live WebSocket connection delivering text frames.
struct TungsteniteConnection {
    ws_stream: WsStream,
}

#[async_trait]
impl PushConnection for TungsteniteConnection {
    async fn next_message(&mut self) -> Option<String> {
        while let Some(msg_result) = self.ws_stream.next().await {
            match msg_result {
                Ok(Message::Text(text)) => return Some(text),
                Ok(Message::Binary(_)) => {
                    debug!("Ignoring binary frame");
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Handled automatically by tungstenite.
                }
                Ok(Message::Close(frame)) => {
                    info!(?frame, "Push WebSocket closed");
                    return None;
                }
                Ok(Message::Frame(_)) => {}
                Err(e) => {
                    debug!(error = %e, "Push WebSocket receive error");
                    return None;
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_frame_encodes_action_and_topic() {
        let frame = SubscribeFrame {
            action: "subscribe",
            topic: "/topic/queue",
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["action"], "subscribe");
        assert_eq!(json["topic"], "/topic/queue");
    }
}
