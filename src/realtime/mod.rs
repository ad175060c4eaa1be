//! Live change notifications for the front ends.
//!
//! Every committed write ends up here as a [`RealtimeMessage`] that is broadcast
//! to all connected sockets. Delivery is fan-out only: a client that falls
//! behind the channel capacity skips what it missed and keeps going.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::AppState;

/// Frame sent to socket clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RealtimeMessage {
    /// `<coleccion>:<accion>`, or `connected` for the greeting
    pub event: String,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl RealtimeMessage {
    pub fn new(event: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            payload,
            timestamp: Utc::now(),
        }
    }
}

/// Broadcast hub shared by the event loop and every socket session.
#[derive(Debug, Clone)]
pub struct RealtimeHub {
    sender: broadcast::Sender<RealtimeMessage>,
    clients: Arc<AtomicUsize>,
}

impl RealtimeHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            clients: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Publishes to every subscriber and returns how many received it.
    /// Publishing with nobody listening is not an error.
    pub fn publish(&self, message: RealtimeMessage) -> usize {
        self.sender.send(message).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeMessage> {
        self.sender.subscribe()
    }

    pub fn connected_clients(&self) -> usize {
        self.clients.load(Ordering::Relaxed)
    }

    fn track_client(&self) -> ClientGuard {
        self.clients.fetch_add(1, Ordering::Relaxed);
        ClientGuard {
            clients: Arc::clone(&self.clients),
        }
    }
}

/// Decrements the connected-client count when a session ends, however it ends.
struct ClientGuard {
    clients: Arc<AtomicUsize>,
}

impl Drop for ClientGuard {
    fn drop(&mut self) {
        self.clients.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Upgrades `GET /socket` to a WebSocket session
pub async fn socket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let hub = state.realtime.clone();
    ws.on_upgrade(move |socket| client_session(socket, hub))
}

async fn client_session(socket: WebSocket, hub: RealtimeHub) {
    let client_id = Uuid::new_v4();
    let _guard = hub.track_client();
    let mut updates = hub.subscribe();
    let (mut sink, mut stream) = socket.split();

    info!(%client_id, clients = hub.connected_clients(), "socket client connected");

    let greeting = RealtimeMessage::new("connected", json!({ "clientId": client_id }));
    if send_json(&mut sink, &greeting).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(message) => {
                    if send_json(&mut sink, &message).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(%client_id, skipped, "socket client lagging, messages skipped");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) if text.trim() == "ping" => {
                    if sink.send(Message::Text("pong".into())).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(%client_id, error = %e, "socket read failed");
                    break;
                }
            },
        }
    }

    info!(%client_id, "socket client disconnected");
}

async fn send_json<S>(sink: &mut S, message: &RealtimeMessage) -> Result<(), ()>
where
    S: SinkExt<Message> + Unpin,
{
    let text = serde_json::to_string(message).map_err(|_| ())?;
    sink.send(Message::Text(text)).await.map_err(|_| ())
}

/// Status of the realtime layer
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeStatus {
    pub connected_clients: usize,
}

#[utoipa::path(
    get,
    path = "/api/realtime/status",
    tag = "realtime",
    responses((status = 200, body = RealtimeStatus))
)]
pub async fn realtime_status(State(state): State<AppState>) -> Json<RealtimeStatus> {
    Json(RealtimeStatus {
        connected_clients: state.realtime.connected_clients(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_is_not_an_error() {
        let hub = RealtimeHub::new(4);
        assert_eq!(hub.publish(RealtimeMessage::new("x", json!({}))), 0);
    }

    #[tokio::test]
    async fn every_subscriber_receives_each_message() {
        let hub = RealtimeHub::new(4);
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        let delivered = hub.publish(RealtimeMessage::new("almacenes:created", json!({"id": 1})));
        assert_eq!(delivered, 2);
        assert_eq!(a.recv().await.unwrap().event, "almacenes:created");
        assert_eq!(b.recv().await.unwrap().payload["id"], 1);
    }

    #[tokio::test]
    async fn lagging_subscriber_skips_old_messages() {
        let hub = RealtimeHub::new(2);
        let mut slow = hub.subscribe();
        for i in 0..5 {
            hub.publish(RealtimeMessage::new("stock:updated", json!({ "n": i })));
        }

        assert!(matches!(slow.recv().await, Err(RecvError::Lagged(3))));
        assert_eq!(slow.recv().await.unwrap().payload["n"], 3);
    }

    #[test]
    fn client_guard_tracks_connections() {
        let hub = RealtimeHub::new(1);
        let first = hub.track_client();
        let second = hub.track_client();
        assert_eq!(hub.connected_clients(), 2);
        drop(first);
        assert_eq!(hub.connected_clients(), 1);
        drop(second);
        assert_eq!(hub.connected_clients(), 0);
    }
}
