//! Event fan-out: every published event goes to every connected dashboard.

use claw_common::{LogPayload, ServerEvent, TelemetrySample};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Events buffered per subscriber before it starts lagging.
pub const EVENT_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct EventHub {
    tx: broadcast::Sender<ServerEvent>,
}

impl EventHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.tx.subscribe()
    }

    /// Publish to all current subscribers. Events published while nobody
    /// listens are dropped.
    pub fn publish(&self, event: ServerEvent) {
        if self.tx.send(event).is_err() {
            debug!("No dashboard connected, event dropped");
        }
    }

    /// Publish a log line, structured when the line belongs to a known claw.
    pub fn publish_log(&self, device: Option<i64>, line: String) {
        let payload = match device {
            Some(id) => LogPayload::Structured { id, line },
            None => LogPayload::Text(line),
        };
        self.publish(ServerEvent::Log(payload));
    }

    pub fn publish_telemetry(&self, sample: TelemetrySample) {
        self.publish(ServerEvent::StatusUpdate(sample));
    }
}

/// Accept dashboard WebSocket connections until the listener fails.
pub async fn serve_websocket(listener: TcpListener, hub: EventHub) {
    while let Ok((stream, addr)) = listener.accept().await {
        info!("New WebSocket connection from {}", addr);
        tokio::spawn(handle_connection(stream, hub.subscribe()));
    }
}

async fn handle_connection(stream: TcpStream, mut events: broadcast::Receiver<ServerEvent>) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            error!("WebSocket handshake failed: {}", e);
            return;
        }
    };

    let client_id = Uuid::new_v4();
    info!("Dashboard {} connected", client_id);
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Forward published events to this dashboard
    let send_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let json = match serde_json::to_string(&event) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!("Failed to serialize {} event: {}", event.name(), e);
                            continue;
                        }
                    };
                    if ws_sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Dashboard {} lagged {} events", client_id, n);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Dashboards only listen; drain until the socket closes
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    info!("WebSocket connection closed for dashboard {}", client_id);
}
