//! Realtime event envelope for the dashboard WebSocket.

use serde::{Deserialize, Serialize};
use crate::TelemetrySample;

/// Event name carrying a [`TelemetrySample`].
pub const STATUS_UPDATE_EVENT: &str = "status_update";

/// Event name carrying a [`LogPayload`].
pub const LOG_EVENT: &str = "log";

/// Events pushed from the server to every connected dashboard.
///
/// On the wire each event is `{"event": <name>, "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "status_update")]
    StatusUpdate(TelemetrySample),

    #[serde(rename = "log")]
    Log(LogPayload),
}

impl ServerEvent {
    /// Wire name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::StatusUpdate(_) => STATUS_UPDATE_EVENT,
            ServerEvent::Log(_) => LOG_EVENT,
        }
    }
}

/// Payload of a `log` event.
///
/// Producers either send a structured `{id, line}` object or a bare string.
/// Bare strings may carry a `[id N] ` prefix; that prefix is interpreted by
/// the dashboard, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogPayload {
    Structured { id: i64, line: String },
    Text(String),
}

impl From<String> for LogPayload {
    fn from(line: String) -> Self {
        LogPayload::Text(line)
    }
}

impl From<&str> for LogPayload {
    fn from(line: &str) -> Self {
        LogPayload::Text(line.to_string())
    }
}
