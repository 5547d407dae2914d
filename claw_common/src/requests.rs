//! Command request body for `POST /exec`.

use serde::{Deserialize, Serialize};

/// Starts the claw program.
pub const RUN_COMMAND: &str = "run-magiclaw";

/// Stops the claw program.
pub const STOP_COMMAND: &str = "stop-magiclaw";

/// Body of a `POST /exec` request.
///
/// `cmd` stays a plain string so the server can answer unknown commands
/// itself instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub cmd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl CommandRequest {
    /// Run request addressed to one claw.
    pub fn run_device(id: i64, mode: impl Into<String>) -> Self {
        Self {
            cmd: RUN_COMMAND.to_string(),
            id: Some(id),
            mode: Some(mode.into()),
        }
    }

    /// Run request without device addressing (single-claw controllers).
    pub fn run() -> Self {
        Self {
            cmd: RUN_COMMAND.to_string(),
            id: None,
            mode: None,
        }
    }

    pub fn stop() -> Self {
        Self {
            cmd: STOP_COMMAND.to_string(),
            id: None,
            mode: None,
        }
    }
}
