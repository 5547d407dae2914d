//! Replies of the command endpoint.

use serde::{Deserialize, Serialize};

/// Body returned by `POST /exec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExecReply {
    /// Command accepted; `status` describes what happened.
    Status { cmd: String, status: String },
    /// Request rejected (bad credential, unknown command).
    Error { error: String },
}

impl ExecReply {
    pub fn status(cmd: &str, status: &str) -> Self {
        ExecReply::Status {
            cmd: cmd.to_string(),
            status: status.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        ExecReply::Error {
            error: message.to_string(),
        }
    }
}
