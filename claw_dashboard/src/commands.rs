//! Command dispatch: build `POST /exec` bodies, send them, and turn the reply
//! (or the failure) into log lines.

use claw_common::CommandRequest;
use gloo_net::http::Request;
use serde_json::Value;
use thiserror::Error;
use crate::selection::{ClawId, DeviceSelection};

/// Prefix of every line the dashboard writes itself.
pub const CLIENT_PREFIX: &str = "[client]";

/// Why a command produced no JSON reply.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("claw ID is not a number")]
    InvalidSelection,

    #[error("request failed: {0}")]
    Network(String),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("reply is not JSON: {0}")]
    Decode(String),
}

/// Which button issued the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    Run,
    Stop,
}

impl CommandAction {
    pub fn label(self) -> &'static str {
        match self {
            CommandAction::Run => "Run",
            CommandAction::Stop => "Stop",
        }
    }
}

/// Build the body for `action`.
///
/// Run requests carry `id` and `mode` when a concrete claw is selected and
/// none when the dashboard is single-device. A run with an unparseable claw
/// id is refused. Stop requests never carry device fields.
pub fn build_request(action: CommandAction, selection: &DeviceSelection) -> Result<CommandRequest, CommandError> {
    match (action, selection.id) {
        (CommandAction::Stop, _) => Ok(CommandRequest::stop()),
        (CommandAction::Run, ClawId::Device(id)) => Ok(CommandRequest::run_device(id, selection.mode.clone())),
        (CommandAction::Run, ClawId::Any) => Ok(CommandRequest::run()),
        (CommandAction::Run, ClawId::Invalid) => Err(CommandError::InvalidSelection),
    }
}

/// Lines reporting the outcome of `action`.
///
/// A reply with a truthy `cmd` yields two lines (command echo and status),
/// any other reply yields one line with the whole reply. Failures yield one
/// error-classified line.
pub fn report_lines(action: CommandAction, outcome: &Result<Value, CommandError>) -> Vec<String> {
    let label = action.label();
    match outcome {
        Ok(reply) => match reply.get("cmd").filter(|cmd| is_truthy(cmd)) {
            Some(cmd) => vec![
                format!("{} Cmd: {}", CLIENT_PREFIX, display_value(cmd)),
                format!("{} {}: {}", CLIENT_PREFIX, label, stringify(reply.get("status"))),
            ],
            None => vec![format!("{} {}: {}", CLIENT_PREFIX, label, stringify(Some(reply)))],
        },
        Err(e) => vec![format!("{} {} - ERROR - {}", CLIENT_PREFIX, label, e)],
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings print bare, everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Compact JSON of an optional value; a missing value prints `undefined`.
fn stringify(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), Value::to_string)
}

/// Sends a command body and returns the decoded JSON reply.
#[allow(async_fn_in_trait)]
pub trait CommandTransport {
    async fn exec(&self, request: &CommandRequest) -> Result<Value, CommandError>;
}

/// `fetch`-based transport used in the browser.
#[derive(Debug, Clone)]
pub struct HttpCommandTransport {
    endpoint: String,
    token: String,
}

impl HttpCommandTransport {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }
}

impl CommandTransport for HttpCommandTransport {
    async fn exec(&self, request: &CommandRequest) -> Result<Value, CommandError> {
        let response = Request::post(&self.endpoint)
            .header("Authorization", &format!("Bearer {}", self.token))
            .json(request)
            .map_err(|e| CommandError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| CommandError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CommandError::Status { status, body });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| CommandError::Decode(e.to_string()))
    }
}

/// Issues run/stop commands and reports the outcome as log lines.
#[derive(Debug, Clone)]
pub struct CommandDispatcher<T> {
    transport: T,
}

impl<T: CommandTransport> CommandDispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn run(&self, selection: &DeviceSelection) -> Vec<String> {
        self.dispatch(CommandAction::Run, selection).await
    }

    pub async fn stop(&self) -> Vec<String> {
        // stop ignores the selection entirely
        self.dispatch(CommandAction::Stop, &DeviceSelection::single_device()).await
    }

    async fn dispatch(&self, action: CommandAction, selection: &DeviceSelection) -> Vec<String> {
        let outcome = match build_request(action, selection) {
            Ok(request) => {
                log::debug!("Sending {} command: {:?}", action.label(), request);
                self.transport.exec(&request).await
            }
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            log::error!("{} command failed: {}", action.label(), e);
        }
        report_lines(action, &outcome)
    }
}
