//! `POST /exec`: bearer-authenticated run/stop commands.

use std::path::Path;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use claw_common::{CommandRequest, ExecReply, EXEC_PATH, RUN_COMMAND, STOP_COMMAND};
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};
use crate::process::{ClawSupervisor, StartOutcome, StopOutcome};

#[derive(Clone)]
pub struct AppState {
    pub supervisor: Arc<Mutex<ClawSupervisor>>,
    pub auth_token: Arc<str>,
}

/// `/exec` plus the dashboard assets for every other path.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route(EXEC_PATH, post(exec_command))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Accepts exactly `Authorization: Bearer <token>`.
pub fn is_authorized(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|presented| presented == token)
}

async fn exec_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<ExecReply>) {
    // Authenticate before looking at the body
    if !is_authorized(&headers, &state.auth_token) {
        warn!("Rejected /exec request without a valid token");
        return (StatusCode::UNAUTHORIZED, Json(ExecReply::error("Unauthorized")));
    }

    let request: CommandRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected malformed /exec body: {}", e);
            return (StatusCode::BAD_REQUEST, Json(ExecReply::error("Invalid request")));
        }
    };

    let mut supervisor = state.supervisor.lock().await;
    let (status, reply) = handle_command(&mut supervisor, &request);
    (status, Json(reply))
}

/// Apply one authenticated command to the supervisor.
pub fn handle_command(supervisor: &mut ClawSupervisor, request: &CommandRequest) -> (StatusCode, ExecReply) {
    let cmd = request.cmd.as_str();
    match cmd {
        RUN_COMMAND => {
            info!("Run requested for claw {:?} in mode {:?}", request.id, request.mode);
            match supervisor.start(request.id) {
                Ok(StartOutcome::Started) => (StatusCode::OK, ExecReply::status(cmd, "started")),
                Ok(StartOutcome::AlreadyRunning) => (StatusCode::OK, ExecReply::status(cmd, "already running")),
                Err(e) => {
                    error!("Run failed: {}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, ExecReply::error(&e.to_string()))
                }
            }
        }
        STOP_COMMAND => match supervisor.stop() {
            Ok(StopOutcome::Stopped) => (StatusCode::OK, ExecReply::status(cmd, "stopped")),
            Ok(StopOutcome::NotRunning) => (StatusCode::OK, ExecReply::status(cmd, "not running")),
            Err(e) => {
                error!("Stop failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, ExecReply::error(&e.to_string()))
            }
        },
        other => {
            warn!("Unknown command {:?}", other);
            (StatusCode::BAD_REQUEST, ExecReply::error("Unknown cmd"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use axum::http::HeaderValue;
    use crate::hub::EventHub;

    fn state(program: &str, args: &[&str]) -> AppState {
        let supervisor = ClawSupervisor::new(
            PathBuf::from(program),
            args.iter().map(|a| a.to_string()).collect(),
            "tcp://127.0.0.1:1".to_string(),
            EventHub::new(8),
        );
        AppState {
            supervisor: Arc::new(Mutex::new(supervisor)),
            auth_token: Arc::from("magiclaw"),
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token)).unwrap());
        headers
    }

    #[test]
    fn test_authorization_header_shapes() {
        assert!(is_authorized(&bearer("magiclaw"), "magiclaw"));
        assert!(!is_authorized(&bearer("wrong"), "magiclaw"));
        assert!(!is_authorized(&HeaderMap::new(), "magiclaw"));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("magiclaw"));
        assert!(!is_authorized(&headers, "magiclaw"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic magiclaw"));
        assert!(!is_authorized(&headers, "magiclaw"));
    }

    #[tokio::test]
    async fn test_unauthorized_is_checked_before_body() {
        let (status, Json(reply)) =
            exec_command(State(state("sh", &[])), HeaderMap::new(), Bytes::from_static(b"not json")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(reply, ExecReply::error("Unauthorized"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, Json(reply)) =
            exec_command(State(state("sh", &[])), bearer("magiclaw"), Bytes::from_static(b"{\"id\":1}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(reply, ExecReply::error("Invalid request"));
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let body = Bytes::from_static(b"{\"cmd\":\"reboot\"}");
        let (status, Json(reply)) = exec_command(State(state("sh", &[])), bearer("magiclaw"), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(reply, ExecReply::error("Unknown cmd"));
    }

    #[tokio::test]
    async fn test_stop_when_idle() {
        let body = Bytes::from_static(b"{\"cmd\":\"stop-magiclaw\"}");
        let (status, Json(reply)) = exec_command(State(state("sh", &[])), bearer("magiclaw"), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply, ExecReply::status("stop-magiclaw", "not running"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_then_stop() {
        let state = state("sh", &["-c", "sleep 30"]);
        let run = || Bytes::from_static(b"{\"cmd\":\"run-magiclaw\",\"id\":1,\"mode\":\"teleop\"}");

        let (_, Json(reply)) = exec_command(State(state.clone()), bearer("magiclaw"), run()).await;
        assert_eq!(reply, ExecReply::status("run-magiclaw", "started"));
        let (_, Json(reply)) = exec_command(State(state.clone()), bearer("magiclaw"), run()).await;
        assert_eq!(reply, ExecReply::status("run-magiclaw", "already running"));

        let stop = Bytes::from_static(b"{\"cmd\":\"stop-magiclaw\"}");
        let (status, Json(reply)) = exec_command(State(state), bearer("magiclaw"), stop).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply, ExecReply::status("stop-magiclaw", "stopped"));
    }

    #[tokio::test]
    async fn test_spawn_failure_is_server_error() {
        let mut supervisor = ClawSupervisor::new(
            PathBuf::from("/nonexistent/run-magiclaw"),
            Vec::new(),
            "tcp://127.0.0.1:1".to_string(),
            EventHub::new(4),
        );
        let (status, reply) = handle_command(&mut supervisor, &CommandRequest::run());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(reply, ExecReply::Error { .. }));
    }
}
