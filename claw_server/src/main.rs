// MagiClaw dashboard server: serves the dashboard, runs the claw program on
// command and streams its output and telemetry to every open dashboard.
// Run with: cargo run -p claw_server

mod config;
mod exec;
mod hub;
mod magiclaw_msg;
mod process;
mod telemetry;

use std::sync::Arc;

use config::ServerConfig;
use exec::AppState;
use hub::{EventHub, EVENT_CAPACITY};
use process::ClawSupervisor;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    info!("Claw program: {}", config.run_program.display());
    info!("Telemetry source: {}", config.telemetry_endpoint);

    let hub = EventHub::new(EVENT_CAPACITY);
    let supervisor = ClawSupervisor::new(
        config.run_program.clone(),
        config.run_args.clone(),
        config.telemetry_endpoint.clone(),
        hub.clone(),
    );

    let ws_addr = format!("0.0.0.0:{}", config.websocket_port);
    let ws_listener = match TcpListener::bind(&ws_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("✗ Failed to bind event stream on {}: {}", ws_addr, e);
            return;
        }
    };
    info!("✓ Event stream listening on ws://{}", ws_addr);
    tokio::spawn(hub::serve_websocket(ws_listener, hub));

    let state = AppState {
        supervisor: Arc::new(Mutex::new(supervisor)),
        auth_token: Arc::from(config.auth_token.as_str()),
    };
    let app = exec::router(state, &config.static_dir);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = match TcpListener::bind(&http_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("✗ Failed to bind dashboard on {}: {}", http_addr, e);
            return;
        }
    };
    info!("✓ Dashboard served on http://{} from {}", http_addr, config.static_dir.display());

    if let Err(e) = axum::serve(listener, app).await {
        error!("HTTP server error: {}", e);
    }
}
