//! Server configuration read from the environment.

use std::path::PathBuf;
use claw_common::{DEFAULT_AUTH_TOKEN, DEFAULT_WEBSOCKET_PORT};

/// Runtime configuration. Every field has a default; environment variables
/// override them.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// `CLAW_HTTP_PORT` - dashboard and `/exec`
    pub http_port: u16,
    /// `CLAW_WEBSOCKET_PORT` - realtime events
    pub websocket_port: u16,
    /// `CLAW_TELEMETRY_ENDPOINT` - ZeroMQ publisher of the claw program
    pub telemetry_endpoint: String,
    /// `CLAW_AUTH_TOKEN` - bearer token required by `/exec`
    pub auth_token: String,
    /// `CLAW_RUN_PROGRAM` - program started by `run-magiclaw`
    pub run_program: PathBuf,
    /// `CLAW_RUN_ARGS` - whitespace separated arguments for the program
    pub run_args: Vec<String>,
    /// `CLAW_STATIC_DIR` - built dashboard assets
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8000,
            websocket_port: DEFAULT_WEBSOCKET_PORT,
            telemetry_endpoint: "tcp://127.0.0.1:6300".to_string(),
            auth_token: DEFAULT_AUTH_TOKEN.to_string(),
            run_program: PathBuf::from("/home/pi/miniconda3/bin/run-magiclaw"),
            run_args: Vec::new(),
            static_dir: PathBuf::from("claw_dashboard/dist"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            http_port: lookup("CLAW_HTTP_PORT")
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(defaults.http_port),
            websocket_port: lookup("CLAW_WEBSOCKET_PORT")
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(defaults.websocket_port),
            telemetry_endpoint: lookup("CLAW_TELEMETRY_ENDPOINT").unwrap_or(defaults.telemetry_endpoint),
            auth_token: lookup("CLAW_AUTH_TOKEN").unwrap_or(defaults.auth_token),
            run_program: lookup("CLAW_RUN_PROGRAM").map(PathBuf::from).unwrap_or(defaults.run_program),
            run_args: lookup("CLAW_RUN_ARGS")
                .map(|args| args.split_whitespace().map(str::to_string).collect())
                .unwrap_or(defaults.run_args),
            static_dir: lookup("CLAW_STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.http_port, 8000);
        assert_eq!(config.websocket_port, 9000);
        assert_eq!(config.auth_token, "magiclaw");
        assert_eq!(config.telemetry_endpoint, "tcp://127.0.0.1:6300");
    }

    #[test]
    fn test_overrides_and_bad_ports() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CLAW_HTTP_PORT", "8080"),
            ("CLAW_WEBSOCKET_PORT", "not-a-port"),
            ("CLAW_RUN_ARGS", "--claw 2  --mode auto"),
            ("CLAW_AUTH_TOKEN", "secret"),
        ]);
        let config = ServerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.websocket_port, 9000);
        assert_eq!(config.run_args, vec!["--claw", "2", "--mode", "auto"]);
        assert_eq!(config.auth_token, "secret");
    }
}
