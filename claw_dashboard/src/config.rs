//! Dashboard configuration derived from the page location.

use claw_common::{DEFAULT_AUTH_TOKEN, DEFAULT_WEBSOCKET_PORT, EXEC_PATH};

/// Which of the two dashboard layouts is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientVariant {
    /// Claw id and mode selectors; events are filtered by claw id
    #[default]
    MultiDevice,
    /// One claw, no selectors, nothing filtered
    SingleDevice,
}

impl ClientVariant {
    /// Read `variant=single` from a query string such as `?variant=single`.
    pub fn from_query(search: &str) -> Self {
        let single = search
            .trim_start_matches('?')
            .split('&')
            .any(|pair| pair == "variant=single");
        if single {
            ClientVariant::SingleDevice
        } else {
            ClientVariant::MultiDevice
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub exec_endpoint: String,
    pub auth_token: String,
    pub events_url: String,
    pub variant: ClientVariant,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            exec_endpoint: EXEC_PATH.to_string(),
            auth_token: DEFAULT_AUTH_TOKEN.to_string(),
            events_url: events_url("http:", "127.0.0.1"),
            variant: ClientVariant::default(),
        }
    }
}

impl DashboardConfig {
    /// Build the configuration from `window.location`.
    pub fn from_location() -> Self {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return Self::default();
        };
        let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
        let hostname = location.hostname().unwrap_or_else(|_| "127.0.0.1".to_string());
        let search = location.search().unwrap_or_default();

        Self {
            events_url: events_url(&protocol, &hostname),
            variant: ClientVariant::from_query(&search),
            ..Self::default()
        }
    }
}

/// WebSocket URL of the event stream for a page served over `protocol`.
pub fn events_url(protocol: &str, hostname: &str) -> String {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{}://{}:{}", scheme, hostname, DEFAULT_WEBSOCKET_PORT)
}
