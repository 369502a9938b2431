//! Configuration loading and resolution.

use crate::transport::stdio::DEFAULT_MAX_IN_FLIGHT;
use crate::types::{Implementation, SERVER_NAME, SERVER_VERSION};

/// Environment variable overriding the advertised server name.
pub const SERVER_NAME_ENV: &str = "TOOLHOST_SERVER_NAME";

/// Environment variable overriding the in-flight request bound.
pub const MAX_IN_FLIGHT_ENV: &str = "TOOLHOST_MAX_IN_FLIGHT";

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub server_info: Implementation,
    pub max_in_flight: usize,
}

impl ServerConfig {
    /// Resolve settings: explicit values win, then the environment, then defaults.
    pub fn resolve(name: Option<&str>, max_in_flight: Option<usize>) -> Self {
        Self {
            server_info: Implementation {
                name: resolve_server_name(name),
                version: SERVER_VERSION.to_string(),
            },
            max_in_flight: resolve_max_in_flight(max_in_flight),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_info: Implementation::default(),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

/// Resolve the name reported in `initialize`.
pub fn resolve_server_name(explicit: Option<&str>) -> String {
    if let Some(name) = explicit.filter(|n| !n.trim().is_empty()) {
        return name.to_string();
    }

    match std::env::var(SERVER_NAME_ENV) {
        Ok(name) if !name.trim().is_empty() => name,
        _ => SERVER_NAME.to_string(),
    }
}

/// Resolve how many requests may be dispatched concurrently.
pub fn resolve_max_in_flight(explicit: Option<usize>) -> usize {
    if let Some(n) = explicit.filter(|&n| n > 0) {
        return n;
    }

    match std::env::var(MAX_IN_FLIGHT_ENV) {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                tracing::warn!("Ignoring invalid {MAX_IN_FLIGHT_ENV}={raw:?}");
                DEFAULT_MAX_IN_FLIGHT
            }
        },
        Err(_) => DEFAULT_MAX_IN_FLIGHT,
    }
}
