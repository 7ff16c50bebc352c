//! Gateway configuration, loaded from environment variables with defaults.

use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

/// Default HTTP/WebSocket bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default capacity of the room-notice broadcast buffer.
pub const DEFAULT_NOTICE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP routes and `/ws` listen on (`ROOMCAST_BIND_ADDRESS`).
    pub bind_address: SocketAddr,

    /// How far a `/rooms_sse` subscriber may fall behind before skipping notices
    /// (`ROOMCAST_NOTICE_CAPACITY`).
    pub notice_capacity: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("ROOMCAST_BIND_ADDRESS")
            .map(String::as_str)
            .unwrap_or(DEFAULT_BIND_ADDRESS)
            .parse()
            .map_err(|e| ConfigError::InvalidValue(format!("ROOMCAST_BIND_ADDRESS: {e}")))?;

        let notice_capacity = match vars.get("ROOMCAST_NOTICE_CAPACITY") {
            Some(raw) => raw.parse::<usize>().map_err(|e| {
                ConfigError::InvalidValue(format!("ROOMCAST_NOTICE_CAPACITY: {e}"))
            })?,
            None => DEFAULT_NOTICE_CAPACITY,
        };
        if notice_capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "ROOMCAST_NOTICE_CAPACITY must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            bind_address,
            notice_capacity,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            notice_capacity: DEFAULT_NOTICE_CAPACITY,
        }
    }
}
