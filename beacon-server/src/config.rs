//! Server configuration.
//!
//! Loaded from environment variables; every value has a default so an empty
//! environment yields a working local server.

use axum::http::HeaderValue;
use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default WebSocket route.
pub const DEFAULT_SIGNAL_PATH: &str = "/signal";

/// Origin value that allows every origin.
pub const ANY_ORIGIN: &str = "*";

pub const BIND_ADDRESS_VAR: &str = "BEACON_BIND_ADDRESS";
pub const SIGNAL_PATH_VAR: &str = "BEACON_SIGNAL_PATH";
pub const ALLOWED_ORIGINS_VAR: &str = "BEACON_ALLOWED_ORIGINS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket the HTTP/WebSocket listener binds to.
    pub bind_address: SocketAddr,

    /// Route upgraded to the signaling WebSocket (default: "/signal").
    pub signal_path: String,

    /// CORS origins; `["*"]` allows any.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            signal_path: DEFAULT_SIGNAL_PATH.to_string(),
            allowed_origins: vec![ANY_ORIGIN.to_string()],
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get(BIND_ADDRESS_VAR)
            .map(String::as_str)
            .unwrap_or(DEFAULT_BIND_ADDRESS);
        let bind_address = parse_bind_address(bind_address)?;

        let signal_path = vars
            .get(SIGNAL_PATH_VAR)
            .cloned()
            .unwrap_or_else(|| DEFAULT_SIGNAL_PATH.to_string());

        let allowed_origins = vars
            .get(ALLOWED_ORIGINS_VAR)
            .map(|origins| parse_origins(origins))
            .unwrap_or_else(|| vec![ANY_ORIGIN.to_string()]);

        let config = Self {
            bind_address,
            signal_path,
            allowed_origins,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks values that may have been overridden after loading.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.signal_path.starts_with('/') || self.signal_path.len() < 2 {
            return Err(invalid(
                SIGNAL_PATH_VAR,
                format!("'{}' must be an absolute path", self.signal_path),
            ));
        }

        if self.signal_path.starts_with("/api/") || self.signal_path == "/health" {
            return Err(invalid(
                SIGNAL_PATH_VAR,
                format!("'{}' collides with a built-in route", self.signal_path),
            ));
        }

        if self.allowed_origins.is_empty() {
            return Err(invalid(ALLOWED_ORIGINS_VAR, "no origins given".to_string()));
        }

        for origin in &self.allowed_origins {
            if origin != ANY_ORIGIN && HeaderValue::from_str(origin).is_err() {
                return Err(invalid(
                    ALLOWED_ORIGINS_VAR,
                    format!("'{}' is not a valid origin", origin),
                ));
            }
        }

        Ok(())
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == ANY_ORIGIN)
    }
}

pub fn parse_bind_address(value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e| invalid(BIND_ADDRESS_VAR, format!("'{}': {}", value, e)))
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn invalid(name: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        reason,
    }
}
