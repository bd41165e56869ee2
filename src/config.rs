//! Client configuration.
//!
//! Values come from the environment (optionally a `.env` file loaded by the binary):
//!
//! - `HERO_API_BASE_URL` - base URL of a real backend (default `http://localhost:8080`)
//! - `HERO_API_PATH` - collection path (default `api/heroes`)
//! - `HERO_API_TIMEOUT_SECS` - per-request timeout (default `10`)

use crate::clients::HEROES_URL;
use std::time::Duration;
use thiserror::Error;

pub const BASE_URL_VAR: &str = "HERO_API_BASE_URL";
pub const PATH_VAR: &str = "HERO_API_PATH";
pub const TIMEOUT_VAR: &str = "HERO_API_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while building a client from configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid timeout {value:?}: expected whole seconds")]
    InvalidTimeout { value: String },

    #[error("HTTP client error: {0}")]
    Client(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub heroes_path: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            heroes_path: HEROES_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Reads the process environment, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let timeout = match lookup(TIMEOUT_VAR) {
            Some(value) => value
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout { value })?,
            None => defaults.timeout,
        };
        Ok(Self {
            base_url: lookup(BASE_URL_VAR).unwrap_or(defaults.base_url),
            heroes_path: lookup(PATH_VAR).unwrap_or(defaults.heroes_path),
            timeout,
        })
    }
}
