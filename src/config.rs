//! Session client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_STATE_DIR: &str = ".sessiongate";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The backend base URL was set but empty.
    #[error("empty API base URL in {var}")]
    EmptyApiUrl { var: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Backend base URL without a trailing slash.
    pub api_url: String,
    /// Directory holding the persisted session file.
    pub state_dir: PathBuf,
    pub timeouts: Timeouts,
}

impl SessionConfig {
    /// Build a config for `api_url` with default state dir and timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is empty after trimming.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: normalize_api_url(api_url, "api_url")?,
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            timeouts: Timeouts::default(),
        })
    }

    /// Build typed session config from environment variables.
    ///
    /// Optional:
    /// - `SESSIONGATE_API_URL`: default `http://127.0.0.1:3000`
    /// - `SESSIONGATE_STATE_DIR`: default `.sessiongate`
    /// - `SESSIONGATE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SESSIONGATE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if `SESSIONGATE_API_URL` is set but empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("SESSIONGATE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = normalize_api_url(&raw_url, "SESSIONGATE_API_URL")?;
        let state_dir = std::env::var("SESSIONGATE_STATE_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_STATE_DIR), PathBuf::from);
        let timeouts = Timeouts {
            request_secs: env_parse_u64("SESSIONGATE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("SESSIONGATE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_url, state_dir, timeouts })
    }
}

fn normalize_api_url(raw: &str, var: &'static str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyApiUrl { var });
    }
    Ok(trimmed.to_string())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
