//! Environment configuration for the admin system.
//!
//! Values come from the process environment, after loading a `.env` file if one exists.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_CREDENTIALS_PATH: &str = ".inventory/session.json";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Runtime configuration of the admin system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Base URL of the REST API (`INVENTORY_API_URL`)
    pub api_url: String,
    /// JSON file holding the session token (`INVENTORY_CREDENTIALS`)
    pub credentials_path: PathBuf,
    /// Key of the token inside that file (`INVENTORY_TOKEN_KEY`)
    pub token_key: String,
    /// How long notifications stay visible (`INVENTORY_NOTIFY_MS`)
    pub notify_duration: Duration,
    /// Per-request timeout; `None` when `INVENTORY_HTTP_TIMEOUT_SECS` is 0
    pub http_timeout: Option<Duration>,
    /// Request channel capacity of each slice (`INVENTORY_CHANNEL_SIZE`)
    pub channel_size: usize,
    /// Log filter used when `RUST_LOG` is unset (`INVENTORY_LOG`)
    pub log_filter: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            token_key: slice_framework::DEFAULT_TOKEN_KEY.to_string(),
            notify_duration: slice_framework::notify::DEFAULT_DURATION,
            http_timeout: Some(slice_framework::http::DEFAULT_TIMEOUT),
            channel_size: 32,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AdminConfig {
    /// Loads `.env` (if present), then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Unset variables keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = text(&lookup, "INVENTORY_API_URL")?.unwrap_or(defaults.api_url);
        let credentials_path = text(&lookup, "INVENTORY_CREDENTIALS")?
            .map(PathBuf::from)
            .unwrap_or(defaults.credentials_path);
        let token_key = text(&lookup, "INVENTORY_TOKEN_KEY")?.unwrap_or(defaults.token_key);
        let notify_duration = number::<u64>(&lookup, "INVENTORY_NOTIFY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.notify_duration);
        let http_timeout = match number::<u64>(&lookup, "INVENTORY_HTTP_TIMEOUT_SECS")? {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.http_timeout,
        };
        let channel_size = match number::<usize>(&lookup, "INVENTORY_CHANNEL_SIZE")? {
            // tokio rejects zero-capacity channels
            Some(0) => {
                return Err(ConfigError::InvalidNumber {
                    var: "INVENTORY_CHANNEL_SIZE",
                    value: "0".into(),
                })
            }
            Some(size) => size,
            None => defaults.channel_size,
        };
        let log_filter = text(&lookup, "INVENTORY_LOG")?.unwrap_or(defaults.log_filter);

        Ok(Self {
            api_url,
            credentials_path,
            token_key,
            notify_duration,
            http_timeout,
            channel_size,
            log_filter,
        })
    }
}

fn text(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<String>, ConfigError> {
    match lookup(var) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

fn number<N: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<N>, ConfigError> {
    text(lookup, var)?
        .map(|value| {
            value
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { var, value })
        })
        .transpose()
}
