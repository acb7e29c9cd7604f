//! Configuration structures.
//!
//! Configuration is read once at process start (environment variables, with
//! `.env` support in the binary) and passed into the executor. Nothing mutates
//! it afterwards.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::{Error, Result};

/// Default Fathom external API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.fathom.ai/external/v1";

/// Maximum length (in characters) of a tool result's text.
pub const CHARACTER_LIMIT: usize = 25_000;

/// Headroom kept below the budget when clipping markdown.
pub const TRUNCATION_MARGIN: usize = 100;

/// Name of the env var holding the Fathom API key.
pub const API_KEY_ENV: &str = "FATHOM_API_KEY";

/// Global server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Fathom API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Output budget and display settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// MCP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Fathom API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root; endpoints are appended verbatim.
    pub base_url: String,

    /// Per-request timeout.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// API key sent as `X-Api-Key`. Never serialized.
    #[serde(skip)]
    pub api_key: Option<SecretString>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            api_key: None,
        }
    }
}

/// Output budget and display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Character budget shared by all tools.
    pub character_limit: usize,

    /// Characters kept free below the budget when markdown is clipped.
    pub truncation_margin: usize,

    /// Fixed UTC offset (minutes) for rendered dates. `None` uses the host's
    /// local timezone.
    pub display_utc_offset_minutes: Option<i32>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            character_limit: CHARACTER_LIMIT,
            truncation_margin: TRUNCATION_MARGIN,
            display_utc_offset_minutes: None,
        }
    }
}

/// MCP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server name reported in `initialize`.
    pub name: String,

    /// Server version reported in `initialize`.
    pub version: String,

    /// Maximum accepted size of a single JSON-RPC line in bytes.
    pub max_message_bytes: usize,

    /// Maximum tool calls executing at once. Further calls wait for a slot.
    pub max_concurrent_calls: usize,

    /// Bounded channel capacity between request tasks and the stdout writer.
    pub response_channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "fathom-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            max_message_bytes: 4 * 1024 * 1024,
            max_concurrent_calls: 16,
            response_channel_capacity: 64,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Build configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        config.api.api_key = get(API_KEY_ENV).map(SecretString::from);

        if let Some(base_url) = get("FATHOM_API_BASE_URL") {
            config.api.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(secs) = get("FATHOM_REQUEST_TIMEOUT_SECS") {
            let secs = parse_number::<u64>("FATHOM_REQUEST_TIMEOUT_SECS", &secs)?;
            config.api.request_timeout = Duration::from_secs(secs);
        }

        if let Some(limit) = get("FATHOM_CHARACTER_LIMIT") {
            let limit = parse_number::<usize>("FATHOM_CHARACTER_LIMIT", &limit)?;
            if limit <= config.output.truncation_margin {
                return Err(Error::config(format!(
                    "FATHOM_CHARACTER_LIMIT must exceed the truncation margin ({})",
                    config.output.truncation_margin
                )));
            }
            config.output.character_limit = limit;
        }

        if let Some(offset) = get("FATHOM_DISPLAY_UTC_OFFSET_MINUTES") {
            let offset = parse_number::<i32>("FATHOM_DISPLAY_UTC_OFFSET_MINUTES", &offset)?;
            if offset.abs() >= 24 * 60 {
                return Err(Error::config(
                    "FATHOM_DISPLAY_UTC_OFFSET_MINUTES must be within ±1439",
                ));
            }
            config.output.display_utc_offset_minutes = Some(offset);
        }

        if let Some(format) = get("FATHOM_LOG_FORMAT") {
            config.observability.json_logs = format.eq_ignore_ascii_case("json");
        }

        Ok(config)
    }

    /// The API key, or a configuration error naming the missing variable.
    pub fn require_api_key(&self) -> Result<&SecretString> {
        self.api
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
            .ok_or_else(|| Error::config(format!("Missing {API_KEY_ENV}")))
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| Error::config(format!("{key} is not a valid number ({raw}): {e}")))
}
