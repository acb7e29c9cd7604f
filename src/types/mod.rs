//! Core types for the Fathom MCP server.
//!
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration read once at startup

mod config;
mod errors;

pub use config::{
    ApiConfig, Config, ObservabilityConfig, OutputConfig, ServerConfig, API_KEY_ENV,
    CHARACTER_LIMIT, DEFAULT_API_BASE_URL, TRUNCATION_MARGIN,
};
pub use errors::{Error, Result};
