//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context. Every variant is eventually flattened to
//! text by the tool result envelope; none of them cross the MCP boundary as a
//! structured exception.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the Fathom MCP server.
#[derive(Error, Debug)]
pub enum Error {
    /// Tool arguments violate the declared field contract. Carries every
    /// violation, not just the first.
    #[error("Invalid arguments for {tool}:\n{}", bullet_list(.errors))]
    Validation { tool: String, errors: Vec<String> },

    /// Unknown tool or resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// Non-2xx response from the Fathom API.
    #[error("Fathom API error: {status} {method} ({endpoint}){}", detail_suffix(.detail))]
    Transport {
        status: u16,
        method: String,
        endpoint: String,
        detail: Option<String>,
    },

    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("Fathom API request failed: {method} ({endpoint}): {source}")]
    Request {
        method: String,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Payload could not be projected into the expected shape.
    #[error("render error: {0}")]
    Render(String),

    /// Startup configuration problems (missing credential, bad env value).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal errors.
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn bullet_list(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("- {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.trim().is_empty() => format!(": {}", d.trim()),
        _ => String::new(),
    }
}

impl Error {
    /// JSON-RPC error code for failures surfaced at the protocol layer.
    ///
    /// Tool-level failures never use this; they travel inside an `isError`
    /// tool result instead.
    pub fn rpc_code(&self) -> i64 {
        match self {
            Error::Validation { .. } => -32602,
            Error::NotFound(_) => -32601,
            Error::Serialization(_) => -32700,
            _ => -32603,
        }
    }

    /// Whether this failure originated on the far side of the HTTP call.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Request { .. })
    }
}

// Convenience constructors
impl Error {
    pub fn validation(tool: impl Into<String>, errors: Vec<String>) -> Self {
        Self::Validation {
            tool: tool.into(),
            errors,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
