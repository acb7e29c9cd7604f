//! MCP transport layer.
//!
//! Newline-delimited JSON-RPC 2.0 over stdio: `initialize`, `ping`,
//! `tools/list`, `tools/call` and client notifications.

pub mod codec;
pub mod router;
pub mod server;

pub use router::{handle_message, PROTOCOL_VERSION, SUPPORTED_PROTOCOL_VERSIONS};
pub use server::McpServer;
