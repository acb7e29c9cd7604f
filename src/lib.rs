//! # Fathom MCP - Meeting Intelligence Tools for Language Models
//!
//! Exposes the Fathom external API as read-only MCP tools:
//! - Strict argument validation against declared field contracts
//! - Query construction that omits default-valued fields
//! - Markdown and JSON rendering from one structured projection
//! - A fixed character budget with single-pass truncation
//! - Newline-delimited JSON-RPC over stdio
//!
//! ## Architecture
//!
//! Every tool call flows one way through a stateless pipeline:
//! ```text
//!   tools/call ─► ToolCatalog ─► QueryParameters ─► ApiTransport ─► render ─► size guard ─► ToolResult
//!                 (validate)      (defaults out)     (one GET)       (md|json)  (halve/clip)   (isError)
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod api;
pub mod mcp;
pub mod render;
pub mod tools;
pub mod types;
pub mod validation;

// Internal utilities
pub mod observability;

pub use types::{Config, Error, Result};
