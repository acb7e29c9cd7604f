//! JSON-RPC router — parses one message, routes by method, builds the reply.

use crate::tools::ToolExecutor;
use crate::types::{Error, ServerConfig};
use serde_json::{json, Map, Value};

/// Protocol revision this server speaks by default.
pub const PROTOCOL_VERSION: &str = "2025-06-18";

/// Revisions echoed back when a client requests them.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, message)
    }

    fn to_value(&self) -> Value {
        json!({ "code": self.code, "message": self.message })
    }
}

impl From<&Error> for RpcError {
    fn from(err: &Error) -> Self {
        let message = match err {
            Error::NotFound(msg) => msg.clone(),
            other => other.to_string(),
        };
        Self::new(err.rpc_code(), message)
    }
}

pub fn success_response(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

pub fn error_response(id: Value, error: &RpcError) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": error.to_value() })
}

/// Handle one raw inbound line. `None` means no reply is due (notifications,
/// stray responses).
pub async fn handle_message(
    executor: &ToolExecutor,
    server: &ServerConfig,
    raw: &str,
) -> Option<Value> {
    let message: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            let err = Error::from(e);
            tracing::warn!(error = %err, "Unparsable message");
            return Some(error_response(Value::Null, &RpcError::from(&err)));
        }
    };

    let request = match message {
        Value::Object(map) => map,
        Value::Array(_) => {
            return Some(error_response(
                Value::Null,
                &RpcError::invalid_request("Batch requests are not supported"),
            ))
        }
        _ => {
            return Some(error_response(
                Value::Null,
                &RpcError::invalid_request("Request must be a JSON object"),
            ))
        }
    };

    let id = request.get("id").cloned();
    let method = request.get("method").and_then(Value::as_str);

    let Some(method) = method else {
        if id.is_some() && (request.contains_key("result") || request.contains_key("error")) {
            tracing::debug!("Ignoring client response");
            return None;
        }
        return Some(error_response(
            id.unwrap_or(Value::Null),
            &RpcError::invalid_request("Missing method"),
        ));
    };

    if request.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
        return id.map(|id| error_response(id, &RpcError::invalid_request("jsonrpc must be \"2.0\"")));
    }

    let params = request.get("params").cloned().unwrap_or(Value::Null);

    let Some(id) = id else {
        handle_notification(method);
        return None;
    };

    let outcome = match method {
        "initialize" => Ok(initialize(server, &params)),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": executor.list_tools() })),
        "tools/call" => call_tool(executor, params).await,
        other => Err(RpcError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {other}"),
        )),
    };

    Some(match outcome {
        Ok(result) => success_response(id, result),
        Err(error) => error_response(id, &error),
    })
}

fn handle_notification(method: &str) {
    match method {
        "notifications/initialized" => tracing::info!("Client initialized"),
        "notifications/cancelled" => tracing::debug!("Client cancelled a request"),
        other => tracing::debug!(method = other, "Ignoring notification"),
    }
}

fn initialize(server: &ServerConfig, params: &Value) -> Value {
    let requested = params.get("protocolVersion").and_then(Value::as_str);
    let version = requested
        .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
        .unwrap_or(PROTOCOL_VERSION);
    let client = params
        .pointer("/clientInfo/name")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    tracing::info!(client, protocol_version = version, "Initialize");

    json!({
        "protocolVersion": version,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": {
            "name": server.name,
            "title": "Fathom",
            "version": server.version,
        },
        "instructions": "Read-only access to Fathom meeting recordings, summaries, transcripts \
            and teams. List tools are paginated: pass next_cursor back as cursor.",
    })
}

async fn call_tool(executor: &ToolExecutor, params: Value) -> Result<Value, RpcError> {
    let mut params = match params {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        _ => {
            return Err(RpcError::from(&Error::validation(
                "tools/call",
                vec!["params must be an object".to_string()],
            )))
        }
    };

    let Some(Value::String(name)) = params.remove("name") else {
        return Err(RpcError::from(&Error::validation(
            "tools/call",
            vec!["Missing tool name".to_string()],
        )));
    };
    let arguments = params.remove("arguments").unwrap_or(Value::Null);

    Ok(executor.call(&name, arguments).await.to_value())
}
