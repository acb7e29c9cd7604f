//! Tool result envelope — the single boundary where failures become text.

use crate::types::Error;
use serde_json::{json, Value};

/// Outcome of one tool invocation, in MCP `CallToolResult` form.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub text: String,
    pub structured_content: Option<Value>,
    pub is_error: bool,
}

impl ToolResult {
    /// Successful result. Empty text is replaced with a placeholder so a
    /// success never reaches the caller blank.
    pub fn success(text: String, structured_content: Option<Value>) -> Self {
        let text = if text.trim().is_empty() {
            "No results.".to_string()
        } else {
            text
        };
        Self {
            text,
            structured_content,
            is_error: false,
        }
    }

    /// Failed result carrying only a description.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            text: message.into(),
            structured_content: None,
            is_error: true,
        }
    }

    pub fn from_error(err: &Error) -> Self {
        Self::error(format!("Error: {err}"))
    }

    /// Wire shape: `{ content: [{type: "text", text}], structuredContent?, isError }`.
    pub fn to_value(&self) -> Value {
        let mut value = json!({
            "content": [{ "type": "text", "text": self.text }],
            "isError": self.is_error,
        });
        if let (Some(structured), Value::Object(map)) = (&self.structured_content, &mut value) {
            map.insert("structuredContent".to_string(), structured.clone());
        }
        value
    }
}
