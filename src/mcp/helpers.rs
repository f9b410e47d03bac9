//! MCP Protocol Helpers
//!
//! This module contains helper functions for JSON-RPC communication
//! and tool result construction.

use serde_json::{json, Value};

/// JSON-RPC: invalid JSON was received
pub const PARSE_ERROR: i32 = -32700;
/// JSON-RPC: method does not exist
pub const METHOD_NOT_FOUND: i32 = -32601;
/// JSON-RPC: invalid method parameters
pub const INVALID_PARAMS: i32 = -32602;
/// JSON-RPC: internal error
pub const INTERNAL_ERROR: i32 = -32603;
/// Implementation-defined server error, used for unsupported HTTP methods
pub const SERVER_ERROR: i32 = -32000;

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` – The request identifier that must be echoed back.
/// * `result` – The payload representing the successful outcome.
///
/// # Returns
///
/// A `serde_json::Value` shaped as a JSON-RPC success envelope.
pub fn rpc_success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier (or `null` if unavailable).
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` – Human-readable description of the error.
///
/// # Returns
///
/// A `serde_json::Value` shaped as a JSON-RPC error envelope.
pub fn rpc_error(id: Value, code: i32, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}

/// Successful `tools/call` result: the text block carries pretty JSON, the
/// same value goes into `structuredContent`.
pub fn tool_success(structured: Value) -> Value {
    tool_success_with_text(&structured, structured.clone())
}

/// Successful `tools/call` result whose text block differs from
/// `structuredContent`, which must be an object.
pub fn tool_success_with_text(text: &Value, structured: Value) -> Value {
    let text = serde_json::to_string_pretty(text).unwrap_or_else(|_| text.to_string());
    json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": structured,
    })
}

/// Failed `tools/call` result. Still a JSON-RPC success; the failure is
/// flagged with `isError`.
pub fn tool_error(message: impl std::fmt::Display) -> Value {
    json!({
        "content": [{ "type": "text", "text": format!("Error: {}", message) }],
        "isError": true,
    })
}
