//! MCP Protocol Helpers
//!
//! This module contains helper functions for JSON-RPC communication and
//! tool result construction.

use crate::cart::CartView;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{StoreError, StoreResult};

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` – The request identifier that must be echoed back.
/// * `result` – The payload representing the successful outcome.
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

/// Deserializes tool arguments, treating a missing `arguments` object as `{}`.
pub fn parse_args<T: DeserializeOwned>(args: Value) -> StoreResult<T> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| StoreError::InvalidArguments(e.to_string()))
}

/// Wraps a cart snapshot as a tool result with a one-line text summary.
pub fn cart_tool_result(text: impl Into<String>, view: &CartView) -> Value {
    json!({
        "content": [{ "type": "text", "text": text.into() }],
        "structuredContent": view,
    })
}
