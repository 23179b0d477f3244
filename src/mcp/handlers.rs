//! MCP (Model Context Protocol) route handlers
//!
//! This module implements the Model Context Protocol handlers for the
//! storefront. It exports `handle_tool_call` publicly to make it accessible
//! for tests.

use super::{helpers::*, models::*};
use crate::cart::{helpers::get_or_create_cart_id, models::LineKey, state::*};
use crate::catalog::filter_providers;
use crate::error::{StoreError, StoreResult};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_mcp).get(handle_mcp_sse))
        .route("/mcp", post(handle_mcp).get(handle_mcp_sse)) // Standard endpoint
        .route("/mcp/", post(handle_mcp).get(handle_mcp_sse)) // Trailing slash safety
}

/// Handle SSE (Server-Sent Events) handshake for GET requests
async fn handle_mcp_sse() -> impl IntoResponse {
    (
        [("content-type", "text/event-stream")],
        "event: endpoint\ndata: /mcp\n\n",
    )
}

/// Endpoint: POST /mcp
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            tracing::warn!(error = %e.body_text(), "JSON-RPC parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, -32700, "Parse error")),
            )
                .into_response();
        }
    };

    let id = req.id.unwrap_or(Value::Null);
    let method_name = req.method.as_str();
    let params = req.params.unwrap_or(Value::Null);

    tracing::debug!(method = method_name, ?id, "MCP call");

    let response_body = match method_name {
        "initialize" => rpc_success(id, handle_initialize()),
        "notifications/initialized" => rpc_success(id, json!({})),
        "tools/list" => rpc_success(id, handle_tools_list()),
        "tools/call" => {
            let tool_name = params.get("name").and_then(|n| n.as_str()).unwrap_or("");
            let args = params.get("arguments").cloned().unwrap_or(Value::Null);

            match handle_tool_call(&state, tool_name, args) {
                Ok(result) => rpc_success(id, result),
                Err(e) => {
                    tracing::warn!(tool = tool_name, error = %e, "tool call failed");
                    rpc_error(id, -32602, e.to_string())
                }
            }
        }
        "ping" => rpc_success(id, json!({})),
        _ => {
            tracing::warn!(method = method_name, "unknown MCP method");
            rpc_error(id, -32601, "Method not found")
        }
    };

    Json(response_body).into_response()
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": true }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

fn cart_id_schema() -> Value {
    json!({ "type": "string", "description": "Cart to operate on; a new one is created when omitted" })
}

/// Handles `tools/list` request.
fn handle_tools_list() -> Value {
    json!({
        "tools": [
            {
                "name": LIST_PROVIDERS_TOOL,
                "title": "List laundry providers",
                "description": "Lists providers and their menus, optionally filtered by search text and category tab.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string" },
                        "tab": { "type": "string", "enum": crate::catalog::TABS }
                    },
                    "additionalProperties": false
                }
            },
            {
                "name": ADD_TO_CART_TOOL,
                "title": "Add item to cart",
                "description": "Adds a provider's menu item to the cart, merging with an existing line for the same item.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "providerId": { "type": "string" },
                        "menuItemId": { "type": "string" },
                        "quantity": { "type": "integer", "default": 1, "minimum": 1, "maximum": MAX_ADD_QUANTITY },
                        "cartId": cart_id_schema()
                    },
                    "required": ["providerId", "menuItemId"],
                    "additionalProperties": false
                }
            },
            {
                "name": ADJUST_QUANTITY_TOOL,
                "title": "Adjust quantity",
                "description": "Changes a cart line's quantity by delta. Lines that reach zero are removed.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "providerId": { "type": "string" },
                        "menuItemId": { "type": "string" },
                        "delta": { "type": "integer" },
                        "cartId": cart_id_schema()
                    },
                    "required": ["providerId", "menuItemId", "delta"],
                    "additionalProperties": false
                }
            },
            {
                "name": CLEAR_CART_TOOL,
                "title": "Clear cart",
                "description": "Removes every line from the cart.",
                "inputSchema": {
                    "type": "object",
                    "properties": { "cartId": cart_id_schema() },
                    "additionalProperties": false
                }
            },
            {
                "name": CHECKOUT_TOOL,
                "title": "Checkout",
                "description": "Builds the order message and the chat link to send it. Empty carts produce no link.",
                "inputSchema": {
                    "type": "object",
                    "properties": { "cartId": cart_id_schema() },
                    "additionalProperties": false
                }
            }
        ]
    })
}

/// Handles `tools/call` request (Business Logic).
pub fn handle_tool_call(state: &AppState, name: &str, args: Value) -> StoreResult<Value> {
    match name {
        LIST_PROVIDERS_TOOL => handle_list_providers_tool(state, args),
        ADD_TO_CART_TOOL => handle_add_to_cart_tool(state, args),
        ADJUST_QUANTITY_TOOL => handle_adjust_quantity_tool(state, args),
        CLEAR_CART_TOOL => handle_clear_cart_tool(state, args),
        CHECKOUT_TOOL => handle_checkout_tool(state, args),
        _ => Err(StoreError::UnknownTool(name.to_string())),
    }
}

fn handle_list_providers_tool(state: &AppState, args: Value) -> StoreResult<Value> {
    let input: ListProvidersArgs = parse_args(args)?;
    let providers = filter_providers(&state.catalog, &input.query, input.tab.as_deref());

    let summary = providers
        .iter()
        .map(|p| {
            let menu = p
                .menu
                .iter()
                .map(|m| {
                    let price = state.order.format_unit_price(m.unit_price);
                    format!("{} [{}] {}", m.title, m.id, price)
                })
                .collect::<Vec<_>>()
                .join("; ");
            format!("{} [{}]: {}", p.name, p.id, menu)
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(json!({
        "content": [{ "type": "text", "text": summary }],
        "structuredContent": { "providers": providers }
    }))
}

fn handle_add_to_cart_tool(state: &AppState, args: Value) -> StoreResult<Value> {
    let input: AddToCartArgs = parse_args(args)?;
    if !(1..=MAX_ADD_QUANTITY).contains(&input.quantity) {
        return Err(StoreError::InvalidArguments(format!(
            "quantity must be between 1 and {MAX_ADD_QUANTITY}"
        )));
    }

    let cart_id = get_or_create_cart_id(input.cart_id);

    let view = state.add_items(
        &cart_id,
        &input.provider_id,
        &input.menu_item_id,
        input.quantity,
    )?;

    let message = format!(
        "Cart {} now has {} line(s), {} unit(s).",
        cart_id,
        view.items.len(),
        view.total_quantity
    );
    Ok(cart_tool_result(message, &view))
}

fn handle_adjust_quantity_tool(state: &AppState, args: Value) -> StoreResult<Value> {
    let input: AdjustQuantityArgs = parse_args(args)?;
    let cart_id = get_or_create_cart_id(input.cart_id);
    let key = LineKey::new(input.provider_id, input.menu_item_id);

    let view = state.adjust_quantity(&cart_id, &key, input.delta);
    let message = match view.items.iter().find(|l| l.key() == key) {
        Some(line) => format!("{} quantity is now {}.", line.title, line.quantity),
        None => format!("Item {} is not in cart {}.", key.menu_item_id, cart_id),
    };
    Ok(cart_tool_result(message, &view))
}

fn handle_clear_cart_tool(state: &AppState, args: Value) -> StoreResult<Value> {
    let input: CartArgs = parse_args(args)?;
    let cart_id = get_or_create_cart_id(input.cart_id);

    let view = state.clear_cart(&cart_id);
    Ok(cart_tool_result(format!("Cart {} cleared.", cart_id), &view))
}

fn handle_checkout_tool(state: &AppState, args: Value) -> StoreResult<Value> {
    let input: CartArgs = parse_args(args)?;
    let cart_id = get_or_create_cart_id(input.cart_id);

    let checkout = state.checkout(&cart_id);
    let text = match &checkout.url {
        Some(url) => format!("Open this link to send the order: {}", url),
        None => "Cart is empty.".to_string(),
    };

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": checkout,
    }))
}
