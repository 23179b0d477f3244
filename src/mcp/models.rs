//! MCP Protocol Models and Constants
//!
//! This module contains all data structures and constants related to the
//! Model Context Protocol (MCP) surface of the storefront.

use serde::Deserialize;
use serde_json::Value;

// =============================================================================
// MCP Constants
// =============================================================================

/// Lists providers, optionally filtered by search text and tab
pub const LIST_PROVIDERS_TOOL: &str = "list_providers";
/// Adds a catalog item to a cart
pub const ADD_TO_CART_TOOL: &str = "add_to_cart";
/// Changes a cart line's quantity
pub const ADJUST_QUANTITY_TOOL: &str = "adjust_quantity";
/// Empties a cart
pub const CLEAR_CART_TOOL: &str = "clear_cart";
/// Builds the order message and hand-off link
pub const CHECKOUT_TOOL: &str = "checkout";
/// Server identifier
pub const SERVER_NAME: &str = "laundry-cart-rust";
/// Protocol version for MCP
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Most units a single `add_to_cart` call may add
pub const MAX_ADD_QUANTITY: u32 = 99;

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    pub params: Option<Value>,

    /// Request identifier
    pub id: Option<Value>,
}

// =============================================================================
// Tool Arguments
// =============================================================================

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProvidersArgs {
    #[serde(default)]
    pub query: String,
    pub tab: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartArgs {
    pub provider_id: String,
    pub menu_item_id: String,

    /// Units to add (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    pub cart_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustQuantityArgs {
    pub provider_id: String,
    pub menu_item_id: String,
    pub delta: i64,
    pub cart_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartArgs {
    pub cart_id: Option<String>,
}
