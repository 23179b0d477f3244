//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the cart business
//! domain, plus the request/response shapes of the REST API.

use serde::{Deserialize, Serialize};

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Identity of a cart line: one line per (provider, menu item) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub provider_id: String,
    pub menu_item_id: String,
}

impl LineKey {
    pub fn new(provider_id: impl Into<String>, menu_item_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            menu_item_id: menu_item_id.into(),
        }
    }
}

/// One merged entry in the cart
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub provider_id: String,

    /// Provider display name, captured when the line was created
    pub provider_name: String,

    pub menu_item_id: String,
    pub title: String,

    /// Unit price captured when the line was created; 0 for "contact for pricing"
    pub unit_price: u64,

    /// Always at least 1 while the line is in a cart
    pub quantity: u32,
}

impl CartLine {
    pub fn key(&self) -> LineKey {
        LineKey::new(&self.provider_id, &self.menu_item_id)
    }

    /// `unit_price * quantity`
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// What a cart mutation did. Callers react to these (e.g. reveal the cart
/// drawer on [`CartEvent::LineAdded`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CartEvent {
    /// A new line was appended with quantity 1
    LineAdded { key: LineKey },

    /// An existing line's quantity changed in place
    QuantityChanged { key: LineKey, quantity: u32 },

    /// A line reached quantity 0 and was dropped
    LineRemoved { key: LineKey },

    /// The cart was emptied
    Cleared,
}

// =============================================================================
// REST API Models
// =============================================================================

/// Input for adding one menu item to a cart
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub provider_id: String,
    pub menu_item_id: String,

    /// Optional cart identifier
    pub cart_id: Option<String>,
}

/// Input for changing a line's quantity by `delta`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustQuantityInput {
    pub provider_id: String,
    pub menu_item_id: String,
    pub delta: i64,

    /// Optional cart identifier
    pub cart_id: Option<String>,
}

/// Input for operations that only need the cart (clear, checkout)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRef {
    /// Optional cart identifier
    pub cart_id: Option<String>,
}

/// Query parameters for `GET /catalog`
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: String,
    pub tab: Option<String>,
}

/// Snapshot of a session returned after every cart operation
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub cart_id: String,
    pub items: Vec<CartLine>,

    /// Sum of all line quantities (cart badge)
    pub total_quantity: u64,
    pub subtotal: u64,

    /// Whether the cart drawer should be shown
    pub cart_open: bool,

    /// Events produced by the operation that returned this view
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<CartEvent>,
}

/// Response for checkout
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// `"ready"` when a hand-off URL was produced, `"empty"` otherwise
    pub status: String,

    pub cart_id: String,

    /// Plain-text order message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Deep link the client should open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub cart: CartView,
}
