//! Shopping Cart State Management
//!
//! This module manages the application state: the injected catalog, the
//! order hand-off settings and every live session's cart.

use super::{
    helpers::format_item_summary,
    models::{CartView, CheckoutResponse, LineKey},
    order::{build_inquiry_url, build_order_message, OrderSettings},
    session::Session,
};
use crate::{
    catalog::Catalog,
    error::{CatalogError, StoreResult},
};
use dashmap::DashMap;
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state containing sessions and the catalog
#[derive(Debug)]
pub struct AppState {
    /// In-memory sessions, keyed by cart id.
    /// Each operation runs under the entry's shard lock, so mutations of a
    /// single cart never interleave.
    pub sessions: DashMap<String, Session>,

    /// Read-only catalog shared by every session.
    pub catalog: Arc<Catalog>,

    /// Where order messages are sent and how amounts are printed.
    pub order: OrderSettings,

    /// Empty the cart once a hand-off URL has been produced.
    pub clear_on_checkout: bool,
}

impl AppState {
    /// Creates state over `catalog` with default order settings.
    pub fn new(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self {
            sessions: DashMap::new(),
            catalog: catalog.into(),
            order: OrderSettings::default(),
            clear_on_checkout: false,
        }
    }

    /// Creates state over the bundled catalog.
    ///
    /// # Errors
    ///
    /// Fails only if the bundled catalog asset is malformed.
    pub fn with_bundled_catalog() -> Result<Self, CatalogError> {
        Ok(Self::new(Catalog::bundled()?))
    }

    pub fn with_order_settings(mut self, order: OrderSettings) -> Self {
        self.order = order;
        self
    }

    pub fn with_clear_on_checkout(mut self, clear: bool) -> Self {
        self.clear_on_checkout = clear;
        self
    }

    /// Current state of a cart. Unknown ids read as an empty, closed cart.
    pub fn cart_view(&self, cart_id: &str) -> CartView {
        match self.sessions.get(cart_id) {
            Some(session) => session.view(cart_id, Vec::new()),
            None => Session::new().view(cart_id, Vec::new()),
        }
    }

    /// Adds one unit of a catalog item to the cart.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProvider` / `UnknownMenuItem` if the pair is not in the
    /// catalog; the session is not created in that case.
    pub fn add_item(
        &self,
        cart_id: &str,
        provider_id: &str,
        menu_item_id: &str,
    ) -> StoreResult<CartView> {
        self.add_items(cart_id, provider_id, menu_item_id, 1)
    }

    /// Adds `count` units of a catalog item as one atomic update.
    ///
    /// Every unit goes through the single-unit merge rule, and all of them are
    /// applied under the same entry guard so no other request observes a
    /// partial add. The returned view carries one event per unit.
    ///
    /// # Errors
    ///
    /// Same as [`AppState::add_item`].
    pub fn add_items(
        &self,
        cart_id: &str,
        provider_id: &str,
        menu_item_id: &str,
        count: u32,
    ) -> StoreResult<CartView> {
        let (provider, item) = self.catalog.resolve(provider_id, menu_item_id)?;

        let mut session = self.sessions.entry(cart_id.to_string()).or_default();
        let events: Vec<_> = (0..count)
            .map(|_| session.add_item(provider, item))
            .collect();
        tracing::debug!(cart_id, provider_id, menu_item_id, count, "items added");

        Ok(session.view(cart_id, events))
    }

    /// Changes a line's quantity by `delta`. A missing line or a change that
    /// leaves the quantity as it was is a no-op without events.
    pub fn adjust_quantity(&self, cart_id: &str, key: &LineKey, delta: i64) -> CartView {
        let Some(mut session) = self.sessions.get_mut(cart_id) else {
            tracing::debug!(cart_id, ?key, "adjust on unknown cart ignored");
            return self.cart_view(cart_id);
        };

        match session.adjust_quantity(key, delta) {
            Some(event) => {
                tracing::debug!(cart_id, delta, ?event, "quantity adjusted");
                session.view(cart_id, vec![event])
            }
            None => {
                tracing::debug!(cart_id, ?key, delta, "adjust left cart unchanged");
                session.view(cart_id, Vec::new())
            }
        }
    }

    /// Empties the cart. Unknown carts are left unregistered.
    pub fn clear_cart(&self, cart_id: &str) -> CartView {
        let Some(mut session) = self.sessions.get_mut(cart_id) else {
            tracing::debug!(cart_id, "clear on unknown cart ignored");
            return self.cart_view(cart_id);
        };

        let event = session.clear();
        tracing::debug!(cart_id, "cart cleared");
        session.view(cart_id, vec![event])
    }

    /// Opens or closes the cart drawer.
    ///
    /// Opening registers the session; closing an unknown cart is a no-op.
    pub fn set_cart_open(&self, cart_id: &str, open: bool) -> CartView {
        if !open {
            let Some(mut session) = self.sessions.get_mut(cart_id) else {
                return self.cart_view(cart_id);
            };
            session.set_cart_open(false);
            return session.view(cart_id, Vec::new());
        }

        let mut session = self.sessions.entry(cart_id.to_string()).or_default();
        session.set_cart_open(true);
        session.view(cart_id, Vec::new())
    }

    /// Builds the order message and hand-off URL for a cart.
    ///
    /// An empty cart yields status `"empty"` and no message or URL.
    pub fn checkout(&self, cart_id: &str) -> CheckoutResponse {
        let Some(mut session) = self.sessions.get_mut(cart_id) else {
            tracing::info!(cart_id, "checkout refused: cart is empty");
            return CheckoutResponse {
                status: "empty".to_string(),
                cart_id: cart_id.to_string(),
                message: None,
                url: None,
                cart: self.cart_view(cart_id),
            };
        };

        let Some(message) = build_order_message(&session.cart, &self.order) else {
            tracing::info!(cart_id, "checkout refused: cart is empty");
            return CheckoutResponse {
                status: "empty".to_string(),
                cart_id: cart_id.to_string(),
                message: None,
                url: None,
                cart: session.view(cart_id, Vec::new()),
            };
        };

        let url = self.order.order_link(&message);
        tracing::info!(
            cart_id,
            items = %format_item_summary(session.cart.lines()),
            subtotal = session.cart.subtotal(),
            "order message ready"
        );

        let mut events = Vec::new();
        if self.clear_on_checkout {
            events.push(session.clear());
        }

        CheckoutResponse {
            status: "ready".to_string(),
            cart_id: cart_id.to_string(),
            message: Some(message),
            url: Some(url),
            cart: session.view(cart_id, events),
        }
    }

    /// The general "chat with us" link.
    pub fn inquiry_url(&self) -> String {
        build_inquiry_url(&self.order)
    }
}
