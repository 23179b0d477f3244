//! Per-user session context owning a cart.

use super::{
    engine::Cart,
    models::{CartEvent, CartView, LineKey},
};
use crate::catalog::{MenuItem, Provider};

/// Everything the storefront tracks for one user: the cart and whether the
/// cart drawer is showing.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub cart: Cart,
    pub cart_open: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit and reveals the cart.
    pub fn add_item(&mut self, provider: &Provider, item: &MenuItem) -> CartEvent {
        let event = self.cart.add_item(provider, item);
        self.cart_open = true;
        event
    }

    pub fn adjust_quantity(&mut self, key: &LineKey, delta: i64) -> Option<CartEvent> {
        self.cart.adjust_quantity(key, delta)
    }

    pub fn clear(&mut self) -> CartEvent {
        self.cart.clear()
    }

    pub fn set_cart_open(&mut self, open: bool) {
        self.cart_open = open;
    }

    /// Snapshot for the UI, tagged with the events that produced it.
    pub fn view(&self, cart_id: &str, events: Vec<CartEvent>) -> CartView {
        CartView {
            cart_id: cart_id.to_string(),
            items: self.cart.lines().cloned().collect(),
            total_quantity: self.cart.total_quantity(),
            subtotal: self.cart.subtotal(),
            cart_open: self.cart_open,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn add_reveals_cart_and_view_reflects_state() {
        let catalog = Catalog::bundled().unwrap();
        let (provider, item) = catalog.resolve("p2", "m2").unwrap();
        let mut session = Session::new();
        assert!(!session.cart_open);

        let event = session.add_item(provider, item);
        session.add_item(provider, item);
        assert!(session.cart_open);

        let view = session.view("c1", vec![event]);
        assert_eq!(view.cart_id, "c1");
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].provider_name, "FreshThreads");
        assert_eq!(view.total_quantity, 2);
        assert_eq!(view.subtotal, 1998);
        assert_eq!(
            view.events,
            vec![CartEvent::LineAdded {
                key: LineKey::new("p2", "m2")
            }]
        );
    }

    #[test]
    fn adjust_and_clear_leave_drawer_state_alone() {
        let catalog = Catalog::bundled().unwrap();
        let (provider, item) = catalog.resolve("p1", "m1").unwrap();
        let mut session = Session::new();
        session.add_item(provider, item);
        session.set_cart_open(false);

        session.adjust_quantity(&LineKey::new("p1", "m1"), 1);
        assert!(!session.cart_open);
        session.clear();
        assert!(!session.cart_open);
        assert!(session.cart.is_empty());
    }
}
