//! Cart Engine
//!
//! Owns the ordered set of cart lines and enforces the cart invariants:
//! at most one line per (provider, menu item) pair, quantities never below
//! one while a line exists, and first-insertion order for display.

use super::models::{CartEvent, CartLine, LineKey};
use crate::catalog::{MenuItem, Provider};
use indexmap::IndexMap;

/// The user's cart. Lines keep the order in which they were first added.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: IndexMap<LineKey, CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item` from `provider`.
    ///
    /// An existing line for the pair is incremented in place; otherwise a new
    /// line with quantity 1 is appended.
    pub fn add_item(&mut self, provider: &Provider, item: &MenuItem) -> CartEvent {
        let key = LineKey::new(&provider.id, &item.id);

        if let Some(existing) = self.lines.get_mut(&key) {
            existing.quantity = existing.quantity.saturating_add(1);
            return CartEvent::QuantityChanged {
                quantity: existing.quantity,
                key,
            };
        }

        self.lines.insert(
            key.clone(),
            CartLine {
                provider_id: provider.id.clone(),
                provider_name: provider.name.clone(),
                menu_item_id: item.id.clone(),
                title: item.title.clone(),
                unit_price: item.unit_price,
                quantity: 1,
            },
        );
        CartEvent::LineAdded { key }
    }

    /// Changes the quantity of the line at `key` by `delta`, flooring at zero.
    ///
    /// A line that reaches zero is removed. Returns `None`, leaving the cart
    /// untouched, when no line exists for `key` (a stale reference) or the
    /// quantity would not change (a zero delta, or one lost to saturation).
    pub fn adjust_quantity(&mut self, key: &LineKey, delta: i64) -> Option<CartEvent> {
        let line = self.lines.get_mut(key)?;

        let adjusted = i64::from(line.quantity).saturating_add(delta).max(0);
        let quantity = u32::try_from(adjusted).unwrap_or(u32::MAX);

        if quantity == line.quantity {
            return None;
        }

        if quantity == 0 {
            self.lines.shift_remove(key);
            return Some(CartEvent::LineRemoved { key: key.clone() });
        }

        line.quantity = quantity;
        Some(CartEvent::QuantityChanged {
            key: key.clone(),
            quantity,
        })
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> CartEvent {
        self.lines.clear();
        CartEvent::Cleared
    }

    /// Sum of `unit_price * quantity` over all lines; 0 when empty.
    pub fn subtotal(&self) -> u64 {
        self.lines
            .values()
            .map(CartLine::line_total)
            .fold(0, u64::saturating_add)
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines.values().map(|l| u64::from(l.quantity)).sum()
    }

    /// Lines in display order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.get(key)
    }

    /// Distinct provider names in order of first appearance.
    pub fn provider_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for line in self.lines.values() {
            if !names.contains(&line.provider_name.as_str()) {
                names.push(&line.provider_name);
            }
        }
        names
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
