//! Catalog Domain Models
//!
//! Providers and their menus as served to the storefront. These are
//! immutable once loaded; see [`super::loader`] for how they are built.

use crate::error::{StoreError, StoreResult};
use serde::Serialize;

// =============================================================================
// Catalog Models
// =============================================================================

/// A single purchasable service or package offered by a provider
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Identifier, unique within its provider's menu
    pub id: String,

    /// Display title (never empty)
    pub title: String,

    /// Unit price in whole currency units; 0 means "contact for pricing"
    #[serde(rename = "price")]
    pub unit_price: u64,
}

impl MenuItem {
    /// True when the item has no list price and must be quoted by the provider.
    pub fn is_price_on_request(&self) -> bool {
        self.unit_price == 0
    }
}

/// A laundry service vendor and its menu
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,

    /// Display-only fields
    pub tagline: String,
    pub rating: f32,
    pub eta: String,
    pub price_label: String,

    /// Order value above which pickup is free (0 when not offered)
    pub pickup_free_above: u64,

    /// Badge tags, also used for tab filtering
    #[serde(rename = "badges")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Menu in display order
    pub menu: Vec<MenuItem>,
}

impl Provider {
    /// Looks up a menu item by id.
    pub fn menu_item(&self, menu_item_id: &str) -> Option<&MenuItem> {
        self.menu.iter().find(|m| m.id == menu_item_id)
    }

    /// Text the search box matches against: name, tagline and tags.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.tagline, self.tags.join(" "))
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Read-only, validated list of providers in display order.
///
/// Build one with [`Catalog::from_providers`], [`Catalog::load`] or
/// [`Catalog::bundled`]; every constructor rejects malformed data.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub(crate) providers: Vec<Provider>,
}

impl Catalog {
    /// All providers in display order.
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Looks up a provider by id.
    pub fn provider(&self, provider_id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == provider_id)
    }

    /// Resolves a (provider, menu item) pair the user selected.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProvider` or `UnknownMenuItem` when either id does not
    /// exist, or the item is not on that provider's menu.
    pub fn resolve(
        &self,
        provider_id: &str,
        menu_item_id: &str,
    ) -> StoreResult<(&Provider, &MenuItem)> {
        let provider = self
            .provider(provider_id)
            .ok_or_else(|| StoreError::UnknownProvider(provider_id.to_string()))?;
        let item = provider
            .menu_item(menu_item_id)
            .ok_or_else(|| StoreError::UnknownMenuItem {
                provider_id: provider_id.to_string(),
                menu_item_id: menu_item_id.to_string(),
            })?;
        Ok((provider, item))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
