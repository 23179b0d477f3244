//! Catalog Loading and Validation
//!
//! Catalog files are JSON arrays of provider records. Records are parsed
//! into loose `*Record` shapes first so that bad data can be reported with
//! the offending provider and item ids, then validated into [`Provider`]s.

use super::models::{Catalog, MenuItem, Provider};
use crate::error::CatalogError;
use serde::Deserialize;
use std::{collections::HashSet, path::Path};

/// Catalog bundled with the binary, used when no `--catalog` is given.
const BUNDLED_CATALOG: &str = include_str!("../../assets/catalog.json");

// =============================================================================
// File Records
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderRecord {
    id: String,
    name: String,
    #[serde(default)]
    tagline: String,
    #[serde(default)]
    rating: f32,
    #[serde(default)]
    eta: String,
    #[serde(default)]
    price_label: String,
    #[serde(default)]
    pickup_free_above: u64,
    #[serde(default, alias = "tags")]
    badges: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    menu: Vec<MenuItemRecord>,
}

#[derive(Debug, Deserialize)]
struct MenuItemRecord {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "unitPrice")]
    price: Option<i64>,
}

impl MenuItemRecord {
    fn into_menu_item(self, provider_id: &str) -> Result<MenuItem, CatalogError> {
        let malformed = |reason: &str| CatalogError::MalformedMenuItem {
            provider_id: provider_id.to_string(),
            menu_item_id: self.id.clone(),
            reason: reason.to_string(),
        };

        let title = match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return Err(malformed("missing title")),
        };

        // Absent price means "contact for pricing"; negative is never coerced.
        let unit_price = match self.price {
            None => 0,
            Some(p) => u64::try_from(p).map_err(|_| malformed("negative price"))?,
        };

        Ok(MenuItem {
            id: self.id,
            title,
            unit_price,
        })
    }
}

impl ProviderRecord {
    fn into_provider(self) -> Result<Provider, CatalogError> {
        let menu = self
            .menu
            .into_iter()
            .map(|m| m.into_menu_item(&self.id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Provider {
            id: self.id,
            name: self.name,
            tagline: self.tagline,
            rating: self.rating,
            eta: self.eta,
            price_label: self.price_label,
            pickup_free_above: self.pickup_free_above,
            tags: self.badges,
            image: self.image,
            menu,
        })
    }
}

// =============================================================================
// Constructors
// =============================================================================

impl Catalog {
    /// Builds a catalog from already-typed providers, validating ids and titles.
    ///
    /// # Errors
    ///
    /// Fails on blank provider ids or names, blank menu titles, and duplicate
    /// provider or menu item ids.
    pub fn from_providers(providers: Vec<Provider>) -> Result<Self, CatalogError> {
        let mut seen_providers = HashSet::new();

        for provider in &providers {
            if provider.id.trim().is_empty() {
                return Err(CatalogError::MalformedProvider {
                    provider_id: provider.id.clone(),
                    reason: "blank id".to_string(),
                });
            }
            if provider.name.trim().is_empty() {
                return Err(CatalogError::MalformedProvider {
                    provider_id: provider.id.clone(),
                    reason: "blank name".to_string(),
                });
            }
            if !seen_providers.insert(provider.id.as_str()) {
                return Err(CatalogError::DuplicateProvider(provider.id.clone()));
            }

            let mut seen_items = HashSet::new();
            for item in &provider.menu {
                if item.title.trim().is_empty() {
                    return Err(CatalogError::MalformedMenuItem {
                        provider_id: provider.id.clone(),
                        menu_item_id: item.id.clone(),
                        reason: "missing title".to_string(),
                    });
                }
                if !seen_items.insert(item.id.as_str()) {
                    return Err(CatalogError::DuplicateMenuItem {
                        provider_id: provider.id.clone(),
                        menu_item_id: item.id.clone(),
                    });
                }
            }
        }

        Ok(Catalog { providers })
    }

    /// Parses and validates a JSON catalog document.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the document is not valid JSON, is empty,
    /// or contains malformed records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ProviderRecord> = serde_json::from_str(json)?;
        if records.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let providers = records
            .into_iter()
            .map(ProviderRecord::into_provider)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_providers(providers)
    }

    /// Reads a JSON catalog from disk.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` on I/O failure or invalid content.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), providers = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// The catalog shipped in `assets/catalog.json`.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled asset itself is malformed.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_CATALOG)
    }
}
