//! Catalog Domain Module
//!
//! Read-only provider and menu data:
//! - Domain models (Provider, MenuItem, Catalog)
//! - Validated loading from JSON (bundled or from disk)
//! - Search box and category tab filtering

pub mod filter;
pub mod loader;
pub mod models;

pub use filter::{filter_providers, TABS};
pub use models::{Catalog, MenuItem, Provider};
