//! Storefront search box and category tabs.

use super::models::{Catalog, Provider};

/// Category tabs shown above the provider grid. `All` disables tab filtering.
pub const TABS: [&str; 5] = ["All", "Pickup", "Express", "Family", "Hotel"];

/// The tab that matches every provider.
pub const ALL_TAB: &str = "All";

/// Returns the providers matching both the active tab and the search query,
/// in catalog order.
///
/// A tab matches when the provider's joined tags contain it (case-insensitive).
/// The query is trimmed and matched as a case-insensitive substring of the
/// provider's name, tagline and tags; an empty query matches everything.
pub fn filter_providers<'a>(
    catalog: &'a Catalog,
    query: &str,
    tab: Option<&str>,
) -> Vec<&'a Provider> {
    let query = query.trim().to_lowercase();
    let tab = tab
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case(ALL_TAB))
        .map(str::to_lowercase);

    catalog
        .providers()
        .iter()
        .filter(|p| match &tab {
            Some(tab) => p.tags.join(" ").to_lowercase().contains(tab.as_str()),
            None => true,
        })
        .filter(|p| query.is_empty() || p.search_text().to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(providers: &[&Provider]) -> Vec<String> {
        providers.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn all_tab_and_empty_query_return_everything() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(ids(&filter_providers(&catalog, "", None)), ["p1", "p2", "p3"]);
        assert_eq!(
            ids(&filter_providers(&catalog, "   ", Some("All"))),
            ["p1", "p2", "p3"]
        );
    }

    #[test]
    fn tab_matches_tags() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(ids(&filter_providers(&catalog, "", Some("Pickup"))), ["p1"]);
        assert_eq!(ids(&filter_providers(&catalog, "", Some("family"))), ["p2"]);
        assert_eq!(ids(&filter_providers(&catalog, "", Some("Hotel"))), ["p3"]);
        assert!(filter_providers(&catalog, "", Some("Express")).is_empty());
    }

    #[test]
    fn query_matches_name_tagline_and_tags() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(ids(&filter_providers(&catalog, "SPARK", None)), ["p1"]);
        assert_eq!(ids(&filter_providers(&catalog, "homestay", None)), ["p3"]);
        assert_eq!(ids(&filter_providers(&catalog, " dry clean ", None)), ["p1"]);
        assert!(filter_providers(&catalog, "ironing", None).is_empty());
    }

    #[test]
    fn tab_and_query_combine() {
        let catalog = Catalog::bundled().unwrap();
        assert!(filter_providers(&catalog, "spark", Some("Hotel")).is_empty());
        assert_eq!(ids(&filter_providers(&catalog, "b2b", Some("Hotel"))), ["p3"]);
    }
}
