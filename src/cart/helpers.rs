//! Shopping Cart Business Logic Helpers
//!
//! This module contains helper functions for session resolution and
//! log-friendly formatting.

use super::models::{CartLine, CartRef};
use crate::error::{StoreError, StoreResult};
use axum::http::{header, HeaderMap, HeaderValue};
use uuid::Uuid;

/// Name of the cookie carrying the session's cart id
pub const SESSION_COOKIE: &str = "cart_session";

/// Returns the provided `cart_id` or creates a new UUID string when `None`.
///
/// This guarantees that every cart operation works with a non-empty identifier.
pub fn get_or_create_cart_id(cart_id: Option<String>) -> String {
    cart_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

/// Returns the explicit `cart_id` if given, else the session's id.
pub fn get_or_default_cart_id(cart_id: Option<String>, session_id: &str) -> String {
    cart_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| session_id.to_string())
}

/// Reads the session id from the `cart_session` cookie.
///
/// Returns the id and whether it was freshly generated (so the caller must
/// set the cookie on the response).
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());

    match existing {
        Some(id) => (id, false),
        None => (get_or_create_cart_id(None), true),
    }
}

/// `Set-Cookie` value binding a new session id to the client.
pub fn session_cookie(session_id: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly")).ok()
}

/// Parses the optional `{cartId}` body of cart-level requests.
///
/// An empty body means "use the session's cart"; anything else must be a
/// valid `CartRef`, otherwise the request is rejected.
pub fn parse_cart_ref(body: &[u8]) -> StoreResult<CartRef> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CartRef::default());
    }
    serde_json::from_slice(body).map_err(|e| StoreError::InvalidArguments(e.to_string()))
}

/// Produces a human-readable one-line summary for a list of cart lines.
///
/// Example output: `"2x Wash & Fold (per kg), 1x Stain Treatment"`.
pub fn format_item_summary<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> String {
    lines
        .into_iter()
        .map(|l| format!("{}x {}", l.quantity, l.title))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_ref_body_is_optional_but_strict() {
        assert_eq!(parse_cart_ref(b"").unwrap().cart_id, None);
        assert_eq!(parse_cart_ref(b" \n").unwrap().cart_id, None);
        assert_eq!(parse_cart_ref(b"{}").unwrap().cart_id, None);
        assert_eq!(
            parse_cart_ref(br#"{"cartId":"c1"}"#).unwrap().cart_id.as_deref(),
            Some("c1")
        );
        assert!(matches!(
            parse_cart_ref(br#"{"cartId":5}"#),
            Err(StoreError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_cart_ref(b"cart"),
            Err(StoreError::InvalidArguments(_))
        ));
    }

    #[test]
    fn explicit_cart_id_wins() {
        assert_eq!(get_or_create_cart_id(Some("abc".into())), "abc");
        assert_eq!(get_or_default_cart_id(Some("abc".into()), "sess"), "abc");
        assert_eq!(get_or_default_cart_id(None, "sess"), "sess");
        assert_eq!(get_or_default_cart_id(Some("  ".into()), "sess"), "sess");

        let generated = get_or_create_cart_id(None);
        assert_eq!(generated.len(), 32);
        assert_ne!(generated, get_or_create_cart_id(Some(String::new())));
    }

    #[test]
    fn session_id_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; cart_session=s-42; other=1"),
        );
        assert_eq!(resolve_session_id(&headers), ("s-42".to_string(), false));

        let (id, is_new) = resolve_session_id(&HeaderMap::new());
        assert!(is_new);
        assert!(!id.is_empty());
    }

    #[test]
    fn cookie_header_value() {
        let value = session_cookie("s-42").unwrap();
        assert_eq!(value.to_str().unwrap(), "cart_session=s-42; Path=/; HttpOnly");
    }

    #[test]
    fn summary_lists_quantity_and_title() {
        let lines = [
            CartLine {
                provider_id: "p1".into(),
                provider_name: "Spark Cleaners".into(),
                menu_item_id: "m1".into(),
                title: "Wash & Fold (per kg)".into(),
                unit_price: 99,
                quantity: 2,
            },
            CartLine {
                provider_id: "p2".into(),
                provider_name: "FreshThreads".into(),
                menu_item_id: "m3".into(),
                title: "Stain Treatment".into(),
                unit_price: 59,
                quantity: 1,
            },
        ];
        assert_eq!(
            format_item_summary(&lines),
            "2x Wash & Fold (per kg), 1x Stain Treatment"
        );
    }
}
