//! REST API handlers for storefront operations
//!
//! This module implements HTTP endpoints for browsing the catalog, cart
//! mutations and the order hand-off.

use super::{helpers::*, models::*, state::SharedState};
use crate::catalog::{filter_providers, TABS};
use crate::error::StoreResult;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

/// Creates routes for catalog and cart operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health))
        .route("/catalog", get(catalog))
        .route("/cart", get(get_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/adjust", post(adjust_quantity))
        .route("/cart/clear", post(clear_cart))
        .route("/cart/open", post(open_cart))
        .route("/cart/close", post(close_cart))
        .route("/checkout", post(checkout))
        .route("/inquiry", get(inquiry))
}

/// Resolves the cart id for a request and, for a brand-new session, attaches
/// the session cookie to the response.
fn with_session<T: Serialize>(
    headers: &HeaderMap,
    cart_id: Option<String>,
    op: impl FnOnce(&str) -> StoreResult<T>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(headers);
    let cart_id = get_or_default_cart_id(cart_id, &session_id);

    let mut response = match op(&cart_id) {
        Ok(body) => Json(body).into_response(),
        Err(e) => e.into_response(),
    };

    if is_new_session {
        if let Some(cookie) = session_cookie(&session_id) {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
    }

    response
}

/// Like [`with_session`], for requests whose only input is an optional
/// `{cartId}` body. A malformed body is rejected before any session work.
fn with_cart_ref<T: Serialize>(
    headers: &HeaderMap,
    body: &[u8],
    op: impl FnOnce(&str) -> StoreResult<T>,
) -> Response {
    match parse_cart_ref(body) {
        Ok(cart) => with_session(headers, cart.cart_id, op),
        Err(e) => e.into_response(),
    }
}

/// Endpoint: GET /health
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Endpoint: GET /catalog?q=&tab=
/// Providers matching the search box and category tab.
async fn catalog(
    State(state): State<SharedState>,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let providers = filter_providers(&state.catalog, &query.q, query.tab.as_deref());
    Json(json!({
        "providers": providers,
        "tabs": TABS,
    }))
}

/// Endpoint: GET /cart?cartId=
async fn get_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(cart): Query<CartRef>,
) -> Response {
    with_session(&headers, cart.cart_id, |id| Ok(state.cart_view(id)))
}

/// Endpoint: POST /cart/items
/// Adds one unit of a menu item; repeated adds merge into one line.
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddItemInput>,
) -> Response {
    with_session(&headers, payload.cart_id, |id| {
        state.add_item(id, &payload.provider_id, &payload.menu_item_id)
    })
}

/// Endpoint: POST /cart/adjust
/// Changes a line's quantity by `delta`; lines reaching zero are removed.
async fn adjust_quantity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AdjustQuantityInput>,
) -> Response {
    let key = LineKey::new(payload.provider_id, payload.menu_item_id);
    with_session(&headers, payload.cart_id, |id| {
        Ok(state.adjust_quantity(id, &key, payload.delta))
    })
}

/// Endpoint: POST /cart/clear
async fn clear_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    with_cart_ref(&headers, &body, |id| Ok(state.clear_cart(id)))
}

/// Endpoint: POST /cart/open
async fn open_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    with_cart_ref(&headers, &body, |id| Ok(state.set_cart_open(id, true)))
}

/// Endpoint: POST /cart/close
async fn close_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    with_cart_ref(&headers, &body, |id| Ok(state.set_cart_open(id, false)))
}

/// Endpoint: POST /checkout
/// Builds the order message and the deep link the client should open.
async fn checkout(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    with_cart_ref(&headers, &body, |id| Ok(state.checkout(id)))
}

/// Endpoint: GET /inquiry
/// General "chat with us" deep link.
async fn inquiry(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({ "url": state.inquiry_url() }))
}
