//! Routing module for the storefront application

use crate::cart::state::SharedState;
use axum::{body::Body, extract::Request, middleware::Next, Router};
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let method = req.method().clone();
        let uri = req.uri().clone();
        let started = Instant::now();

        let res = next.run(req).await;

        let status = res.status();
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if status.is_success() {
            tracing::info!(%method, %uri, %status, elapsed_ms, "request");
        } else {
            tracing::warn!(%method, %uri, %status, elapsed_ms, "request failed");
        }
        res
    });

    // Middleware: CORS (Permissive for local dev)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .merge(crate::mcp::routes())
        .merge(crate::cart::routes())
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}
