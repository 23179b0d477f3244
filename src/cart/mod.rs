//! Shopping Cart Domain Module
//!
//! This module contains all cart business logic, including:
//! - Domain models (CartLine, LineKey, CartEvent, inputs, responses)
//! - The cart engine (merge, quantity adjustment, subtotal)
//! - Order message and deep link formatting
//! - Session and application state management
//! - REST API handlers

pub mod engine;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod order;
pub mod session;
pub mod state;

// Re-export commonly used types for convenience
pub use engine::Cart;
pub use handlers::routes;
pub use models::{CartEvent, CartLine, CartView, LineKey};
pub use order::{build_inquiry_url, build_order_message, build_order_url, OrderSettings};
pub use session::Session;
pub use state::{AppState, SharedState};
