//! Laundry Storefront Cart Library
//!
//! This library provides the core functionality for a laundry storefront:
//! a read-only provider catalog, a cart engine that merges and prices line
//! items, and the order hand-off that turns a cart into a chat deep link.
//! The same operations are served over REST and MCP (Model Context Protocol).

// Domain modules
pub mod cart;
pub mod catalog;
pub mod mcp;

// Infrastructure
pub mod config;
pub mod error;
pub mod logger;
pub mod router;
