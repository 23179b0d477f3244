//! Error types shared across the service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures while ingesting catalog data. All of these are fatal at load time.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Malformed menu item {menu_item_id:?} of provider {provider_id:?}: {reason}")]
    MalformedMenuItem {
        provider_id: String,
        menu_item_id: String,
        reason: String,
    },

    #[error("Malformed provider {provider_id:?}: {reason}")]
    MalformedProvider { provider_id: String, reason: String },

    #[error("Provider id {0:?} appears more than once")]
    DuplicateProvider(String),

    #[error("Menu item id {menu_item_id:?} appears more than once for provider {provider_id:?}")]
    DuplicateMenuItem {
        provider_id: String,
        menu_item_id: String,
    },

    #[error("Catalog contains no providers")]
    EmptyCatalog,
}

/// Failures while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Request-level failures surfaced by the REST and MCP handlers.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown menu item {menu_item_id} for provider {provider_id}")]
    UnknownMenuItem {
        provider_id: String,
        menu_item_id: String,
    },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl StoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::UnknownProvider(_) | StoreError::UnknownMenuItem { .. } => {
                StatusCode::NOT_FOUND
            }
            StoreError::InvalidArguments(_) | StoreError::UnknownTool(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(%status, error = %self, "request rejected");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
