//! Configuration: CLI flags layered over an optional TOML file.
//!
//! Precedence is CLI flag (or its environment variable) > config file >
//! built-in default.

use crate::cart::order::OrderSettings;
use crate::error::ConfigError;
use clap::Parser;
use serde::Deserialize;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

pub const DEFAULT_PORT: u16 = 8000;

/// Command line interface of the server binary
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "laundry-cart", version, about = "Laundry storefront cart service")]
pub struct CliConfig {
    /// Address to bind
    #[arg(long, env = "LAUNDRY_CART_HOST")]
    pub host: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long, env = "LAUNDRY_CART_PORT")]
    pub port: Option<u16>,

    /// TOML config file
    #[arg(short, long, env = "LAUNDRY_CART_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON catalog file; the bundled catalog is used when omitted
    #[arg(long, env = "LAUNDRY_CART_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Empty carts after a successful checkout (`--clear-on-checkout=false`
    /// turns a config file's setting off)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub clear_on_checkout: Option<bool>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

// =============================================================================
// Config File
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub server: ServerSection,
    pub order: OrderSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderSection {
    pub base_url: Option<String>,
    pub recipient: Option<String>,
    pub currency_symbol: Option<String>,

    /// Empty the cart once the hand-off link has been produced
    pub clear_on_checkout: Option<bool>,
}

impl OrderSection {
    /// Order settings with unset keys taken from the defaults.
    pub fn settings(&self) -> OrderSettings {
        let defaults = OrderSettings::default();
        OrderSettings {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            recipient: self.recipient.clone().unwrap_or(defaults.recipient),
            currency_symbol: self
                .currency_symbol
                .clone()
                .unwrap_or(defaults.currency_symbol),
        }
    }
}

impl StoreConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }
}

// =============================================================================
// Resolved Settings
// =============================================================================

/// Final configuration the server runs with
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub addr: SocketAddr,
    pub catalog: Option<PathBuf>,
    pub order: OrderSettings,
    pub clear_on_checkout: bool,
}

impl Settings {
    /// Reads the config file named by `cli` (if any) and applies CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed, or the
    /// merged values fail validation.
    pub fn resolve(cli: &CliConfig) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading config file");
                StoreConfig::load(path)?
            }
            None => StoreConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Merges CLI values over a parsed config file.
    pub fn merge(cli: &CliConfig, file: StoreConfig) -> Result<Self, ConfigError> {
        let host = cli
            .host
            .or(file.server.host)
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = cli.port.or(file.server.port).unwrap_or(DEFAULT_PORT);

        let settings = Self {
            addr: SocketAddr::new(host, port),
            catalog: cli.catalog.clone().or(file.server.catalog),
            order: file.order.settings(),
            clear_on_checkout: cli
                .clear_on_checkout
                .or(file.order.clear_on_checkout)
                .unwrap_or(false),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| ConfigError::Invalid {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        let base = self.order.base_url.trim();
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(invalid("order.base_url", "must start with http:// or https://"));
        }

        let recipient = &self.order.recipient;
        if recipient.is_empty() {
            return Err(invalid("order.recipient", "must not be empty"));
        }
        if recipient
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '&'))
        {
            return Err(invalid(
                "order.recipient",
                "must not contain whitespace or URL delimiters",
            ));
        }

        if self.order.currency_symbol.is_empty() {
            return Err(invalid("order.currency_symbol", "must not be empty"));
        }

        Ok(())
    }
}
