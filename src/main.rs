use anyhow::Context;
use clap::Parser;
use laundry_cart_rust::cart::AppState;
use laundry_cart_rust::catalog::Catalog;
use laundry_cart_rust::config::{CliConfig, Settings};
use laundry_cart_rust::logger;
use laundry_cart_rust::router::create_app_router;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    logger::init_logger(cli.verbose, cli.json_logs);

    let settings = Settings::resolve(&cli).context("invalid configuration")?;
    tracing::debug!(?settings, "resolved settings");

    // Catalog is validated up front; malformed data stops the server here.
    let catalog = match &settings.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => Catalog::bundled().context("bundled catalog is invalid")?,
    };
    tracing::info!(providers = catalog.len(), "catalog ready");

    // Initialize application state
    let state = Arc::new(
        AppState::new(catalog)
            .with_order_settings(settings.order.clone())
            .with_clear_on_checkout(settings.clear_on_checkout),
    );

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let listener = tokio::net::TcpListener::bind(settings.addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.addr))?;
    tracing::info!(addr = %settings.addr, "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
