use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        "laundry_cart_rust=debug,info"
    } else {
        "laundry_cart_rust=info,warn"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logger(verbose: bool, json: bool) {
    let registry = tracing_subscriber::registry().with(env_filter(verbose));

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }
}
