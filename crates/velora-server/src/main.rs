//! # Velora Commerce Server
//!
//! Main entry point for the Velora commerce backend. Owns the process
//! lifecycle: configuration, infrastructure wiring, cache backend
//! connect/disconnect, and graceful shutdown. The HTTP transport consumes
//! the wired services and lives outside this crate.

use tokio::signal;
use tracing::{error, info, warn};
use velora_config::ConfigLoader;
use velora_core::VeloraResult;

mod di;
mod startup;

use di::{CacheResolver, DatabaseResolver, ServiceResolver};

#[tokio::main]
async fn main() {
    init_logging();

    info!("Starting Velora Commerce Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> VeloraResult<()> {
    // Load configuration
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    startup::print_startup_info(&config);

    // Build DI module - centralized dependency injection
    let module = di::build_app_module(&config.database, &config.redis).await?;

    // Connect the cache backend explicitly. A cache outage is never fatal:
    // the policy layer degrades to data-source reads until reconnection.
    let cache_backend = module.cache_backend();
    if let Err(e) = cache_backend.connect().await {
        warn!(error = %e, "cache backend unreachable at startup, continuing without cache");
    }
    info!(
        cache_available = module.cache().is_available(),
        "Cache policy layer ready"
    );

    // Resolve the service layer; the transport in front of it is external.
    let _products = module.product_service();
    let _categories = module.category_service();
    let _carts = module.cart_service();
    let _orders = module.order_service();
    info!("Service layer wired: products, categories, carts, orders");

    info!("Velora Commerce ready");
    shutdown_signal().await;

    // Teardown in reverse order of startup; both closes are best-effort.
    cache_backend.disconnect().await;
    module.database_pool().close().await;

    info!("Shutdown complete");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,velora=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
