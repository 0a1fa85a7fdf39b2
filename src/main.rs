use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asset_dev_gateway::{config::AppConfig, run};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    // Load configuration
    info!("Loading application configuration");
    let config = AppConfig::new();
    debug!(
        "Configuration loaded: port={}, host={}, production={}",
        config.port, config.host, config.production
    );

    if config.production {
        if let Err(e) = run::run_once(&config).await {
            error!("Build failed: {}", e);
            std::process::exit(1);
        }
    } else if let Err(e) = run::run_dev_server(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
