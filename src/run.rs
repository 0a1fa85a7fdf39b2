//! The two entry points behind the `BUILD_ENV` switch.

use std::sync::Arc;
use tokio::{net::TcpListener, signal, sync::broadcast};
use tracing::{debug, error, info, warn};

use crate::{
    bundler::{
        watcher::{watch_roots, SourceWatcher},
        BuildProfile, Bundler, CommandBundler,
    },
    config::AppConfig,
    error::AppError,
    proxy::DevProxy,
    report,
    upstream::UpstreamServer,
};

/// One-shot production build. A bundler failure propagates so the caller
/// can exit non-zero instead of leaving a partial output directory behind
/// silently.
pub async fn run_once(config: &AppConfig) -> Result<(), AppError> {
    CommandBundler::new(config)
        .build(BuildProfile::Production)
        .await
}

/// Watch-and-serve development mode: initial build, upstream static server
/// on an ephemeral port, source watcher, then the CORS proxy on the public
/// port until a shutdown signal arrives.
pub async fn run_dev_server(config: AppConfig) -> Result<(), AppError> {
    let bundler: Arc<dyn Bundler> = Arc::new(CommandBundler::new(&config));

    // A broken initial build must not keep the dev server from starting;
    // the next successful rebuild repairs the output directory.
    if let Err(e) = bundler.build(BuildProfile::Development).await {
        error!("Initial build failed: {}", e);
    }

    let (reload_tx, _) = broadcast::channel(16);

    let upstream_addr = UpstreamServer::new(config.build_dir.clone(), reload_tx.clone())
        .start()
        .await?;

    let _watcher = SourceWatcher::start(watch_roots(&config.entry_points), bundler, reload_tx)?;

    if let Err(e) = report::print_served_files(&config.build_dir, &config.serve_origin()) {
        warn!("Could not list served files: {}", e);
    }

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Dev proxy listening on {}", config.serve_origin());

    let router = DevProxy::new(upstream_addr).router();
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler")
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {
            debug!("CTRL+C signal received");
        },
        _ = terminate => {
            debug!("Terminate signal received");
        },
    }
    info!("Shutdown signal received, starting graceful shutdown");
}
