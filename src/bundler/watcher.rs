//! Source watcher for watch-and-serve mode.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info};

use super::{BuildProfile, Bundler};

/// Watches the entry-point source trees and rebuilds on change.
pub struct SourceWatcher;

impl SourceWatcher {
    /// Start watching the given roots. Rebuilds run on a background task;
    /// each successful rebuild broadcasts a live-reload event.
    ///
    /// The returned watcher must be kept alive for events to keep flowing.
    pub fn start(
        roots: Vec<PathBuf>,
        bundler: Arc<dyn Bundler>,
        reload_tx: broadcast::Sender<()>,
    ) -> Result<RecommendedWatcher, notify::Error> {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove() {
                        let _ = tx.send(());
                    }
                }
                Err(e) => error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;

        for root in &roots {
            watcher.watch(root, RecursiveMode::Recursive)?;
            info!(path = ?root, "Watching for changes");
        }

        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                // A burst of saves collapses into one rebuild.
                while rx.try_recv().is_ok() {}
                match bundler.build(BuildProfile::Development).await {
                    Ok(()) => {
                        info!("Rebuild complete");
                        let _ = reload_tx.send(());
                    }
                    Err(e) => error!("Rebuild failed: {}", e),
                }
            }
        });

        Ok(watcher)
    }
}

/// Unique parent directories of the entry points; the roots the watcher
/// monitors.
pub fn watch_roots(entry_points: &[PathBuf]) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();
    for entry in entry_points {
        let parent = entry
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if !roots.contains(&parent) {
            roots.push(parent);
        }
    }
    roots
}
