use asset_dev_gateway::bundler::watcher::SourceWatcher;
use asset_dev_gateway::bundler::{BuildProfile, Bundler};
use asset_dev_gateway::{run, AppConfig, AppError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::timeout;

fn config_with_bundler(command: &str) -> AppConfig {
    AppConfig {
        port: 3000,
        host: "127.0.0.1".to_string(),
        build_dir: PathBuf::from("dist"),
        entry_points: vec![PathBuf::from("src/index.js")],
        bundler_command: command.to_string(),
        production: true,
    }
}

#[tokio::test]
async fn run_once_succeeds_when_the_bundler_does() {
    let config = config_with_bundler("true");
    assert!(run::run_once(&config).await.is_ok());
}

#[tokio::test]
async fn run_once_propagates_bundler_failure() {
    let config = config_with_bundler("false");
    assert!(matches!(
        run::run_once(&config).await,
        Err(AppError::BundlerFailed(_))
    ));
}

struct StubBundler {
    builds: Arc<AtomicUsize>,
}

#[async_trait]
impl Bundler for StubBundler {
    async fn build(&self, _profile: BuildProfile) -> Result<(), AppError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn watcher_rebuilds_and_broadcasts_on_source_change() {
    let src = tempfile::tempdir().expect("tempdir");
    let builds = Arc::new(AtomicUsize::new(0));
    let bundler: Arc<dyn Bundler> = Arc::new(StubBundler {
        builds: builds.clone(),
    });

    let (reload_tx, mut reload_rx) = broadcast::channel(4);
    let _watcher = SourceWatcher::start(vec![src.path().to_path_buf()], bundler, reload_tx)
        .expect("start watcher");

    // Let the watcher register before the change lands.
    tokio::time::sleep(Duration::from_millis(200)).await;
    std::fs::write(src.path().join("index.js"), "export {}").expect("write source");

    timeout(Duration::from_secs(10), reload_rx.recv())
        .await
        .expect("reload event within deadline")
        .expect("channel open");
    assert!(builds.load(Ordering::SeqCst) >= 1);
}
