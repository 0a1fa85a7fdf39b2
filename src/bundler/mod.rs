use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::info;

use crate::{config::AppConfig, error::AppError};

pub mod watcher;

/// Build profile selected by the entry point: `run_once` builds
/// `Production`, the dev server builds `Development`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildProfile {
    Production,
    Development,
}

/// Seam over the external bundler so the harness can be exercised with a
/// stub in tests.
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn build(&self, profile: BuildProfile) -> Result<(), AppError>;
}

/// Drives the configured bundler executable as a subprocess.
///
/// The bundler's own semantics (module resolution, minification, source
/// maps) stay opaque; only the exit status is interpreted.
pub struct CommandBundler {
    command: String,
    entry_points: Vec<PathBuf>,
    build_dir: PathBuf,
}

impl CommandBundler {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            command: config.bundler_command.clone(),
            entry_points: config.entry_points.clone(),
            build_dir: config.build_dir.clone(),
        }
    }

    fn args(&self, profile: BuildProfile) -> Vec<String> {
        let mut args: Vec<String> = self
            .entry_points
            .iter()
            .map(|entry| entry.display().to_string())
            .collect();
        args.push("--bundle".to_string());
        args.push(format!("--outdir={}", self.build_dir.display()));
        match profile {
            BuildProfile::Production => {
                args.push("--minify".to_string());
                args.push("--target=es2020".to_string());
            }
            BuildProfile::Development => {
                args.push("--sourcemap".to_string());
                args.push("--target=esnext".to_string());
            }
        }
        args
    }
}

#[async_trait]
impl Bundler for CommandBundler {
    async fn build(&self, profile: BuildProfile) -> Result<(), AppError> {
        info!(command = %self.command, ?profile, "Running bundler");
        let status = Command::new(&self.command)
            .args(self.args(profile))
            .status()
            .await?;
        if !status.success() {
            return Err(AppError::BundlerFailed(status));
        }
        Ok(())
    }
}
