use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for the build harness and the dev proxy.
///
/// An explicit value rather than a process-wide singleton, so servers can
/// be constructed several times in one process (tests bind port 0).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub host: String,
    pub build_dir: PathBuf,
    pub entry_points: Vec<PathBuf>,
    pub bundler_command: String,
    pub production: bool,
}

impl AppConfig {
    pub fn new() -> Self {
        dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a number"),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            build_dir: env::var("BUILD_DIR")
                .unwrap_or_else(|_| "dist".to_string())
                .into(),
            entry_points: env::var("ENTRY_POINTS")
                .unwrap_or_else(|_| "src/index.js".to_string())
                .split(',')
                .map(|entry| PathBuf::from(entry.trim()))
                .filter(|entry| !entry.as_os_str().is_empty())
                .collect(),
            bundler_command: env::var("BUNDLER_CMD").unwrap_or_else(|_| "esbuild".to_string()),
            production: env::var("BUILD_ENV")
                .map(|v| v == "production")
                .unwrap_or(false),
        }
    }

    /// The origin browsers use to reach served assets, e.g. `http://127.0.0.1:3000`.
    pub fn serve_origin(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
