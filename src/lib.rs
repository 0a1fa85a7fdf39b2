//! A development build harness for web assets: drives an external bundler,
//! serves the output directory over HTTP, and fronts it with a local
//! reverse proxy that normalizes CORS headers for browser clients.

pub mod bundler;
pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod proxy;
pub mod report;
pub mod run;
pub mod upstream;

pub use config::AppConfig;
pub use error::AppError;
pub use proxy::DevProxy;
