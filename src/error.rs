use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::{convert::Infallible, io, process::ExitStatus};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Request to upstream failed: {0}")]
    UpstreamError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Axum error: {0}")]
    AxumError(#[from] axum::Error),

    #[error("Invalid header value")]
    InvalidHeader,

    #[error("Bundler exited with {0}")]
    BundlerFailed(ExitStatus),

    #[error("Watcher error: {0}")]
    WatchError(#[from] notify::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::UpstreamError(e) => (
                StatusCode::BAD_GATEWAY,
                format!("Upstream request failed: {}", e),
            ),
            AppError::IoError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {}", e),
            ),
            AppError::AxumError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server error: {}", e),
            ),
            AppError::InvalidHeader => (
                StatusCode::BAD_REQUEST,
                "Invalid header value".to_string(),
            ),
            AppError::BundlerFailed(status) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Bundler exited with {}", status),
            ),
            AppError::WatchError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Watcher error: {}", e),
            ),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": format!("{:?}", self),
            }
        }));

        (status, body).into_response()
    }
}

impl From<Infallible> for AppError {
    fn from(_: Infallible) -> Self {
        unreachable!("Infallible error cannot occur")
    }
}
