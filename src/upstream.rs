use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Response},
    routing::get,
    Router,
};
use bytes::Bytes;
use futures_util::StreamExt;
use std::convert::Infallible;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use tokio::{net::TcpListener, sync::broadcast};
use tokio_stream::wrappers::BroadcastStream;
use tower_http::services::ServeDir;
use tracing::{error, info};

use crate::error::AppError;

/// The static file server fronted by the dev proxy.
///
/// Serves the build output directory and exposes `/__livereload`, an
/// event-stream that emits once per successful rebuild. It binds an
/// ephemeral local port; callers learn the address from [`start`].
///
/// [`start`]: UpstreamServer::start
pub struct UpstreamServer {
    build_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
}

impl UpstreamServer {
    pub fn new(build_dir: PathBuf, reload_tx: broadcast::Sender<()>) -> Self {
        Self {
            build_dir,
            reload_tx,
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/__livereload", get(livereload))
            .fallback_service(ServeDir::new(&self.build_dir))
            .with_state(self.reload_tx.clone())
    }

    /// Binds `127.0.0.1:0` and serves on a background task, returning the
    /// discovered address.
    pub async fn start(self) -> Result<SocketAddr, AppError> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        let router = self.router();

        info!(%addr, dir = %self.build_dir.display(), "Serving build output");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!("Upstream static server error: {}", e);
            }
        });

        Ok(addr)
    }
}

async fn livereload(State(reload_tx): State<broadcast::Sender<()>>) -> Response<Body> {
    let events = BroadcastStream::new(reload_tx.subscribe()).filter_map(|event| async move {
        // A lagged receiver just skips; the page catches the next event.
        event
            .ok()
            .map(|_| Ok::<_, Infallible>(Bytes::from_static(b"data: reload\n\n")))
    });

    let mut response = Response::new(Body::from_stream(events));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/event-stream"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    response
}
