use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use std::net::SocketAddr;
use tracing::debug;

use crate::{cors, error::AppError, handlers};

mod client;
pub use client::CLIENT;

/// The CORS-normalizing reverse proxy fronting the upstream static server.
///
/// Every instance is self-contained: construct one per listener, including
/// several in the same process.
#[derive(Debug, Clone, Copy)]
pub struct DevProxy {
    upstream: SocketAddr,
}

impl DevProxy {
    pub fn new(upstream: SocketAddr) -> Self {
        Self { upstream }
    }

    /// Router that forwards any path and method to the upstream server.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback(handlers::proxy_request)
            .with_state(self.upstream)
    }
}

/// Forwards one client request to the upstream server and rewrites the
/// response to carry the fixed CORS header set.
///
/// `OPTIONS` requests short-circuit to a canned preflight response without
/// contacting upstream; esbuild-style static servers do not answer
/// preflights themselves.
pub async fn forward_to_upstream(
    upstream: SocketAddr,
    request: Request<Body>,
) -> Result<Response<Body>, AppError> {
    if request.method() == Method::OPTIONS {
        debug!(path = %request.uri().path(), "Answering CORS preflight locally");
        return Ok(cors::preflight_response());
    }

    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("http://{}{}", upstream, path_and_query);
    debug!(method = %request.method(), %url, "Forwarding request upstream");

    let (parts, body) = request.into_parts();

    // The client re-frames the streamed body itself, so the original
    // framing headers must not travel with the copy.
    let mut headers = parts.headers;
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::CONNECTION);

    let upstream_response = CLIENT
        .request(parts.method, url)
        .headers(headers)
        .body(reqwest::Body::wrap_stream(body.into_data_stream()))
        .send()
        .await?;

    Ok(into_client_response(upstream_response))
}

/// Copies status and headers from the upstream response, normalizes the
/// CORS set exactly once, and passes the body through as a byte stream.
fn into_client_response(upstream_response: reqwest::Response) -> Response<Body> {
    let status = upstream_response.status();

    let mut headers = upstream_response.headers().clone();
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::CONNECTION);
    cors::apply_cors_headers(&mut headers);

    let mut response = Response::new(Body::from_stream(upstream_response.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
