use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::IntoResponse,
};
use std::net::SocketAddr;

use crate::proxy::forward_to_upstream;

pub async fn proxy_request(
    State(upstream): State<SocketAddr>,
    request: Request<Body>,
) -> impl IntoResponse {
    match forward_to_upstream(upstream, request).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!("Proxy error: {:?}", e);
            e.into_response()
        }
    }
}
