//! The fixed CORS policy the dev proxy stamps onto every response.
//!
//! The upstream static server may emit its own (default or duplicate) CORS
//! headers; everything it says about cross-origin access is discarded and
//! replaced with this permissive development policy.

use axum::body::Body;
use http::{HeaderMap, HeaderValue, Response};

/// Lowercase names of the CORS headers this proxy owns.
pub mod headers {
    /// `Access-Control-Allow-Origin` header.
    pub const ALLOW_ORIGIN: &str = "access-control-allow-origin";
    /// `Access-Control-Allow-Methods` header.
    pub const ALLOW_METHODS: &str = "access-control-allow-methods";
    /// `Access-Control-Allow-Headers` header.
    pub const ALLOW_HEADERS: &str = "access-control-allow-headers";
    /// `Access-Control-Allow-Private-Network` header.
    pub const ALLOW_PRIVATE_NETWORK: &str = "access-control-allow-private-network";
    /// `Access-Control-Max-Age` header (preflight responses only).
    pub const MAX_AGE: &str = "access-control-max-age";
}

const ALLOW_ORIGIN_VALUE: &str = "*";
const ALLOW_METHODS_VALUE: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS_VALUE: &str = "Content-Type, Access-Control-Request-Private-Network";
const ALLOW_PRIVATE_NETWORK_VALUE: &str = "true";
const MAX_AGE_VALUE: &str = "86400";

/// Drops any pre-existing CORS headers and stamps the fixed set on top.
///
/// Removing before inserting keeps the final header map free of duplicate
/// `Access-Control-*` values no matter what upstream sent.
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.remove(headers::ALLOW_ORIGIN);
    headers.remove(headers::ALLOW_METHODS);
    headers.remove(headers::ALLOW_HEADERS);
    headers.remove(headers::ALLOW_PRIVATE_NETWORK);

    headers.insert(
        headers::ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN_VALUE),
    );
    headers.insert(
        headers::ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS_VALUE),
    );
    headers.insert(
        headers::ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS_VALUE),
    );
    headers.insert(
        headers::ALLOW_PRIVATE_NETWORK,
        HeaderValue::from_static(ALLOW_PRIVATE_NETWORK_VALUE),
    );
}

/// Builds the short-circuit response for a CORS preflight request.
///
/// 200, empty body, the full permissive header set plus a 24h preflight
/// cache. Never touches upstream.
pub fn preflight_response() -> Response<Body> {
    let mut response = Response::new(Body::empty());
    apply_cors_headers(response.headers_mut());
    response
        .headers_mut()
        .insert(headers::MAX_AGE, HeaderValue::from_static(MAX_AGE_VALUE));
    response
}
