//! Per-request correlation IDs.
//!
//! Every response carries an `x-request-id`. A load balancer in front of the
//! storefront may already have assigned one; it is kept if it is a printable
//! header value of at most [`MAX_REQUEST_ID_LEN`] bytes. Otherwise the
//! storefront mints a UUID v4. The same ID lands in the `http_request` span
//! and as a Sentry tag, so a log line, a Sentry event and a customer's
//! response headers can be matched up.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the correlation ID in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID reused verbatim.
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// The upstream ID from `headers` when usable, else a fresh UUID.
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned)
}

/// Tag the request with its correlation ID and echo it on the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", &request_id));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
