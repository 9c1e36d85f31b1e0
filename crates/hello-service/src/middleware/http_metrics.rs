//! HTTP metrics middleware for capturing all request/response metrics.
//!
//! Captures every response, including framework-level errors that occur
//! before a handler runs (404 Not Found, 405 Method Not Allowed) and
//! request timeouts.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

use crate::observability::metrics::record_http_request;
use crate::observability::MeterRegistry;

/// Middleware that records HTTP request metrics for all responses.
///
/// Applied as the outermost layer.
pub async fn http_metrics_middleware(
    State(registry): State<Arc<MeterRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    record_http_request(
        &registry,
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed(),
    );

    response
}
