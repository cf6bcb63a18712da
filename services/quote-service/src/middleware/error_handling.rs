use axum::{
    http::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::metrics::REQUEST_DURATION_SECONDS;

/// Records latency for every request and logs failed ones.
pub async fn error_handling_middleware(request: Request<axum::body::Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    REQUEST_DURATION_SECONDS
        .with_label_values(&[method.as_str(), status.as_str()])
        .observe(started.elapsed().as_secs_f64());

    if status.is_server_error() {
        tracing::error!(%method, path = %path, status = status.as_u16(), "Request failed");
    } else if status.is_client_error() {
        tracing::debug!(%method, path = %path, status = status.as_u16(), "Client error");
    }

    response
}
