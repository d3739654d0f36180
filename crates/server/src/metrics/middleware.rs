use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use http_body_util::BodyExt;
use std::time::Instant;

use super::registry::with_metrics;

/// Route label for requests that matched no registered route. Keeps 404 probes
/// from creating one series per path.
const UNMATCHED_ROUTE: &str = "<unmatched>";

fn is_metrics_path(path: &str) -> bool {
    path == "/metrics" || path == "/metrics.json"
}

/// Metrics middleware for tracking HTTP requests
pub async fn metrics_middleware(
    matched_path: Option<MatchedPath>,
    req: Request,
    next: Next,
) -> Response {
    if is_metrics_path(req.uri().path()) {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().to_string();
    let route = matched_path
        .as_ref()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status();
    let status_code = status.as_u16().to_string();

    // Buffer the body to measure it, then hand it back unchanged.
    let (parts, body) = response.into_parts();
    let bytes = body
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .unwrap_or_default();

    with_metrics(|metrics| {
        metrics.http_requests.inc();
        if status.is_client_error() || status.is_server_error() {
            metrics.http_request_error.inc();
        } else if status.is_success() {
            metrics.http_request_success.inc();
        }

        let labels = [method.as_str(), route.as_str(), status_code.as_str()];
        metrics
            .request_duration_seconds
            .with_label_values(&labels)
            .observe(duration);
        if !bytes.is_empty() {
            metrics
                .response_size_bytes
                .with_label_values(&labels)
                .observe(bytes.len() as f64);
        }
    });

    Response::from_parts(parts, Body::from(bytes))
}
