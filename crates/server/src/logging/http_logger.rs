// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Access log middleware. Emits `METHOD /path STATUS DURATIONms` under the
/// `http` target.
///
/// - 1xx-3xx: DEBUG, visible with `RSA_LOG_LEVEL=http`
/// - 4xx: WARN
/// - 5xx: ERROR
pub async fn http_logger_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = match req.uri().query() {
        Some(query) => format!("{}?{}", req.uri().path(), query),
        None => req.uri().path().to_string(),
    };
    let start = Instant::now();

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    match status {
        400..=499 => tracing::warn!(
            target: "http",
            method = %method,
            path = %path,
            status,
            duration_ms,
            "{method} {path} {status} {duration_ms}ms"
        ),
        500.. => tracing::error!(
            target: "http",
            method = %method,
            path = %path,
            status,
            duration_ms,
            "{method} {path} {status} {duration_ms}ms"
        ),
        _ => tracing::debug!(
            target: "http",
            method = %method,
            path = %path,
            status,
            duration_ms,
            "{method} {path} {status} {duration_ms}ms"
        ),
    }

    response
}
