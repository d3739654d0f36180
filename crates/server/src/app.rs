// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{
    logging::http_logger_middleware, metrics, openapi::ApiDoc, routes, state::AppState,
};
use axum::{Json, Router, middleware, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Assemble the router: versioned API routes, the root listing, the OpenAPI
/// document and, when enabled, metrics.
///
/// The metrics middleware is a route layer so it sees the matched route
/// template; requests that match nothing are not timed.
pub fn create_app(state: AppState) -> Router {
    let registry = &state.route_registry;

    let v1 = Router::new()
        .merge(routes::health::routes(registry))
        .merge(routes::remote_state::routes(registry));

    let mut app = Router::new()
        .route("/", get(routes::root::root_handler))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest(routes::API_PREFIX, v1);

    if state.config.metrics.enabled {
        app = app
            .merge(routes::metrics::routes())
            .route_layer(middleware::from_fn(metrics::metrics_middleware));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(RequestBodyLimitLayer::new(state.config.express.request_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(http_logger_middleware))
        .with_state(state)
}
