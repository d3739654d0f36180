use axum::{Router, routing::get};

use crate::{
    handlers::health,
    routes::{API_PREFIX, RegisterRoute, RouteRegistry},
    state::AppState,
};

pub fn routes(registry: &RouteRegistry) -> Router<AppState> {
    Router::new().route_registered(registry, API_PREFIX, "/health", "get", get(health::get_health))
}
