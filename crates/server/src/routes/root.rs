//! Root endpoint handler.
//!
//! Returns API information and the list of registered routes.

use crate::state::AppState;
use axum::{Json, extract::State};
use serde_json::{Value, json};

/// Handler for GET /
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    let routes = state.route_registry.routes();

    Json(json!({
        "docs": "https://github.com/paritytech/remote-state-api",
        "github": "https://github.com/paritytech/remote-state-api",
        "version": env!("CARGO_PKG_VERSION"),
        "listen": format!("{}:{}", state.config.express.bind_host, state.config.express.port),
        "tfe": state.config.tfe.address,
        "routes": routes
    }))
}
