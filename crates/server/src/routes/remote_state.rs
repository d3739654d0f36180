// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    handlers::remote_state,
    routes::{API_PREFIX, RegisterRoute, RouteRegistry},
    state::AppState,
};

pub fn routes(registry: &RouteRegistry) -> Router<AppState> {
    Router::new()
        .route_registered(
            registry,
            API_PREFIX,
            "/data-sources/remote-state/schema",
            "get",
            get(remote_state::get_schema),
        )
        .route_registered(
            registry,
            API_PREFIX,
            "/data-sources/remote-state/validate",
            "post",
            post(remote_state::validate_config),
        )
        .route_registered(
            registry,
            API_PREFIX,
            "/data-sources/remote-state/read",
            "post",
            post(remote_state::read_data_source),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_prefixed_paths() {
        let registry = RouteRegistry::new();
        let _ = routes(&registry);

        let registered: Vec<(String, String)> = registry
            .routes()
            .into_iter()
            .map(|route| (route.method, route.path))
            .collect();
        assert_eq!(
            registered,
            vec![
                ("get".to_string(), "/v1/data-sources/remote-state/schema".to_string()),
                ("post".to_string(), "/v1/data-sources/remote-state/validate".to_string()),
                ("post".to_string(), "/v1/data-sources/remote-state/read".to_string()),
            ]
        );
    }
}
