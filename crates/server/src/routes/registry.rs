//! Route registry for endpoint introspection.
//!
//! Routes are recorded as they are added to the router so the root endpoint
//! can list them.

use axum::{Router, routing::MethodRouter};
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Prefix every versioned route is nested under.
pub const API_PREFIX: &str = "/v1";

/// Information about a registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    /// Full path including the prefix (e.g., "/v1/health")
    pub path: String,
    /// Lowercase HTTP method (e.g., "get", "post")
    pub method: String,
}

/// A thread-safe registry of routes, shared by every clone.
#[derive(Clone, Default)]
pub struct RouteRegistry(Arc<RwLock<Vec<RouteInfo>>>);

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a route. Registering the same method and path twice keeps one entry.
    pub fn add(&self, path: &str, method: &str) {
        if let Ok(mut routes) = self.0.write() {
            let info = RouteInfo {
                path: path.to_string(),
                method: method.to_lowercase(),
            };
            if !routes.contains(&info) {
                routes.push(info);
            }
        }
    }

    /// All registered routes in registration order.
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.0.read().map(|r| r.clone()).unwrap_or_default()
    }
}

/// Extension trait for registering routes with automatic registry tracking.
pub trait RegisterRoute<S: Clone + Send + Sync + 'static> {
    /// Route `path` on this router and record `{prefix}{path}` in `registry`.
    ///
    /// The router itself is expected to be nested under `prefix`.
    fn route_registered(
        self,
        registry: &RouteRegistry,
        prefix: &str,
        path: &str,
        method: &str,
        handler: MethodRouter<S>,
    ) -> Self;
}

impl<S: Clone + Send + Sync + 'static> RegisterRoute<S> for Router<S> {
    fn route_registered(
        self,
        registry: &RouteRegistry,
        prefix: &str,
        path: &str,
        method: &str,
        handler: MethodRouter<S>,
    ) -> Self {
        registry.add(&format!("{}{}", prefix, path), method);
        self.route(path, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_routes() {
        let registry = RouteRegistry::new();
        let clone = registry.clone();
        clone.add("/v1/health", "GET");

        assert_eq!(
            registry.routes(),
            vec![RouteInfo {
                path: "/v1/health".to_string(),
                method: "get".to_string(),
            }]
        );
    }

    #[test]
    fn duplicate_routes_are_recorded_once() {
        let registry = RouteRegistry::new();
        registry.add("/v1/health", "get");
        registry.add("/v1/health", "get");
        registry.add("/v1/health", "post");
        assert_eq!(registry.routes().len(), 2);
    }
}
