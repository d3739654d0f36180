// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::routes::RouteRegistry;
use crate::tfe::{FetchError, StateFetcher, TfeClient};
use config::RemoteStateConfig;
use std::sync::Arc;

/// Shared handler state. Cloned per request, so everything heavy sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RemoteStateConfig>,
    pub fetcher: Arc<dyn StateFetcher>,
    pub route_registry: RouteRegistry,
}

impl AppState {
    /// Build state backed by a [`TfeClient`] for the configured address.
    pub fn new(config: RemoteStateConfig) -> Result<Self, FetchError> {
        let client = TfeClient::new(&config.tfe)?;
        tracing::debug!(address = %client.address(), "TFE client ready");
        Ok(Self::with_fetcher(config, Arc::new(client)))
    }

    pub fn with_fetcher(config: RemoteStateConfig, fetcher: Arc<dyn StateFetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
            route_registry: RouteRegistry::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::TfeConfig;

    #[test]
    fn new_rejects_unusable_address() {
        let config = RemoteStateConfig {
            tfe: TfeConfig {
                address: "not a url".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(AppState::new(config), Err(FetchError::Setup(_))));
    }

    #[test]
    fn new_uses_default_address() {
        let state = AppState::new(RemoteStateConfig::default()).unwrap();
        assert!(state.route_registry.routes().is_empty());
        assert_eq!(state.config.tfe.address, "https://app.terraform.io");
    }
}
