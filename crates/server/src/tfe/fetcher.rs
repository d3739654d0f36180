// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Workspace '{workspace}' not found in organization '{organization}'.")]
    WorkspaceNotFound {
        organization: String,
        workspace: String,
    },

    #[error("Current remote state for workspace '{workspace}' not found.")]
    StateNotFound { workspace: String },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned unexpected status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    #[error("Invalid TFE client setup: {0}")]
    Setup(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FetchError::WorkspaceNotFound { .. } | FetchError::StateNotFound { .. }
        )
    }
}

/// Looks up a workspace and returns the raw bytes of its current state.
#[async_trait]
pub trait StateFetcher: Send + Sync {
    async fn fetch_current_state(
        &self,
        organization: &str,
        workspace: &str,
    ) -> Result<Vec<u8>, FetchError>;
}
