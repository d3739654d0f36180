// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::types::{
    Document, STATE_VERSION_KIND, StateVersionAttributes, WORKSPACE_KIND, WorkspaceAttributes,
};
use super::{FetchError, StateFetcher};
use async_trait::async_trait;
use config::TfeConfig;
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// HTTP client for the Terraform Cloud / Enterprise v2 API.
#[derive(Clone)]
pub struct TfeClient {
    http: Client,
    address: Url,
    token: Option<String>,
}

impl TfeClient {
    pub fn new(config: &TfeConfig) -> Result<Self, FetchError> {
        let address = Url::parse(&config.address)
            .map_err(|e| FetchError::Setup(format!("invalid address '{}': {e}", config.address)))?;
        if address.cannot_be_a_base() {
            return Err(FetchError::Setup(format!(
                "address '{}' cannot be used as a base URL",
                config.address
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| FetchError::Setup(e.to_string()))?;

        Ok(Self {
            http,
            address,
            token: config.token.clone(),
        })
    }

    pub fn address(&self) -> &Url {
        &self.address
    }

    /// `{address}/api/v2/{segments...}` with every segment percent-encoded.
    fn api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.address.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v2"]).extend(segments);
        }
        url
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response, FetchError> {
        let mut request = self
            .http
            .get(url.clone())
            .header(header::CONTENT_TYPE, JSON_API_CONTENT_TYPE);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        request.send().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }

    async fn get_document<T: DeserializeOwned>(
        &self,
        url: &Url,
        kind: &str,
        not_found: impl FnOnce() -> FetchError,
    ) -> Result<Document<T>, FetchError> {
        let response = self.get(url).await?;
        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(not_found()),
            status => {
                return Err(FetchError::UnexpectedStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
        }

        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        let invalid = |reason: String| FetchError::InvalidResponse {
            url: url.to_string(),
            reason,
        };
        let doc: Document<T> = serde_json::from_slice(&body).map_err(|e| invalid(e.to_string()))?;
        if doc.data.kind != kind {
            return Err(invalid(format!(
                "expected resource type '{kind}', found '{}'",
                doc.data.kind
            )));
        }
        Ok(doc)
    }

    async fn read_workspace_id(&self, organization: &str, workspace: &str) -> Result<String, FetchError> {
        let url = self.api_url(&["organizations", organization, "workspaces", workspace]);
        let doc: Document<WorkspaceAttributes> = self
            .get_document(&url, WORKSPACE_KIND, || FetchError::WorkspaceNotFound {
                organization: organization.to_string(),
                workspace: workspace.to_string(),
            })
            .await?;

        tracing::debug!(
            workspace = %doc.data.attributes.name,
            workspace_id = %doc.data.id,
            "Resolved workspace"
        );
        Ok(doc.data.id)
    }

    async fn read_download_url(&self, workspace_id: &str, workspace: &str) -> Result<Url, FetchError> {
        let url = self.api_url(&["workspaces", workspace_id, "current-state-version"]);
        let doc: Document<StateVersionAttributes> = self
            .get_document(&url, STATE_VERSION_KIND, || FetchError::StateNotFound {
                workspace: workspace.to_string(),
            })
            .await?;

        tracing::debug!(
            state_version = %doc.data.id,
            serial = ?doc.data.attributes.serial,
            "Read current state version"
        );

        let download_url = doc
            .data
            .attributes
            .hosted_state_download_url
            .ok_or_else(|| FetchError::InvalidResponse {
                url: url.to_string(),
                reason: "state version has no hosted-state-download-url".to_string(),
            })?;

        self.address
            .join(&download_url)
            .map_err(|e| FetchError::InvalidResponse {
                url: url.to_string(),
                reason: format!("invalid download URL '{download_url}': {e}"),
            })
    }

    async fn download(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl StateFetcher for TfeClient {
    async fn fetch_current_state(
        &self,
        organization: &str,
        workspace: &str,
    ) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(organization, workspace, "Reading workspace");
        let workspace_id = self.read_workspace_id(organization, workspace).await?;

        let download_url = self.read_download_url(&workspace_id, workspace).await?;

        tracing::debug!("Downloading state version");
        let state = self.download(&download_url).await?;
        tracing::debug!(bytes = state.len(), "Downloaded state version");
        Ok(state)
    }
}
