// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::common::{
    CONFIG_ERROR_OUTCOME, ReadResponse, RemoteStateRequest, read_config_values,
};
use crate::metrics;
use crate::protocol::{Diagnostics, DynamicValue};
use crate::remote_state::{RemoteStateError, read_remote_state};
use crate::state::AppState;
use crate::tfe::StateFetcher;
use axum::{Json, extract::State};
use tracing::Instrument;

/// Handler for POST /v1/data-sources/remote-state/read
///
/// Every outcome is a 200. Failures leave `state` null and carry one error
/// diagnostic; no partial state is ever returned.
#[utoipa::path(
    post,
    path = "/v1/data-sources/remote-state/read",
    tag = "remote-state",
    summary = "Read remote state",
    description = "Fetches the current state of a workspace and returns its outputs as a dynamically typed object with 'workspace', 'organization' and 'values' attributes.",
    request_body(content = Object, description = "Request with a 'config' object holding 'organization' and 'workspace'"),
    responses(
        (status = 200, description = "Encoded state and diagnostics", body = Object),
        (status = 400, description = "Request body is not valid JSON"),
        (status = 422, description = "Request body has no 'config' field")
    )
)]
pub async fn read_data_source(
    State(state): State<AppState>,
    Json(request): Json<RemoteStateRequest>,
) -> Json<ReadResponse> {
    let mut diagnostics = Diagnostics::new();

    let (organization, workspace) = match read_config_values(&request.config) {
        Ok(values) => values,
        Err(err) => {
            tracing::warn!(error = %err, "Invalid data source config");
            metrics::record_remote_state_read(CONFIG_ERROR_OUTCOME, None);
            diagnostics.push(err.to_diagnostic());
            return Json(ReadResponse::failed(diagnostics));
        }
    };

    let span = tracing::info_span!(
        "remote_state_read",
        organization = %organization,
        workspace = %workspace
    );

    async move {
        match read_state(state.fetcher.as_ref(), &organization, &workspace).await {
            Ok((encoded, outputs)) => {
                tracing::info!(outputs, "Read remote state");
                metrics::record_remote_state_read("ok", Some(outputs));
                Json(ReadResponse {
                    state: Some(encoded),
                    diagnostics,
                })
            }
            Err(err) => {
                match &err {
                    RemoteStateError::Fetch(fetch) if fetch.is_not_found() => {
                        tracing::warn!(error = %err, "Remote state unavailable")
                    }
                    _ => tracing::error!(error = %err, "Failed to read remote state"),
                }
                metrics::record_remote_state_read(err.outcome(), None);
                diagnostics.push(err.to_diagnostic());
                Json(ReadResponse::failed(diagnostics))
            }
        }
    }
    .instrument(span)
    .await
}

async fn read_state(
    fetcher: &dyn StateFetcher,
    organization: &str,
    workspace: &str,
) -> Result<(DynamicValue, usize), RemoteStateError> {
    let aggregate = read_remote_state(fetcher, organization, workspace).await?;
    let outputs = aggregate.output_count();
    Ok((aggregate.into_dynamic_value()?, outputs))
}
