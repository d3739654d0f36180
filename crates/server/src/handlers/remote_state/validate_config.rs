// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::common::{RemoteStateRequest, ValidateResponse, read_config_values};
use crate::protocol::Diagnostics;
use axum::Json;

/// Handler for POST /v1/data-sources/remote-state/validate
///
/// Checks the config without contacting the state backend. Problems are reported
/// as diagnostics on a 200 response.
#[utoipa::path(
    post,
    path = "/v1/data-sources/remote-state/validate",
    tag = "remote-state",
    summary = "Validate data source config",
    description = "Checks that the config carries a non-empty organization and workspace.",
    request_body(content = Object, description = "Request with a 'config' object holding 'organization' and 'workspace'"),
    responses(
        (status = 200, description = "Validation diagnostics", body = Object),
        (status = 400, description = "Request body is not valid JSON"),
        (status = 422, description = "Request body has no 'config' field")
    )
)]
pub async fn validate_config(Json(request): Json<RemoteStateRequest>) -> Json<ValidateResponse> {
    let mut diagnostics = Diagnostics::new();
    if let Err(err) = read_config_values(&request.config) {
        tracing::debug!(error = %err, "Rejected data source config");
        diagnostics.push(err.to_diagnostic());
    }
    Json(ValidateResponse { diagnostics })
}
