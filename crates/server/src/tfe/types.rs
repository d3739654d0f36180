// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON:API documents returned by the TFE v2 API. Only the fields read by the
//! client are modelled.

use serde::Deserialize;

pub(crate) const WORKSPACE_KIND: &str = "workspaces";
pub(crate) const STATE_VERSION_KIND: &str = "state-versions";

#[derive(Debug, Deserialize)]
pub(crate) struct Document<T> {
    pub data: Resource<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Resource<T> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct WorkspaceAttributes {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct StateVersionAttributes {
    #[serde(default)]
    pub serial: Option<i64>,
    #[serde(default)]
    pub hosted_state_download_url: Option<String>,
}
