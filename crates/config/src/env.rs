// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Flat view of the `RSA_*` environment, as `envy` sees it.
//!
//! `envy` can only fill a flat struct, so every variable lives here and
//! [`crate::RemoteStateConfig`] regroups them per concern.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct EnvVars {
    #[serde(default = "crate::express::default_bind_host")]
    pub express_bind_host: String,
    #[serde(default = "crate::express::default_port")]
    pub express_port: u16,
    #[serde(default = "crate::express::default_request_limit")]
    pub express_request_limit: usize,

    #[serde(default = "crate::log::default_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,
    #[serde(default)]
    pub log_strip_ansi: bool,
    #[serde(default)]
    pub log_write: bool,
    #[serde(default = "crate::log::default_write_path")]
    pub log_write_path: String,
    #[serde(default = "crate::log::default_write_max_file_size")]
    pub log_write_max_file_size: u64,
    #[serde(default = "crate::log::default_write_max_files")]
    pub log_write_max_files: usize,

    #[serde(default = "crate::tfe::default_address")]
    pub tfe_address: String,
    #[serde(default)]
    pub tfe_token: Option<String>,
    #[serde(default = "crate::tfe::default_request_timeout")]
    pub tfe_request_timeout: u64,

    #[serde(default)]
    pub metrics_enabled: bool,
    #[serde(default = "crate::metrics::default_prometheus_prefix")]
    pub metrics_prometheus_prefix: String,
    #[serde(default)]
    pub metrics_loki_url: Option<String>,
}
