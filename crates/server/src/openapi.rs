// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Remote State API",
        version = "0.1.0",
        description = "Reads the outputs of a Terraform workspace's current remote state and returns them as dynamically typed values with diagnostics.",
        license(name = "GPL-3.0-or-later"),
        contact(url = "https://github.com/paritytech/remote-state-api")
    ),
    servers(
        (url = "http://localhost:8080", description = "Localhost")
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "remote-state", description = "Remote state data source: schema, config validation and reads"),
    ),
    paths(
        crate::handlers::health::get_health::get_health,
        crate::handlers::remote_state::get_schema::get_schema,
        crate::handlers::remote_state::validate_config::validate_config,
        crate::handlers::remote_state::read::read_data_source,
    ),
)]
pub struct ApiDoc;
