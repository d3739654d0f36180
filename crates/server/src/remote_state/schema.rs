// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::protocol::{Schema, SchemaAttribute, Type};

pub const ATTR_ORGANIZATION: &str = "organization";
pub const ATTR_WORKSPACE: &str = "workspace";
pub const ATTR_VALUES: &str = "values";

/// Schema of the remote state data source.
pub fn data_source_schema() -> Schema {
    Schema {
        version: 0,
        description: "Reads the output values of a workspace's current remote state.".to_string(),
        attributes: vec![
            SchemaAttribute {
                name: ATTR_ORGANIZATION.to_string(),
                ty: Type::String,
                description: "Name of the organization that owns the workspace.".to_string(),
                required: true,
                optional: false,
                computed: false,
                sensitive: false,
            },
            SchemaAttribute {
                name: ATTR_WORKSPACE.to_string(),
                ty: Type::String,
                description: "Name of the workspace to read state from.".to_string(),
                required: true,
                optional: false,
                computed: false,
                sensitive: false,
            },
            SchemaAttribute {
                name: ATTR_VALUES.to_string(),
                ty: Type::DynamicPseudoType,
                description: "Output values of the current state, keyed by output name.".to_string(),
                required: false,
                optional: false,
                computed: true,
                sensitive: false,
            },
        ],
    }
}
