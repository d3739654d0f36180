// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Type;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Serialize)]
pub struct SchemaAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
}

/// Schema of a data source or resource.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub version: i64,
    pub description: String,
    pub attributes: Vec<SchemaAttribute>,
}

impl Schema {
    /// Object type that config and state values of this schema conform to.
    /// Attributes that are not required may be omitted.
    pub fn value_type(&self) -> Type {
        let attribute_types: BTreeMap<String, Type> = self
            .attributes
            .iter()
            .map(|attribute| (attribute.name.clone(), attribute.ty.clone()))
            .collect();
        let optional_attributes: BTreeSet<String> = self
            .attributes
            .iter()
            .filter(|attribute| !attribute.required)
            .map(|attribute| attribute.name.clone())
            .collect();

        Type::Object {
            attribute_types,
            optional_attributes,
        }
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}
