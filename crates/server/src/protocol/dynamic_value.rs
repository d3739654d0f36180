// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::json::{marshal, unmarshal};
use super::{JsonError, Type, Value};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// A protocol value encoded as JSON against a schema type.
///
/// Serializes as the embedded JSON document itself, not as a byte array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicValue {
    json: Vec<u8>,
}

impl DynamicValue {
    pub fn new(value: &Value, schema_type: &Type) -> Result<Self, JsonError> {
        Ok(Self {
            json: marshal(value, schema_type)?,
        })
    }

    pub fn from_json(json: Vec<u8>) -> Self {
        Self { json }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.json
    }

    pub fn unmarshal(&self, schema_type: &Type) -> Result<Value, JsonError> {
        unmarshal(&self.json, schema_type)
    }
}

impl Serialize for DynamicValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw: &RawValue = serde_json::from_slice(&self.json).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DynamicValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Self::from_json(raw.get().as_bytes().to_vec()))
    }
}
