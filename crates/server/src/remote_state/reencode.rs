// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Carrying reconstructed outputs over to protocol values.
//!
//! Each output crosses as canonical bytes: its concrete type descriptor is
//! parsed by the protocol type parser and its JSON encoding is decoded against
//! that type. No direct conversion between the two type models exists.

use super::schema::{ATTR_ORGANIZATION, ATTR_VALUES, ATTR_WORKSPACE, data_source_schema};
use super::{OutputCollection, RemoteStateError};
use crate::protocol::{self, DynamicValue, JsonError, RawState, TypeError, ValueError, ValueInner};
use crate::state_value::{self, MarshalError};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReencodingError {
    #[error("output \"{output}\": cannot serialize type: {source}")]
    TypeBytes {
        output: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("output \"{output}\": type rejected by protocol: {source}")]
    ProtocolType {
        output: String,
        #[source]
        source: TypeError,
    },

    #[error("output \"{output}\": cannot serialize value: {source}")]
    ValueBytes {
        output: String,
        #[source]
        source: MarshalError,
    },

    #[error("output \"{output}\": value rejected by protocol: {source}")]
    ProtocolValue {
        output: String,
        #[source]
        source: JsonError,
    },

    #[error("cannot assemble state object: {0}")]
    Assemble(#[source] ValueError),

    #[error("cannot encode state object: {0}")]
    Encode(#[source] JsonError),
}

/// The data source result: the workspace coordinates and every output value.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStateValue {
    pub workspace: String,
    pub organization: String,
    /// Protocol object with one attribute per output.
    pub values: protocol::Value,
    /// Names of outputs marked sensitive in state.
    pub sensitive_outputs: BTreeSet<String>,
}

impl AggregateStateValue {
    pub fn output_count(&self) -> usize {
        match self.values.inner() {
            ValueInner::Map(attributes) => attributes.len(),
            _ => 0,
        }
    }

    /// Object value conforming to the data source schema.
    pub fn into_value(self) -> Result<protocol::Value, ReencodingError> {
        let string = |s: String| {
            protocol::Value::new(protocol::Type::String, ValueInner::String(s))
                .map_err(ReencodingError::Assemble)
        };
        let attributes = BTreeMap::from([
            (ATTR_WORKSPACE.to_string(), string(self.workspace)?),
            (ATTR_ORGANIZATION.to_string(), string(self.organization)?),
            (ATTR_VALUES.to_string(), self.values),
        ]);
        protocol::Value::new(data_source_schema().value_type(), ValueInner::Map(attributes))
            .map_err(ReencodingError::Assemble)
    }

    /// Encode against the data source schema, where `values` is dynamic.
    pub fn into_dynamic_value(self) -> Result<DynamicValue, RemoteStateError> {
        let schema_type = data_source_schema().value_type();
        let value = self.into_value()?;
        DynamicValue::new(&value, &schema_type)
            .map_err(|e| ReencodingError::Encode(e).into())
    }
}

/// Carry one state value over to the protocol through its canonical bytes.
pub fn reencode_value(output: &str, value: &state_value::Value) -> Result<protocol::Value, ReencodingError> {
    let ty = value.ty();

    let type_bytes = ty.marshal_json().map_err(|source| ReencodingError::TypeBytes {
        output: output.to_string(),
        source,
    })?;
    let protocol_type = protocol::parse_json_type(&type_bytes).map_err(|source| {
        ReencodingError::ProtocolType {
            output: output.to_string(),
            source,
        }
    })?;

    let value_bytes = state_value::marshal(value, &ty).map_err(|source| ReencodingError::ValueBytes {
        output: output.to_string(),
        source,
    })?;
    RawState::new(value_bytes)
        .unmarshal(&protocol_type)
        .map_err(|source| ReencodingError::ProtocolValue {
            output: output.to_string(),
            source,
        })
}

/// Re-encode every output and wrap the result with the workspace coordinates.
pub fn build_aggregate(
    organization: &str,
    workspace: &str,
    outputs: &OutputCollection,
) -> Result<AggregateStateValue, RemoteStateError> {
    let mut attribute_types = BTreeMap::new();
    let mut attributes = BTreeMap::new();
    for (name, output) in outputs {
        let value = reencode_value(name, &output.value)?;
        attribute_types.insert(name.clone(), value.ty().clone());
        attributes.insert(name.clone(), value);
    }

    let values = protocol::Value::new(
        protocol::Type::Object {
            attribute_types,
            optional_attributes: BTreeSet::new(),
        },
        ValueInner::Map(attributes),
    )
    .map_err(ReencodingError::Assemble)?;

    let sensitive_outputs = outputs
        .iter()
        .filter(|(_, output)| output.sensitive)
        .map(|(name, _)| name.clone())
        .collect();

    Ok(AggregateStateValue {
        workspace: workspace.to_string(),
        organization: organization.to_string(),
        values,
        sensitive_outputs,
    })
}
