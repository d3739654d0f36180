// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{RawOutputRecord, RemoteStateError};
use crate::state_value::{self, Type, Value};
use std::collections::BTreeMap;

/// A decoded output whose type is fully concrete.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedOutput {
    pub value: Value,
    pub sensitive: bool,
}

pub type OutputCollection = BTreeMap<String, TypedOutput>;

/// Decode one record's type descriptor, then its value against that type.
pub fn reconstruct_output(record: &RawOutputRecord) -> Result<TypedOutput, RemoteStateError> {
    let ty = Type::parse_json(&record.type_bytes).map_err(|source| RemoteStateError::TypeDescriptor {
        output: record.name.clone(),
        source,
    })?;

    let value = state_value::decode_state(&record.value_bytes, &ty).map_err(|source| {
        RemoteStateError::TypeMismatch {
            output: record.name.clone(),
            source,
        }
    })?;

    Ok(TypedOutput {
        value,
        sensitive: record.sensitive,
    })
}

/// Reconstruct every record. The first failure aborts the whole collection.
pub fn reconstruct_outputs(
    records: &BTreeMap<String, RawOutputRecord>,
) -> Result<OutputCollection, RemoteStateError> {
    records
        .iter()
        .map(|(name, record)| Ok((name.clone(), reconstruct_output(record)?)))
        .collect()
}
