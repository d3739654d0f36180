// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Splitting a state snapshot into per-output value and type fragments.

use serde::de::IgnoredAny;
use serde_json::value::RawValue;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// The state snapshot does not have the expected top-level layout.
#[derive(Debug, Error)]
pub enum MalformedStateError {
    #[error("state is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("state must be a JSON object")]
    NotAnObject,

    #[error("state has no \"outputs\" field")]
    MissingOutputs,

    #[error("\"outputs\" must be a JSON object")]
    OutputsNotAnObject,

    #[error("output \"{name}\" must be a JSON object")]
    OutputNotAnObject { name: String },

    #[error("output \"{name}\" has no \"{field}\" field")]
    MissingField { name: String, field: &'static str },

    #[error("output \"{name}\" has a non-boolean \"sensitive\" field")]
    InvalidSensitive { name: String },

    #[error("output \"{name}\" stores its type as a string but its value is not a JSON string")]
    EmbeddedValueNotString { name: String },

    #[error("output \"{name}\" embeds a value that is not valid JSON")]
    InvalidEmbeddedValue { name: String },
}

/// Undecoded fragments of one output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutputRecord {
    pub name: String,
    pub value_bytes: Vec<u8>,
    pub type_bytes: Vec<u8>,
    pub sensitive: bool,
}

/// Parse `state` into its output records, keyed by output name.
///
/// Fields other than `outputs` are ignored. Either every record is returned or
/// none is.
pub fn decode_raw_state(state: &[u8]) -> Result<BTreeMap<String, RawOutputRecord>, MalformedStateError> {
    let document: &RawValue = serde_json::from_slice(state).map_err(MalformedStateError::InvalidJson)?;
    if !is_object(document) {
        return Err(MalformedStateError::NotAnObject);
    }

    let fields: HashMap<String, &RawValue> =
        serde_json::from_str(document.get()).map_err(MalformedStateError::InvalidJson)?;
    let outputs = fields.get("outputs").ok_or(MalformedStateError::MissingOutputs)?;
    if !is_object(outputs) {
        return Err(MalformedStateError::OutputsNotAnObject);
    }

    let outputs: BTreeMap<String, &RawValue> =
        serde_json::from_str(outputs.get()).map_err(MalformedStateError::InvalidJson)?;

    outputs
        .into_iter()
        .map(|(name, record)| {
            let record = decode_record(name.clone(), record)?;
            Ok((name, record))
        })
        .collect()
}

fn decode_record(name: String, record: &RawValue) -> Result<RawOutputRecord, MalformedStateError> {
    if !is_object(record) {
        return Err(MalformedStateError::OutputNotAnObject { name });
    }
    let fields: HashMap<String, &RawValue> =
        serde_json::from_str(record.get()).map_err(MalformedStateError::InvalidJson)?;

    let field = |field: &'static str| {
        fields
            .get(field)
            .copied()
            .ok_or_else(|| MalformedStateError::MissingField {
                name: name.clone(),
                field,
            })
    };
    let value = field("value")?;
    let ty = field("type")?;

    let sensitive = match fields.get("sensitive") {
        Some(raw) => serde_json::from_str::<Option<bool>>(raw.get())
            .map_err(|_| MalformedStateError::InvalidSensitive { name: name.clone() })?
            .unwrap_or(false),
        None => false,
    };

    let (value_bytes, type_bytes) = match embedded_json(ty) {
        Some(type_json) => {
            let value_json = embedded_json_string(value).ok_or_else(|| {
                MalformedStateError::EmbeddedValueNotString { name: name.clone() }
            })?;
            if !is_json(&value_json) {
                return Err(MalformedStateError::InvalidEmbeddedValue { name });
            }
            (value_json.into_bytes(), type_json.into_bytes())
        }
        None => (value.get().as_bytes().to_vec(), ty.get().as_bytes().to_vec()),
    };

    Ok(RawOutputRecord {
        name,
        value_bytes,
        type_bytes,
        sensitive,
    })
}

/// Contents of a JSON string fragment whose text is itself a JSON document.
///
/// Bare type names such as `"string"` are not JSON documents, so a plain type
/// descriptor never matches.
fn embedded_json(fragment: &RawValue) -> Option<String> {
    embedded_json_string(fragment).filter(|contents| is_json(contents))
}

fn embedded_json_string(fragment: &RawValue) -> Option<String> {
    serde_json::from_str::<String>(fragment.get()).ok()
}

fn is_json(text: &str) -> bool {
    serde_json::from_str::<IgnoredAny>(text).is_ok()
}

fn is_object(fragment: &RawValue) -> bool {
    fragment.get().trim_start().starts_with('{')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_records_and_ignores_other_fields() {
        let state = br#"{
            "version": 4,
            "serial": 12,
            "outputs": {
                "greeting": {"value": "hi", "type": "string"},
                "nums": {"value": [1, 2, 3], "type": ["list", "number"], "sensitive": true}
            },
            "resources": []
        }"#;

        let records = decode_raw_state(state).unwrap();
        assert_eq!(records.len(), 2);

        let greeting = &records["greeting"];
        assert_eq!(greeting.value_bytes, br#""hi""#);
        assert_eq!(greeting.type_bytes, br#""string""#);
        assert!(!greeting.sensitive);

        let nums = &records["nums"];
        assert_eq!(nums.value_bytes, b"[1, 2, 3]");
        assert_eq!(nums.type_bytes, br#"["list", "number"]"#);
        assert!(nums.sensitive);
    }

    #[test]
    fn unwraps_embedded_fragments() {
        let state = br#"{"outputs":{"nums":{"value":"[1,2,3]","type":"[\"list\",\"number\"]"}}}"#;
        let records = decode_raw_state(state).unwrap();

        assert_eq!(records["nums"].value_bytes, b"[1,2,3]");
        assert_eq!(records["nums"].type_bytes, br#"["list","number"]"#);
    }

    #[test]
    fn embedded_type_requires_embedded_value() {
        let state = br#"{"outputs":{"nums":{"value":[1],"type":"[\"list\",\"number\"]"}}}"#;
        assert!(matches!(
            decode_raw_state(state),
            Err(MalformedStateError::EmbeddedValueNotString { name }) if name == "nums"
        ));

        let state = br#"{"outputs":{"nums":{"value":"[1,","type":"[\"list\",\"number\"]"}}}"#;
        assert!(matches!(
            decode_raw_state(state),
            Err(MalformedStateError::InvalidEmbeddedValue { .. })
        ));
    }

    #[test]
    fn empty_outputs_is_valid() {
        assert!(decode_raw_state(br#"{"outputs":{}}"#).unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_top_level() {
        assert!(matches!(
            decode_raw_state(b"not json"),
            Err(MalformedStateError::InvalidJson(_))
        ));
        assert!(matches!(
            decode_raw_state(b"[]"),
            Err(MalformedStateError::NotAnObject)
        ));
        assert!(matches!(
            decode_raw_state(br#"{"version":4}"#),
            Err(MalformedStateError::MissingOutputs)
        ));
        assert!(matches!(
            decode_raw_state(br#"{"outputs":[]}"#),
            Err(MalformedStateError::OutputsNotAnObject)
        ));
    }

    #[test]
    fn rejects_incomplete_records() {
        assert!(matches!(
            decode_raw_state(br#"{"outputs":{"a":{"type":"string"}}}"#),
            Err(MalformedStateError::MissingField { field: "value", .. })
        ));
        assert!(matches!(
            decode_raw_state(br#"{"outputs":{"a":{"value":"x"}}}"#),
            Err(MalformedStateError::MissingField { field: "type", .. })
        ));
        assert!(matches!(
            decode_raw_state(br#"{"outputs":{"a":"x"}}"#),
            Err(MalformedStateError::OutputNotAnObject { .. })
        ));
        assert!(matches!(
            decode_raw_state(br#"{"outputs":{"a":{"value":1,"type":"number","sensitive":"yes"}}}"#),
            Err(MalformedStateError::InvalidSensitive { .. })
        ));
    }
}
