// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON value encoding used on the plugin protocol wire.
//!
//! `DynamicPseudoType` positions are written as `{"value": V, "type": T}` so the
//! reader can recover the concrete type.

use super::ty::type_from_json;
use super::{AttributePath, JsonError, Type, Value, ValueInner};
use serde_json::{Map, Value as Json, json};
use std::collections::BTreeMap;

/// Raw JSON bytes awaiting a type to be decoded against.
#[derive(Debug, Clone)]
pub struct RawState {
    json: Vec<u8>,
}

impl RawState {
    pub fn new(json: Vec<u8>) -> Self {
        Self { json }
    }

    pub fn unmarshal(&self, ty: &Type) -> Result<Value, JsonError> {
        unmarshal(&self.json, ty)
    }
}

pub(crate) fn unmarshal(bytes: &[u8], ty: &Type) -> Result<Value, JsonError> {
    let json: Json = serde_json::from_slice(bytes).map_err(JsonError::InvalidJson)?;
    decode(&json, ty, &AttributePath::new())
}

/// Encode `value` against `ty`.
pub fn marshal(value: &Value, ty: &Type) -> Result<Vec<u8>, JsonError> {
    let json = encode(value, ty, &AttributePath::new())?;
    serde_json::to_vec(&json).map_err(JsonError::Serialize)
}

fn decode(json: &Json, ty: &Type, path: &AttributePath) -> Result<Value, JsonError> {
    let construct = |ty: Type, inner: ValueInner| {
        Value::new(ty, inner).map_err(|source| JsonError::Value {
            path: path.clone(),
            source,
        })
    };

    match (ty, json) {
        (_, Json::Null) => Ok(Value::null(ty.clone())),
        (Type::DynamicPseudoType, json) => decode_dynamic(json, path),
        (Type::Bool, Json::Bool(b)) => construct(Type::Bool, ValueInner::Bool(*b)),
        (Type::Number, Json::Number(n)) => construct(Type::Number, ValueInner::Number(n.clone())),
        (Type::String, Json::String(s)) => construct(Type::String, ValueInner::String(s.clone())),
        (Type::List { element_type }, Json::Array(items)) => {
            let elements = decode_elements(items, element_type, path)?;
            let element_type = resolve_element_type(element_type, &elements);
            construct(Type::list(element_type), ValueInner::List(elements))
        }
        (Type::Set { element_type }, Json::Array(items)) => {
            let elements = decode_elements(items, element_type, path)?;
            let element_type = resolve_element_type(element_type, &elements);
            construct(Type::set(element_type), ValueInner::List(elements))
        }
        (Type::Map { element_type }, Json::Object(entries)) => {
            let elements = entries
                .iter()
                .map(|(key, item)| {
                    Ok((
                        key.clone(),
                        decode(item, element_type, &path.with_element_key_string(key))?,
                    ))
                })
                .collect::<Result<BTreeMap<_, _>, JsonError>>()?;
            let element_type = resolve_element_type(element_type, elements.values());
            construct(Type::map(element_type), ValueInner::Map(elements))
        }
        (Type::Object { attribute_types, .. }, Json::Object(entries)) => {
            let attributes = entries
                .iter()
                .map(|(name, item)| {
                    let attribute_path = path.with_attribute_name(name);
                    let attribute_type =
                        attribute_types
                            .get(name)
                            .ok_or_else(|| JsonError::Decode {
                                path: attribute_path.clone(),
                                reason: "unsupported attribute".to_string(),
                            })?;
                    Ok((name.clone(), decode(item, attribute_type, &attribute_path)?))
                })
                .collect::<Result<BTreeMap<_, _>, JsonError>>()?;
            construct(ty.clone(), ValueInner::Map(attributes))
        }
        (Type::Tuple { element_types }, Json::Array(items)) => {
            if element_types.len() != items.len() {
                return Err(JsonError::Decode {
                    path: path.clone(),
                    reason: format!(
                        "tuple has {} elements, type declares {}",
                        items.len(),
                        element_types.len()
                    ),
                });
            }
            let elements = items
                .iter()
                .zip(element_types)
                .enumerate()
                .map(|(index, (item, ty))| decode(item, ty, &path.with_element_key_int(index)))
                .collect::<Result<Vec<_>, _>>()?;
            construct(ty.clone(), ValueInner::List(elements))
        }
        (_, other) => Err(JsonError::Decode {
            path: path.clone(),
            reason: format!("expected {ty}, found JSON {}", json_kind(other)),
        }),
    }
}

fn decode_elements(
    items: &[Json],
    element_type: &Type,
    path: &AttributePath,
) -> Result<Vec<Value>, JsonError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode(item, element_type, &path.with_element_key_int(index)))
        .collect()
}

fn decode_dynamic(json: &Json, path: &AttributePath) -> Result<Value, JsonError> {
    let wrapper = match json {
        Json::Object(entries) => entries.get("type").zip(entries.get("value")),
        _ => None,
    };
    let Some((ty, value)) = wrapper else {
        return Err(JsonError::Decode {
            path: path.clone(),
            reason: "dynamic value must be an object with \"type\" and \"value\"".to_string(),
        });
    };

    let ty = type_from_json(ty).map_err(|source| JsonError::Type {
        path: path.clone(),
        source,
    })?;
    if ty == Type::DynamicPseudoType {
        return Err(JsonError::Decode {
            path: path.clone(),
            reason: "dynamic value must declare a concrete type".to_string(),
        });
    }
    decode(value, &ty, path)
}

/// A `DynamicPseudoType` element type takes the type shared by the decoded elements.
fn resolve_element_type<'a>(declared: &Type, elements: impl IntoIterator<Item = &'a Value>) -> Type {
    if *declared != Type::DynamicPseudoType {
        return declared.clone();
    }
    elements
        .into_iter()
        .find(|element| !element.is_null())
        .map(|element| element.ty().clone())
        .unwrap_or(Type::DynamicPseudoType)
}

fn encode(value: &Value, ty: &Type, path: &AttributePath) -> Result<Json, JsonError> {
    if *ty == Type::DynamicPseudoType && *value.ty() != Type::DynamicPseudoType {
        let concrete = value.ty();
        return Ok(json!({
            "value": encode(value, concrete, path)?,
            "type": concrete.to_json_value(),
        }));
    }

    if !value.ty().usable_as(ty) {
        return Err(JsonError::Encode {
            path: path.clone(),
            expected: ty.to_string(),
            found: value.ty().to_string(),
        });
    }

    match (ty, value.inner()) {
        (_, ValueInner::Null) => Ok(Json::Null),
        (_, ValueInner::Bool(b)) => Ok(Json::Bool(*b)),
        (_, ValueInner::Number(n)) => Ok(Json::Number(n.clone())),
        (_, ValueInner::String(s)) => Ok(Json::String(s.clone())),
        (Type::List { element_type } | Type::Set { element_type }, ValueInner::List(elements)) => elements
            .iter()
            .enumerate()
            .map(|(index, element)| encode(element, element_type, &path.with_element_key_int(index)))
            .collect::<Result<Vec<_>, _>>()
            .map(Json::Array),
        (Type::Tuple { element_types }, ValueInner::List(elements)) => elements
            .iter()
            .zip(element_types)
            .enumerate()
            .map(|(index, (element, ty))| encode(element, ty, &path.with_element_key_int(index)))
            .collect::<Result<Vec<_>, _>>()
            .map(Json::Array),
        (Type::Map { element_type }, ValueInner::Map(entries)) => entries
            .iter()
            .map(|(key, element)| {
                Ok((
                    key.clone(),
                    encode(element, element_type, &path.with_element_key_string(key))?,
                ))
            })
            .collect::<Result<Map<_, _>, JsonError>>()
            .map(Json::Object),
        (Type::Object { attribute_types, .. }, ValueInner::Map(attributes)) => attribute_types
            .iter()
            .map(|(name, attribute_type)| {
                let attribute_path = path.with_attribute_name(name);
                let encoded = match attributes.get(name) {
                    Some(attribute) => encode(attribute, attribute_type, &attribute_path)?,
                    None => Json::Null,
                };
                Ok((name.clone(), encoded))
            })
            .collect::<Result<Map<_, _>, JsonError>>()
            .map(Json::Object),
        _ => Err(JsonError::Encode {
            path: path.clone(),
            expected: ty.to_string(),
            found: value.ty().to_string(),
        }),
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::parse_json_type;

    fn raw(json: &str) -> RawState {
        RawState::new(json.as_bytes().to_vec())
    }

    #[test]
    fn unmarshals_concrete_object() {
        let ty = parse_json_type(br#"["object",{"a":["list","number"],"b":"string"}]"#).unwrap();
        let value = raw(r#"{"a":[1,2],"b":"x"}"#).unmarshal(&ty).unwrap();

        assert_eq!(value.ty(), &ty);
        assert_eq!(value.get("b").and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn dynamic_position_requires_wrapper() {
        let ty = Type::object([("v", Type::DynamicPseudoType)]);

        let value = raw(r#"{"v":{"value":[1],"type":["list","number"]}}"#)
            .unmarshal(&ty)
            .unwrap();
        assert_eq!(value.get("v").map(Value::ty), Some(&Type::list(Type::Number)));

        let err = raw(r#"{"v":[1]}"#).unmarshal(&ty).unwrap_err();
        assert!(matches!(err, JsonError::Decode { .. }));
    }

    #[test]
    fn unsupported_attribute_is_rejected() {
        let ty = Type::object([("a", Type::String)]);
        let err = raw(r#"{"a":"x","z":1}"#).unmarshal(&ty).unwrap_err();
        assert!(err.to_string().contains(r#"AttributeName("z")"#), "{err}");
    }

    #[test]
    fn kind_mismatch_is_reported_with_path() {
        let ty = Type::map(Type::Number);
        let err = raw(r#"{"k":"nope"}"#).unmarshal(&ty).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"AttributePath(ElementKeyString("k")): expected Number, found JSON string"#
        );
    }

    #[test]
    fn marshal_wraps_dynamic_positions() {
        let ty = Type::object([("name", Type::String), ("values", Type::DynamicPseudoType)]);
        let value = raw(r#"{"name":"n","values":{"value":{"x":true},"type":["object",{"x":"bool"}]}}"#)
            .unmarshal(&ty)
            .unwrap();

        let bytes = marshal(&value, &ty).unwrap();
        let json: Json = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json,
            json!({
                "name": "n",
                "values": {"value": {"x": true}, "type": ["object", {"x": "bool"}]}
            })
        );
        assert_eq!(unmarshal(&bytes, &ty).unwrap(), value);
    }

    #[test]
    fn marshal_rejects_incompatible_type() {
        let value = raw("true").unmarshal(&Type::Bool).unwrap();
        let err = marshal(&value, &Type::String).unwrap_err();
        assert!(matches!(err, JsonError::Encode { .. }));
    }
}
