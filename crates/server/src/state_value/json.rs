// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON encoding of state values against a declared [`Type`].
//!
//! Persisted state carries plain JSON: where the declared type is `dynamic`,
//! the concrete type is inferred from the JSON shape ([`decode_state`]). Bytes
//! written by [`marshal`] instead wrap every `dynamic` position as
//! `{"value": V, "type": T}`, and [`unmarshal`] reads them back.

use super::value::canonical_number;
use super::{DecodeError, MarshalError, Path, Type, Value};
use serde_json::{Map, Value as Json, json};
use std::collections::BTreeMap;

/// How a `dynamic` position is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DynamicForm {
    /// Plain JSON whose type comes from its shape.
    Inferred,
    /// `{"value": V, "type": T}` as written by [`marshal`].
    Wrapped,
}

/// Decode a persisted state value of type `ty`. Objects under `dynamic` are
/// always data, whatever their keys.
pub fn decode_state(bytes: &[u8], ty: &Type) -> Result<Value, DecodeError> {
    decode_bytes(bytes, ty, DynamicForm::Inferred)
}

/// Decode bytes produced by [`marshal`] against the same type.
pub fn unmarshal(bytes: &[u8], ty: &Type) -> Result<Value, DecodeError> {
    decode_bytes(bytes, ty, DynamicForm::Wrapped)
}

/// Encode `value` as JSON bytes conforming to `ty`.
///
/// Positions where `ty` is `dynamic` are written as `{"value": V, "type": T}`.
pub fn marshal(value: &Value, ty: &Type) -> Result<Vec<u8>, MarshalError> {
    let json = encode(value, ty)?;
    Ok(serde_json::to_vec(&json)?)
}

fn decode_bytes(bytes: &[u8], ty: &Type, form: DynamicForm) -> Result<Value, DecodeError> {
    let json: Json = serde_json::from_slice(bytes).map_err(DecodeError::InvalidJson)?;
    decode(&json, ty, &Path::root(), form)
}

fn decode(json: &Json, ty: &Type, path: &Path, form: DynamicForm) -> Result<Value, DecodeError> {
    if *ty == Type::Dynamic {
        return match form {
            DynamicForm::Inferred => infer(json, path),
            DynamicForm::Wrapped => decode_wrapped(json, path),
        };
    }

    match (ty, json) {
        (_, Json::Null) if ty.is_concrete() => Ok(Value::Null(ty.clone())),
        (_, Json::Null) => Err(DecodeError::Unresolvable {
            path: path.clone(),
            reason: "null value for a type containing dynamic",
        }),
        (Type::Bool, Json::Bool(b)) => Ok(Value::Bool(*b)),
        (Type::Number, Json::Number(n)) => Ok(Value::Number(canonical_number(n))),
        (Type::String, Json::String(s)) => Ok(Value::String(s.clone())),
        (Type::List(element), Json::Array(items)) => {
            let elements = decode_elements(items, element, path, form)?;
            let element_type = unify(element, elements.iter(), path)?;
            Ok(Value::list(element_type, elements))
        }
        (Type::Set(element), Json::Array(items)) => {
            let elements = decode_elements(items, element, path, form)?;
            let element_type = unify(element, elements.iter(), path)?;
            Ok(Value::set(element_type, elements))
        }
        (Type::Map(element), Json::Object(entries)) => {
            let elements = entries
                .iter()
                .map(|(key, item)| Ok((key.clone(), decode(item, element, &path.key(key), form)?)))
                .collect::<Result<BTreeMap<_, _>, DecodeError>>()?;
            let element_type = unify(element, elements.values(), path)?;
            Ok(Value::map(element_type, elements))
        }
        (Type::Object(attributes), Json::Object(entries)) => {
            decode_object(attributes, entries, path, form)
        }
        (Type::Tuple(types), Json::Array(items)) => {
            if types.len() != items.len() {
                return Err(DecodeError::TupleLength {
                    path: path.clone(),
                    expected: types.len(),
                    found: items.len(),
                });
            }
            let elements = items
                .iter()
                .zip(types)
                .enumerate()
                .map(|(index, (item, ty))| decode(item, ty, &path.index(index), form))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Tuple(elements))
        }
        (_, other) => Err(DecodeError::TypeMismatch {
            path: path.clone(),
            expected: ty.to_string(),
            found: json_kind(other),
        }),
    }
}

fn decode_elements(
    items: &[Json],
    element: &Type,
    path: &Path,
    form: DynamicForm,
) -> Result<Vec<Value>, DecodeError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode(item, element, &path.index(index), form))
        .collect()
}

fn decode_object(
    attributes: &BTreeMap<String, Type>,
    entries: &Map<String, Json>,
    path: &Path,
    form: DynamicForm,
) -> Result<Value, DecodeError> {
    if let Some(name) = entries.keys().find(|name| !attributes.contains_key(*name)) {
        return Err(DecodeError::UnexpectedAttribute {
            path: path.clone(),
            name: name.clone(),
        });
    }

    attributes
        .iter()
        .map(|(name, ty)| {
            let item = entries.get(name).ok_or_else(|| DecodeError::MissingAttribute {
                path: path.clone(),
                name: name.clone(),
            })?;
            Ok((name.clone(), decode(item, ty, &path.attr(name), form)?))
        })
        .collect::<Result<BTreeMap<_, _>, DecodeError>>()
        .map(Value::Object)
}

/// Type a plain JSON value by its shape.
fn infer(json: &Json, path: &Path) -> Result<Value, DecodeError> {
    match json {
        Json::Null => Err(DecodeError::Unresolvable {
            path: path.clone(),
            reason: "null carries no type",
        }),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => Ok(Value::Number(canonical_number(n))),
        Json::String(s) => Ok(Value::String(s.clone())),
        Json::Array(items) if items.is_empty() => Err(DecodeError::Unresolvable {
            path: path.clone(),
            reason: "empty array carries no element types",
        }),
        Json::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| infer(item, &path.index(index)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Tuple),
        Json::Object(entries) if entries.is_empty() => Err(DecodeError::Unresolvable {
            path: path.clone(),
            reason: "empty object carries no attribute types",
        }),
        Json::Object(entries) => entries
            .iter()
            .map(|(name, item)| Ok((name.clone(), infer(item, &path.attr(name))?)))
            .collect::<Result<BTreeMap<_, _>, DecodeError>>()
            .map(Value::Object),
    }
}

/// Read a `{"value": V, "type": T}` wrapper written by [`marshal`].
fn decode_wrapped(json: &Json, path: &Path) -> Result<Value, DecodeError> {
    let Some((ty, value)) = typed_wrapper(json) else {
        return Err(DecodeError::Unresolvable {
            path: path.clone(),
            reason: "dynamic value is not a {\"type\", \"value\"} wrapper",
        });
    };
    let ty = Type::from_json_value(ty).map_err(|source| DecodeError::WrappedType {
        path: path.clone(),
        source,
    })?;
    decode(value, &ty, path, DynamicForm::Wrapped)
}

/// Matches an object holding exactly the keys `type` and `value`.
fn typed_wrapper(json: &Json) -> Option<(&Json, &Json)> {
    match json {
        Json::Object(entries) if entries.len() == 2 => {
            Some((entries.get("type")?, entries.get("value")?))
        }
        _ => None,
    }
}

/// Element type of a decoded collection. A concrete declared type is kept as
/// is; otherwise every element must have resolved to the same type.
fn unify<'a>(
    declared: &Type,
    mut elements: impl Iterator<Item = &'a Value>,
    path: &Path,
) -> Result<Type, DecodeError> {
    if declared.is_concrete() {
        return Ok(declared.clone());
    }

    let first = elements
        .next()
        .ok_or_else(|| DecodeError::Unresolvable {
            path: path.clone(),
            reason: "empty collection with dynamic element type",
        })?
        .ty();

    for element in elements {
        let other = element.ty();
        if other != first {
            return Err(DecodeError::InconsistentElements {
                path: path.clone(),
                first: first.to_string(),
                other: other.to_string(),
            });
        }
    }

    Ok(first)
}

fn encode(value: &Value, ty: &Type) -> Result<Json, MarshalError> {
    let mismatch = || MarshalError::TypeMismatch {
        expected: ty.to_string(),
        found: value.ty().to_string(),
    };

    match (ty, value) {
        (Type::Dynamic, _) => Ok(json!({
            "value": value.to_json_value(),
            "type": value.ty().to_json_value(),
        })),
        (_, Value::Null(actual)) if conforms(actual, ty) => Ok(Json::Null),
        (Type::Bool, Value::Bool(b)) => Ok(Json::Bool(*b)),
        (Type::Number, Value::Number(n)) => Ok(Json::Number(n.clone())),
        (Type::String, Value::String(s)) => Ok(Json::String(s.clone())),
        (Type::List(element), Value::List { elements, .. })
        | (Type::Set(element), Value::Set { elements, .. }) => elements
            .iter()
            .map(|item| encode(item, element))
            .collect::<Result<Vec<_>, _>>()
            .map(Json::Array),
        (Type::Map(element), Value::Map { elements, .. }) => elements
            .iter()
            .map(|(key, item)| Ok((key.clone(), encode(item, element)?)))
            .collect::<Result<Map<_, _>, MarshalError>>()
            .map(Json::Object),
        (Type::Object(attributes), Value::Object(values)) => {
            if attributes.len() != values.len() {
                return Err(mismatch());
            }
            attributes
                .iter()
                .map(|(name, ty)| {
                    let item = values.get(name).ok_or_else(mismatch)?;
                    Ok((name.clone(), encode(item, ty)?))
                })
                .collect::<Result<Map<_, _>, MarshalError>>()
                .map(Json::Object)
        }
        (Type::Tuple(types), Value::Tuple(values)) if types.len() == values.len() => values
            .iter()
            .zip(types)
            .map(|(item, ty)| encode(item, ty))
            .collect::<Result<Vec<_>, _>>()
            .map(Json::Array),
        _ => Err(mismatch()),
    }
}

/// Whether a value of concrete type `actual` may be written where `target` is expected.
fn conforms(actual: &Type, target: &Type) -> bool {
    match (actual, target) {
        (_, Type::Dynamic) => true,
        (Type::List(a), Type::List(t)) | (Type::Set(a), Type::Set(t)) | (Type::Map(a), Type::Map(t)) => {
            conforms(a, t)
        }
        (Type::Object(a), Type::Object(t)) => {
            a.len() == t.len()
                && a.iter()
                    .all(|(name, ty)| t.get(name).is_some_and(|target| conforms(ty, target)))
        }
        (Type::Tuple(a), Type::Tuple(t)) => {
            a.len() == t.len() && a.iter().zip(t).all(|(ty, target)| conforms(ty, target))
        }
        _ => actual == target,
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
