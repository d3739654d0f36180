// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Type;
use serde_json::{Map, Number, Value as Json};
use std::collections::BTreeMap;

/// A fully typed state value.
///
/// The type reported by [`Value::ty`] never contains [`Type::Dynamic`]; dynamic
/// placeholders are resolved while decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null(Type),
    Bool(bool),
    Number(Number),
    String(String),
    List {
        element_type: Type,
        elements: Vec<Value>,
    },
    Set {
        element_type: Type,
        elements: Vec<Value>,
    },
    Map {
        element_type: Type,
        elements: BTreeMap<String, Value>,
    },
    Object(BTreeMap<String, Value>),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn number(number: Number) -> Self {
        Value::Number(canonical_number(&number))
    }

    pub fn list(element_type: Type, elements: Vec<Value>) -> Self {
        Value::List {
            element_type,
            elements,
        }
    }

    /// Build a set. Duplicates are dropped and elements are ordered by their
    /// canonical JSON form.
    pub fn set(element_type: Type, elements: Vec<Value>) -> Self {
        let mut keyed: Vec<(String, Value)> = elements
            .into_iter()
            .map(|element| (element.to_json_value().to_string(), element))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.dedup_by(|a, b| a.0 == b.0);

        Value::Set {
            element_type,
            elements: keyed.into_iter().map(|(_, element)| element).collect(),
        }
    }

    pub fn map(element_type: Type, elements: BTreeMap<String, Value>) -> Self {
        Value::Map {
            element_type,
            elements,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    /// Concrete type of this value.
    pub fn ty(&self) -> Type {
        match self {
            Value::Null(ty) => ty.clone(),
            Value::Bool(_) => Type::Bool,
            Value::Number(_) => Type::Number,
            Value::String(_) => Type::String,
            Value::List { element_type, .. } => Type::list(element_type.clone()),
            Value::Set { element_type, .. } => Type::set(element_type.clone()),
            Value::Map { element_type, .. } => Type::map(element_type.clone()),
            Value::Object(attributes) => Type::Object(
                attributes
                    .iter()
                    .map(|(name, value)| (name.clone(), value.ty()))
                    .collect(),
            ),
            Value::Tuple(elements) => Type::Tuple(elements.iter().map(Value::ty).collect()),
        }
    }

    /// Plain JSON rendering of the value, without type information.
    pub fn to_json_value(&self) -> Json {
        match self {
            Value::Null(_) => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => Json::Number(n.clone()),
            Value::String(s) => Json::String(s.clone()),
            Value::List { elements, .. } | Value::Set { elements, .. } => {
                Json::Array(elements.iter().map(Value::to_json_value).collect())
            }
            Value::Map { elements, .. } | Value::Object(elements) => Json::Object(
                elements
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json_value()))
                    .collect::<Map<_, _>>(),
            ),
            Value::Tuple(elements) => {
                Json::Array(elements.iter().map(Value::to_json_value).collect())
            }
        }
    }
}

/// Numbers keep their decimal text. An integral form written with a zero
/// fraction (`1.0`, `-3.00`) is stored without it so that `1.0` and `1` compare
/// equal. Nothing goes through `f64`.
pub(crate) fn canonical_number(number: &Number) -> Number {
    let text = number.to_string();
    integral_part(&text)
        .and_then(|integral| integral.parse().ok())
        .unwrap_or_else(|| number.clone())
}

fn integral_part(text: &str) -> Option<&str> {
    let (integral, fraction) = text.split_once('.')?;
    (!fraction.is_empty() && fraction.bytes().all(|b| b == b'0')).then_some(integral)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn num(n: i64) -> Value {
        Value::Number(Number::from(n))
    }

    fn parse(text: &str) -> Number {
        text.parse().unwrap()
    }

    #[test]
    fn zero_fractions_are_dropped() {
        assert_eq!(canonical_number(&parse("3.0")), Number::from(3));
        assert_eq!(canonical_number(&parse("-12.000")), Number::from(-12));
    }

    #[test]
    fn other_numbers_keep_their_text() {
        for text in ["2.5", "0.1", "1e300", "1.0e5", "18446744073709551617", "-0.25"] {
            assert_eq!(canonical_number(&parse(text)).to_string(), text);
        }
    }

    #[test]
    fn large_integral_decimal_is_not_rounded() {
        assert_eq!(
            canonical_number(&parse("123456789012345678901234567890.0")).to_string(),
            "123456789012345678901234567890"
        );
    }

    #[test]
    fn set_is_deduplicated_and_ordered() {
        let set = Value::set(
            Type::String,
            vec![
                Value::String("b".into()),
                Value::String("a".into()),
                Value::String("b".into()),
            ],
        );
        assert_eq!(set.to_json_value(), json!(["a", "b"]));
        assert_eq!(
            set,
            Value::set(
                Type::String,
                vec![Value::String("a".into()), Value::String("b".into())]
            )
        );
    }

    #[test]
    fn ty_of_composite_values() {
        let value = Value::Object(BTreeMap::from([
            ("nums".to_string(), Value::list(Type::Number, vec![num(1), num(2)])),
            ("pair".to_string(), Value::Tuple(vec![Value::Bool(true), Value::Null(Type::String)])),
        ]));

        assert_eq!(
            value.ty(),
            Type::object([
                ("nums", Type::list(Type::Number)),
                ("pair", Type::Tuple(vec![Type::Bool, Type::String])),
            ])
        );
        assert_eq!(value.to_json_value(), json!({"nums": [1, 2], "pair": [true, null]}));
    }

    #[test]
    fn empty_collections_keep_element_type() {
        let value = Value::map(Type::list(Type::Bool), BTreeMap::new());
        assert_eq!(value.ty(), Type::map(Type::list(Type::Bool)));
        assert_eq!(value.to_json_value(), json!({}));
    }
}
