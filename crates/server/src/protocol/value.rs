// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Type, ValueError};
use serde_json::Number;
use std::collections::BTreeMap;

/// Contents of a protocol value.
///
/// Lists, sets and tuples share `List`; maps and objects share `Map`. The
/// owning [`Value`]'s type tells them apart.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueInner {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl ValueInner {
    fn kind(&self) -> &'static str {
        match self {
            ValueInner::Null => "null",
            ValueInner::Bool(_) => "bool",
            ValueInner::Number(_) => "number",
            ValueInner::String(_) => "string",
            ValueInner::List(_) => "list",
            ValueInner::Map(_) => "map",
        }
    }
}

/// A protocol value together with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    ty: Type,
    inner: ValueInner,
}

impl Value {
    /// Create a value, checking that `inner` fits `ty`.
    ///
    /// Children may carry any type usable as the declared element or attribute
    /// type, so concrete values fit `DynamicPseudoType` positions. Omitted
    /// optional object attributes are filled with nulls.
    pub fn new(ty: Type, inner: ValueInner) -> Result<Self, ValueError> {
        let inner = match (&ty, inner) {
            (_, ValueInner::Null) => ValueInner::Null,
            (Type::Bool, inner @ ValueInner::Bool(_))
            | (Type::Number, inner @ ValueInner::Number(_))
            | (Type::String, inner @ ValueInner::String(_)) => inner,
            (Type::List { element_type } | Type::Set { element_type }, ValueInner::List(elements)) => {
                check_elements(&ty, element_type, elements.iter().enumerate())?;
                ValueInner::List(elements)
            }
            (Type::Map { element_type }, ValueInner::Map(elements)) => {
                check_elements(&ty, element_type, elements.iter())?;
                ValueInner::Map(elements)
            }
            (Type::Tuple { element_types }, ValueInner::List(elements)) => {
                if element_types.len() != elements.len() {
                    return Err(ValueError::TupleLength {
                        expected: element_types.len(),
                        found: elements.len(),
                    });
                }
                for (index, (element, expected)) in elements.iter().zip(element_types).enumerate() {
                    check_usable(index, element, expected)?;
                }
                ValueInner::List(elements)
            }
            (
                Type::Object {
                    attribute_types,
                    optional_attributes,
                },
                ValueInner::Map(mut attributes),
            ) => {
                if let Some(name) = attributes.keys().find(|name| !attribute_types.contains_key(*name)) {
                    return Err(ValueError::UnexpectedAttribute(name.clone()));
                }
                for (name, expected) in attribute_types {
                    match attributes.get(name) {
                        Some(attribute) => check_usable(name, attribute, expected)?,
                        None if optional_attributes.contains(name) => {
                            attributes.insert(name.clone(), Value::null(expected.clone()));
                        }
                        None => return Err(ValueError::MissingAttribute(name.clone())),
                    }
                }
                ValueInner::Map(attributes)
            }
            (_, inner) => {
                return Err(ValueError::KindMismatch {
                    ty: ty.to_string(),
                    found: inner.kind(),
                });
            }
        };

        Ok(Self { ty, inner })
    }

    pub fn null(ty: Type) -> Self {
        Self {
            ty,
            inner: ValueInner::Null,
        }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn inner(&self) -> &ValueInner {
        &self.inner
    }

    pub fn is_null(&self) -> bool {
        matches!(self.inner, ValueInner::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.inner {
            ValueInner::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attribute of an object value, or entry of a map value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match &self.inner {
            ValueInner::Map(entries) => entries.get(name),
            _ => None,
        }
    }
}

fn check_usable(position: impl ToString, element: &Value, expected: &Type) -> Result<(), ValueError> {
    if element.ty.usable_as(expected) {
        return Ok(());
    }
    Err(ValueError::ElementType {
        position: position.to_string(),
        expected: expected.to_string(),
        found: element.ty.to_string(),
    })
}

/// Collection elements must fit the element type. Under `DynamicPseudoType`
/// they must also agree with each other.
fn check_elements<'a, P: ToString>(
    collection: &Type,
    element_type: &Type,
    elements: impl Iterator<Item = (P, &'a Value)>,
) -> Result<(), ValueError> {
    let mut first: Option<&Type> = None;
    for (position, element) in elements {
        check_usable(position, element, element_type)?;
        if *element_type == Type::DynamicPseudoType && !element.is_null() {
            match first {
                None => first = Some(&element.ty),
                Some(first) if *first != element.ty => {
                    return Err(ValueError::InconsistentElements {
                        ty: collection.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(s: &str) -> Value {
        Value::new(Type::String, ValueInner::String(s.to_string())).unwrap()
    }

    fn number(n: i64) -> Value {
        Value::new(Type::Number, ValueInner::Number(n.into())).unwrap()
    }

    #[test]
    fn primitive_must_match_type() {
        let err = Value::new(Type::Number, ValueInner::String("1".into())).unwrap_err();
        assert!(matches!(err, ValueError::KindMismatch { found: "string", .. }));
        assert!(Value::new(Type::Bool, ValueInner::Null).unwrap().is_null());
    }

    #[test]
    fn list_elements_must_fit_element_type() {
        let list = Value::new(
            Type::list(Type::Number),
            ValueInner::List(vec![number(1), number(2)]),
        );
        assert!(list.is_ok());

        let err = Value::new(
            Type::list(Type::Number),
            ValueInner::List(vec![number(1), string("x")]),
        )
        .unwrap_err();
        assert!(matches!(err, ValueError::ElementType { position, .. } if position == "1"));
    }

    #[test]
    fn dynamic_elements_must_agree() {
        let err = Value::new(
            Type::list(Type::DynamicPseudoType),
            ValueInner::List(vec![number(1), string("x")]),
        )
        .unwrap_err();
        assert!(matches!(err, ValueError::InconsistentElements { .. }));
    }

    #[test]
    fn object_accepts_concrete_value_in_dynamic_attribute() {
        let ty = Type::object([("name", Type::String), ("values", Type::DynamicPseudoType)]);
        let values = Value::new(
            Type::object([("n", Type::Number)]),
            ValueInner::Map(BTreeMap::from([("n".to_string(), number(3))])),
        )
        .unwrap();

        let object = Value::new(
            ty,
            ValueInner::Map(BTreeMap::from([
                ("name".to_string(), string("a")),
                ("values".to_string(), values.clone()),
            ])),
        )
        .unwrap();
        assert_eq!(object.get("values"), Some(&values));
    }

    #[test]
    fn object_attribute_set_is_checked() {
        let ty = Type::object([("a", Type::String)]);
        let err = Value::new(ty.clone(), ValueInner::Map(BTreeMap::new())).unwrap_err();
        assert!(matches!(err, ValueError::MissingAttribute(name) if name == "a"));

        let err = Value::new(
            ty,
            ValueInner::Map(BTreeMap::from([
                ("a".to_string(), string("x")),
                ("b".to_string(), string("y")),
            ])),
        )
        .unwrap_err();
        assert!(matches!(err, ValueError::UnexpectedAttribute(name) if name == "b"));
    }

    #[test]
    fn omitted_optional_attribute_becomes_null() {
        let ty = Type::Object {
            attribute_types: BTreeMap::from([("a".to_string(), Type::String)]),
            optional_attributes: ["a".to_string()].into(),
        };
        let value = Value::new(ty, ValueInner::Map(BTreeMap::new())).unwrap();
        assert_eq!(value.get("a"), Some(&Value::null(Type::String)));
    }

    #[test]
    fn tuple_length_is_checked() {
        let err = Value::new(
            Type::tuple(vec![Type::String, Type::Number]),
            ValueInner::List(vec![string("a")]),
        )
        .unwrap_err();
        assert!(matches!(err, ValueError::TupleLength { expected: 2, found: 1 }));
    }
}
