// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::TypeError;
use serde_json::{Map, Value as Json, json};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Type of a value exchanged with plugin protocol consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Bool,
    Number,
    String,
    /// Stands in for any type; the concrete type travels with the value.
    DynamicPseudoType,
    List {
        element_type: Box<Type>,
    },
    Set {
        element_type: Box<Type>,
    },
    Map {
        element_type: Box<Type>,
    },
    Object {
        attribute_types: BTreeMap<String, Type>,
        /// Attributes that may be omitted from a value of this type.
        optional_attributes: BTreeSet<String>,
    },
    Tuple {
        element_types: Vec<Type>,
    },
}

impl Type {
    pub fn list(element_type: Type) -> Self {
        Type::List {
            element_type: Box::new(element_type),
        }
    }

    pub fn set(element_type: Type) -> Self {
        Type::Set {
            element_type: Box::new(element_type),
        }
    }

    pub fn map(element_type: Type) -> Self {
        Type::Map {
            element_type: Box::new(element_type),
        }
    }

    pub fn object<I, K>(attribute_types: I) -> Self
    where
        I: IntoIterator<Item = (K, Type)>,
        K: Into<String>,
    {
        Type::Object {
            attribute_types: attribute_types
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
            optional_attributes: BTreeSet::new(),
        }
    }

    pub fn tuple(element_types: Vec<Type>) -> Self {
        Type::Tuple { element_types }
    }

    /// Whether a value of this type may be used where `other` is expected.
    ///
    /// `DynamicPseudoType` accepts any type. Optional attributes do not affect
    /// object compatibility.
    pub fn usable_as(&self, other: &Type) -> bool {
        match (self, other) {
            (_, Type::DynamicPseudoType) => true,
            (Type::List { element_type: a }, Type::List { element_type: b })
            | (Type::Set { element_type: a }, Type::Set { element_type: b })
            | (Type::Map { element_type: a }, Type::Map { element_type: b }) => a.usable_as(b),
            (
                Type::Object {
                    attribute_types: a, ..
                },
                Type::Object {
                    attribute_types: b, ..
                },
            ) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(name, ty)| b.get(name).is_some_and(|other| ty.usable_as(other)))
            }
            (Type::Tuple { element_types: a }, Type::Tuple { element_types: b }) => {
                a.len() == b.len() && a.iter().zip(b).all(|(ty, other)| ty.usable_as(other))
            }
            _ => self == other,
        }
    }

    pub fn to_json_value(&self) -> Json {
        match self {
            Type::Bool => json!("bool"),
            Type::Number => json!("number"),
            Type::String => json!("string"),
            Type::DynamicPseudoType => json!("dynamic"),
            Type::List { element_type } => json!(["list", element_type.to_json_value()]),
            Type::Set { element_type } => json!(["set", element_type.to_json_value()]),
            Type::Map { element_type } => json!(["map", element_type.to_json_value()]),
            Type::Object {
                attribute_types,
                optional_attributes,
            } => {
                let attributes: Map<String, Json> = attribute_types
                    .iter()
                    .map(|(name, ty)| (name.clone(), ty.to_json_value()))
                    .collect();
                if optional_attributes.is_empty() {
                    json!(["object", attributes])
                } else {
                    json!(["object", attributes, optional_attributes])
                }
            }
            Type::Tuple { element_types } => {
                let elements: Vec<Json> = element_types.iter().map(Type::to_json_value).collect();
                json!(["tuple", elements])
            }
        }
    }
}

/// Parse a JSON type constraint as used on the plugin protocol wire.
pub fn parse_json_type(bytes: &[u8]) -> Result<Type, TypeError> {
    let json: Json = serde_json::from_slice(bytes).map_err(TypeError::InvalidJson)?;
    type_from_json(&json)
}

pub(crate) fn type_from_json(json: &Json) -> Result<Type, TypeError> {
    match json {
        Json::String(name) => match name.as_str() {
            "bool" => Ok(Type::Bool),
            "number" => Ok(Type::Number),
            "string" => Ok(Type::String),
            "dynamic" => Ok(Type::DynamicPseudoType),
            other => Err(TypeError::UnknownType(other.to_string())),
        },
        Json::Array(parts) => {
            let Some(Json::String(kind)) = parts.first() else {
                return Err(TypeError::Malformed(
                    "type array must start with a kind name".to_string(),
                ));
            };
            let arguments = &parts[1..];

            match (kind.as_str(), arguments) {
                ("list", [element]) => Ok(Type::list(type_from_json(element)?)),
                ("set", [element]) => Ok(Type::set(type_from_json(element)?)),
                ("map", [element]) => Ok(Type::map(type_from_json(element)?)),
                ("object", [Json::Object(attributes)]) => object_type(attributes, None),
                ("object", [Json::Object(attributes), Json::Array(optional)]) => {
                    object_type(attributes, Some(optional))
                }
                ("tuple", [Json::Array(elements)]) => Ok(Type::tuple(
                    elements
                        .iter()
                        .map(type_from_json)
                        .collect::<Result<Vec<_>, _>>()?,
                )),
                ("list" | "set" | "map" | "object" | "tuple", _) => Err(TypeError::Malformed(
                    format!("invalid arguments for {kind} type"),
                )),
                (other, _) => Err(TypeError::UnknownType(other.to_string())),
            }
        }
        _ => Err(TypeError::Malformed(
            "type must be a string or an array".to_string(),
        )),
    }
}

fn object_type(attributes: &Map<String, Json>, optional: Option<&Vec<Json>>) -> Result<Type, TypeError> {
    let attribute_types = attributes
        .iter()
        .map(|(name, ty)| Ok((name.clone(), type_from_json(ty)?)))
        .collect::<Result<BTreeMap<_, _>, TypeError>>()?;

    let mut optional_attributes = BTreeSet::new();
    for name in optional.into_iter().flatten() {
        let Json::String(name) = name else {
            return Err(TypeError::Malformed(
                "optional attribute names must be strings".to_string(),
            ));
        };
        if !attribute_types.contains_key(name) {
            return Err(TypeError::Malformed(format!(
                "optional attribute \"{name}\" is not declared"
            )));
        }
        optional_attributes.insert(name.clone());
    }

    Ok(Type::Object {
        attribute_types,
        optional_attributes,
    })
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => f.write_str("Bool"),
            Type::Number => f.write_str("Number"),
            Type::String => f.write_str("String"),
            Type::DynamicPseudoType => f.write_str("DynamicPseudoType"),
            Type::List { element_type } => write!(f, "List[{element_type}]"),
            Type::Set { element_type } => write!(f, "Set[{element_type}]"),
            Type::Map { element_type } => write!(f, "Map[{element_type}]"),
            Type::Object {
                attribute_types, ..
            } => {
                f.write_str("Object[")?;
                for (i, (name, ty)) in attribute_types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{name}\":{ty}")?;
                }
                f.write_str("]")
            }
            Type::Tuple { element_types } => {
                f.write_str("Tuple[")?;
                for (i, ty) in element_types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_optional_attributes() {
        let ty = parse_json_type(br#"["object",{"a":"string","b":"number"},["b"]]"#).unwrap();
        let Type::Object {
            optional_attributes,
            ..
        } = &ty
        else {
            panic!("expected object type, got {ty}");
        };
        assert!(optional_attributes.contains("b"));
        assert_eq!(
            ty.to_json_value(),
            json!(["object", {"a": "string", "b": "number"}, ["b"]])
        );
    }

    #[test]
    fn rejects_undeclared_optional_attribute() {
        let err = parse_json_type(br#"["object",{"a":"string"},["z"]]"#).unwrap_err();
        assert!(matches!(err, TypeError::Malformed(_)));
    }

    #[test]
    fn rejects_unknown_and_malformed_types() {
        assert!(matches!(
            parse_json_type(br#""float""#),
            Err(TypeError::UnknownType(name)) if name == "float"
        ));
        assert!(matches!(
            parse_json_type(br#"["list"]"#),
            Err(TypeError::Malformed(_))
        ));
        assert!(matches!(
            parse_json_type(br#"{"list":"string"}"#),
            Err(TypeError::Malformed(_))
        ));
        assert!(matches!(parse_json_type(b"not json"), Err(TypeError::InvalidJson(_))));
    }

    #[test]
    fn concrete_types_are_usable_as_dynamic() {
        let nested = Type::object([("values", Type::list(Type::Number))]);
        assert!(nested.usable_as(&Type::DynamicPseudoType));
        assert!(nested.usable_as(&Type::object([("values", Type::DynamicPseudoType)])));
        assert!(!nested.usable_as(&Type::object([("other", Type::DynamicPseudoType)])));
        assert!(!Type::String.usable_as(&Type::Number));
    }

    #[test]
    fn display_is_readable() {
        let ty = Type::object([
            ("a", Type::list(Type::String)),
            ("b", Type::tuple(vec![Type::Bool, Type::DynamicPseudoType])),
        ]);
        assert_eq!(
            ty.to_string(),
            r#"Object["a":List[String], "b":Tuple[Bool, DynamicPseudoType]]"#
        );
    }
}
