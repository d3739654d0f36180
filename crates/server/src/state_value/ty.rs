// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Structural types of the persisted state format and their JSON grammar.
//!
//! ```text
//! "bool" | "number" | "string" | "dynamic"
//! ["list", T] | ["set", T] | ["map", T]
//! ["object", {"attr": T, ...}]
//! ["tuple", [T, ...]]
//! ```

use super::TypeParseError;
use serde_json::{Map, Value as Json, json};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Number,
    String,
    List(Box<Type>),
    Set(Box<Type>),
    Map(Box<Type>),
    Object(BTreeMap<String, Type>),
    Tuple(Vec<Type>),
    /// Placeholder whose concrete type comes from the paired value.
    Dynamic,
}

impl Type {
    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    pub fn set(element: Type) -> Self {
        Type::Set(Box::new(element))
    }

    pub fn map(element: Type) -> Self {
        Type::Map(Box::new(element))
    }

    pub fn object<I, K>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, Type)>,
        K: Into<String>,
    {
        Type::Object(
            attributes
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        )
    }

    /// True when no `Dynamic` placeholder appears anywhere in the type.
    pub fn is_concrete(&self) -> bool {
        match self {
            Type::Bool | Type::Number | Type::String => true,
            Type::Dynamic => false,
            Type::List(element) | Type::Set(element) | Type::Map(element) => element.is_concrete(),
            Type::Object(attributes) => attributes.values().all(Type::is_concrete),
            Type::Tuple(elements) => elements.iter().all(Type::is_concrete),
        }
    }

    /// Parse a type descriptor from its JSON bytes.
    pub fn parse_json(bytes: &[u8]) -> Result<Self, TypeParseError> {
        let descriptor: Json = serde_json::from_slice(bytes).map_err(TypeParseError::InvalidJson)?;
        Self::from_json_value(&descriptor)
    }

    /// Parse a type descriptor that has already been read as JSON.
    pub fn from_json_value(descriptor: &Json) -> Result<Self, TypeParseError> {
        match descriptor {
            Json::String(token) => match token.as_str() {
                "bool" => Ok(Type::Bool),
                "number" => Ok(Type::Number),
                "string" => Ok(Type::String),
                "dynamic" => Ok(Type::Dynamic),
                other => Err(TypeParseError::UnknownPrimitive(other.to_string())),
            },
            Json::Array(parts) => parse_parametric(parts),
            Json::Null => Err(TypeParseError::UnexpectedToken("null")),
            Json::Bool(_) => Err(TypeParseError::UnexpectedToken("bool")),
            Json::Number(_) => Err(TypeParseError::UnexpectedToken("number")),
            Json::Object(_) => Err(TypeParseError::UnexpectedToken("object")),
        }
    }

    pub fn to_json_value(&self) -> Json {
        match self {
            Type::Bool => json!("bool"),
            Type::Number => json!("number"),
            Type::String => json!("string"),
            Type::Dynamic => json!("dynamic"),
            Type::List(element) => json!(["list", element.to_json_value()]),
            Type::Set(element) => json!(["set", element.to_json_value()]),
            Type::Map(element) => json!(["map", element.to_json_value()]),
            Type::Object(attributes) => {
                let attributes: Map<String, Json> = attributes
                    .iter()
                    .map(|(name, ty)| (name.clone(), ty.to_json_value()))
                    .collect();
                json!(["object", attributes])
            }
            Type::Tuple(elements) => {
                let elements: Vec<Json> = elements.iter().map(Type::to_json_value).collect();
                json!(["tuple", elements])
            }
        }
    }

    /// Canonical byte form of the descriptor. Object attributes are sorted by name.
    pub fn marshal_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.to_json_value())
    }
}

fn parse_parametric(parts: &[Json]) -> Result<Type, TypeParseError> {
    let kind = match parts.first() {
        Some(Json::String(kind)) => kind.as_str(),
        Some(_) => {
            return Err(TypeParseError::InvalidShape {
                kind: "parametric".to_string(),
                reason: "first element must be the kind name".to_string(),
            });
        }
        None => {
            return Err(TypeParseError::InvalidShape {
                kind: "parametric".to_string(),
                reason: "descriptor array is empty".to_string(),
            });
        }
    };

    if !matches!(kind, "list" | "set" | "map" | "object" | "tuple") {
        return Err(TypeParseError::UnknownKind(kind.to_string()));
    }

    if parts.len() != 2 {
        return Err(TypeParseError::InvalidShape {
            kind: kind.to_string(),
            reason: format!("expected 2 elements, found {}", parts.len()),
        });
    }
    let argument = &parts[1];

    match kind {
        "list" => Ok(Type::list(Type::from_json_value(argument)?)),
        "set" => Ok(Type::set(Type::from_json_value(argument)?)),
        "map" => Ok(Type::map(Type::from_json_value(argument)?)),
        "object" => {
            let Json::Object(attributes) = argument else {
                return Err(TypeParseError::InvalidShape {
                    kind: kind.to_string(),
                    reason: "attribute types must be a JSON object".to_string(),
                });
            };
            let attributes = attributes
                .iter()
                .map(|(name, ty)| Ok((name.clone(), Type::from_json_value(ty)?)))
                .collect::<Result<BTreeMap<_, _>, TypeParseError>>()?;
            Ok(Type::Object(attributes))
        }
        _ => {
            let Json::Array(elements) = argument else {
                return Err(TypeParseError::InvalidShape {
                    kind: kind.to_string(),
                    reason: "element types must be a JSON array".to_string(),
                });
            };
            let elements = elements
                .iter()
                .map(Type::from_json_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Type::Tuple(elements))
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::Number => f.write_str("number"),
            Type::String => f.write_str("string"),
            Type::Dynamic => f.write_str("dynamic"),
            Type::List(element) => write!(f, "list of {element}"),
            Type::Set(element) => write!(f, "set of {element}"),
            Type::Map(element) => write!(f, "map of {element}"),
            Type::Object(_) => f.write_str("object"),
            Type::Tuple(_) => f.write_str("tuple"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(descriptor: &str) -> Result<Type, TypeParseError> {
        Type::parse_json(descriptor.as_bytes())
    }

    #[test]
    fn parses_primitives() {
        assert_eq!(parse(r#""bool""#).unwrap(), Type::Bool);
        assert_eq!(parse(r#""number""#).unwrap(), Type::Number);
        assert_eq!(parse(r#""string""#).unwrap(), Type::String);
        assert_eq!(parse(r#""dynamic""#).unwrap(), Type::Dynamic);
    }

    #[test]
    fn parses_nested_descriptor() {
        let ty = parse(
            r#"["object",{"subnets":["list",["map","string"]],"pair":["tuple",["bool","number"]],"tags":["set","string"]}]"#,
        )
        .unwrap();

        assert_eq!(
            ty,
            Type::object([
                ("subnets", Type::list(Type::map(Type::String))),
                ("pair", Type::Tuple(vec![Type::Bool, Type::Number])),
                ("tags", Type::set(Type::String)),
            ])
        );
        assert!(ty.is_concrete());
    }

    #[test]
    fn dynamic_anywhere_is_not_concrete() {
        let ty = parse(r#"["map",["tuple",["string","dynamic"]]]"#).unwrap();
        assert!(!ty.is_concrete());
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert!(matches!(
            parse(r#""float""#),
            Err(TypeParseError::UnknownPrimitive(token)) if token == "float"
        ));
        assert!(matches!(
            parse(r#"["vector","number"]"#),
            Err(TypeParseError::UnknownKind(kind)) if kind == "vector"
        ));
    }

    #[test]
    fn rejects_malformed_shapes() {
        assert!(matches!(parse("[]"), Err(TypeParseError::InvalidShape { .. })));
        assert!(matches!(parse(r#"["list"]"#), Err(TypeParseError::InvalidShape { .. })));
        assert!(matches!(
            parse(r#"["list","number","extra"]"#),
            Err(TypeParseError::InvalidShape { .. })
        ));
        assert!(matches!(
            parse(r#"["object",["string"]]"#),
            Err(TypeParseError::InvalidShape { .. })
        ));
        assert!(matches!(
            parse(r#"["tuple",{"a":"string"}]"#),
            Err(TypeParseError::InvalidShape { .. })
        ));
        assert!(matches!(parse("42"), Err(TypeParseError::UnexpectedToken("number"))));
        assert!(matches!(parse("{"), Err(TypeParseError::InvalidJson(_))));
    }

    #[test]
    fn marshals_with_sorted_attributes() {
        let ty = parse(r#"["object",{"b":"number","a":["list","string"]}]"#).unwrap();
        let bytes = ty.marshal_json().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"["object",{"a":["list","string"],"b":"number"}]"#
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(Type::list(Type::Number).to_string(), "list of number");
        assert_eq!(Type::map(Type::set(Type::Bool)).to_string(), "map of set of bool");
        assert_eq!(Type::Tuple(vec![]).to_string(), "tuple");
    }
}
