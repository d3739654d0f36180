// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Path;
use thiserror::Error;

/// A type descriptor does not follow the state type grammar.
#[derive(Debug, Error)]
pub enum TypeParseError {
    #[error("type descriptor is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("unknown primitive type \"{0}\"")]
    UnknownPrimitive(String),

    #[error("unknown type kind \"{0}\"")]
    UnknownKind(String),

    #[error("invalid {kind} type descriptor: {reason}")]
    InvalidShape { kind: String, reason: String },

    #[error("type descriptor must be a string or an array, found {0}")]
    UnexpectedToken(&'static str),
}

/// A value does not conform to the type it was decoded against.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("value is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("{path}: {expected} required, but found {found}")]
    TypeMismatch {
        path: Path,
        expected: String,
        found: &'static str,
    },

    #[error("{path}: missing required attribute \"{name}\"")]
    MissingAttribute { path: Path, name: String },

    #[error("{path}: unsupported attribute \"{name}\"")]
    UnexpectedAttribute { path: Path, name: String },

    #[error("{path}: tuple with {expected} elements required, but found {found}")]
    TupleLength {
        path: Path,
        expected: usize,
        found: usize,
    },

    #[error("{path}: elements have inconsistent types {first} and {other}")]
    InconsistentElements {
        path: Path,
        first: String,
        other: String,
    },

    #[error("{path}: cannot resolve dynamic type: {reason}")]
    Unresolvable { path: Path, reason: &'static str },

    #[error("{path}: invalid type in dynamic value: {source}")]
    WrappedType {
        path: Path,
        #[source]
        source: TypeParseError,
    },
}

/// A value could not be written out against the requested type.
#[derive(Debug, Error)]
pub enum MarshalError {
    #[error("value of type {found} cannot be encoded as {expected}")]
    TypeMismatch { expected: String, found: String },

    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}
