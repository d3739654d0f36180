// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::AttributePath;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeError {
    #[error("type is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("unknown type \"{0}\"")]
    UnknownType(String),

    #[error("malformed type: {0}")]
    Malformed(String),
}

/// A value was constructed with contents that do not fit its type.
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("cannot create a {ty} value from {found}")]
    KindMismatch { ty: String, found: &'static str },

    #[error("element {position} has type {found}, which cannot be used as {expected}")]
    ElementType {
        position: String,
        expected: String,
        found: String,
    },

    #[error("elements of a {ty} must all have the same type")]
    InconsistentElements { ty: String },

    #[error("required attribute \"{0}\" is missing")]
    MissingAttribute(String),

    #[error("attribute \"{0}\" is not part of the object type")]
    UnexpectedAttribute(String),

    #[error("tuple has {found} elements, type declares {expected}")]
    TupleLength { expected: usize, found: usize },
}

/// Failure reading or writing the JSON value encoding.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("{path}: {reason}")]
    Decode { path: AttributePath, reason: String },

    #[error("{path}: {source}")]
    Type {
        path: AttributePath,
        #[source]
        source: TypeError,
    },

    #[error("{path}: {source}")]
    Value {
        path: AttributePath,
        #[source]
        source: ValueError,
    },

    #[error("{path}: value of type {found} cannot be encoded as {expected}")]
    Encode {
        path: AttributePath,
        expected: String,
        found: String,
    },

    #[error("failed to serialize JSON: {0}")]
    Serialize(#[source] serde_json::Error),
}
