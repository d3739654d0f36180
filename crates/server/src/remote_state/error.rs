// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{MalformedStateError, ReencodingError};
use crate::protocol::Diagnostic;
use crate::state_value::{DecodeError, TypeParseError};
use crate::tfe::FetchError;
use thiserror::Error;

/// Any failure while reading remote state. Each one is fatal to the read.
#[derive(Debug, Error)]
pub enum RemoteStateError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Malformed(#[from] MalformedStateError),

    #[error("output \"{output}\" has an invalid type: {source}")]
    TypeDescriptor {
        output: String,
        #[source]
        source: TypeParseError,
    },

    #[error("output \"{output}\" does not match its type: {source}")]
    TypeMismatch {
        output: String,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Reencoding(#[from] ReencodingError),
}

impl RemoteStateError {
    pub fn summary(&self) -> &'static str {
        match self {
            RemoteStateError::Fetch(FetchError::StateNotFound { .. }) => "Remote state not found",
            RemoteStateError::Fetch(FetchError::WorkspaceNotFound { .. }) => "Workspace not found",
            RemoteStateError::Fetch(_) => "Error reading remote state output",
            RemoteStateError::Malformed(_) => "Malformed remote state",
            RemoteStateError::TypeDescriptor { .. } | RemoteStateError::TypeMismatch { .. } => {
                "Error parsing remote state output"
            }
            RemoteStateError::Reencoding(_) => "Error encoding state",
        }
    }

    /// Label recorded on the read outcome metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            RemoteStateError::Fetch(e) if e.is_not_found() => "not_found",
            RemoteStateError::Fetch(_) => "fetch_error",
            RemoteStateError::Malformed(_) => "malformed",
            RemoteStateError::TypeDescriptor { .. } | RemoteStateError::TypeMismatch { .. } => {
                "type_error"
            }
            RemoteStateError::Reencoding(_) => "reencoding_error",
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.summary(), format!("{}: {}", self.summary(), self))
    }
}
