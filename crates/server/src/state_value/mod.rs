// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Type and value model of persisted state outputs.

mod error;
mod json;
mod path;
mod ty;
mod value;

pub use error::{DecodeError, MarshalError, TypeParseError};
pub use json::{decode_state, marshal, unmarshal};
pub use path::{Path, PathStep};
pub use ty::Type;
pub use value::Value;
