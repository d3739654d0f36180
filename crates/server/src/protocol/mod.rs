// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Type, value and diagnostic model of the plugin protocol that data source
//! results are reported in.

mod diagnostic;
mod dynamic_value;
mod error;
mod json;
mod path;
mod schema;
mod ty;
mod value;

pub use diagnostic::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use dynamic_value::DynamicValue;
pub use error::{JsonError, TypeError, ValueError};
pub use json::{RawState, marshal};
pub use path::{AttributePath, AttributePathStep};
pub use schema::{Schema, SchemaAttribute};
pub use ty::{Type, parse_json_type};
pub use value::{Value, ValueInner};
