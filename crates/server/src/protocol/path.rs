// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributePathStep {
    AttributeName(String),
    ElementKeyString(String),
    ElementKeyInt(usize),
}

/// Location of a value inside a protocol value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributePath {
    steps: Vec<AttributePathStep>,
}

impl AttributePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute_name(&self, name: &str) -> Self {
        self.with(AttributePathStep::AttributeName(name.to_string()))
    }

    pub fn with_element_key_string(&self, key: &str) -> Self {
        self.with(AttributePathStep::ElementKeyString(key.to_string()))
    }

    pub fn with_element_key_int(&self, index: usize) -> Self {
        self.with(AttributePathStep::ElementKeyInt(index))
    }

    fn with(&self, step: AttributePathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("AttributePath(<root>)");
        }
        f.write_str("AttributePath(")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match step {
                AttributePathStep::AttributeName(name) => write!(f, "AttributeName({name:?})")?,
                AttributePathStep::ElementKeyString(key) => write!(f, "ElementKeyString({key:?})")?,
                AttributePathStep::ElementKeyInt(index) => write!(f, "ElementKeyInt({index})")?,
            }
        }
        f.write_str(")")
    }
}
