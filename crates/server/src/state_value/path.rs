// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

/// One step from a value into one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Object attribute.
    Attr(String),
    /// List, set or tuple position.
    Index(usize),
    /// Map key.
    Key(String),
}

/// Location of a nested value, rendered as `.attr[0]["key"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<PathStep>);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub(crate) fn attr(&self, name: &str) -> Self {
        self.child(PathStep::Attr(name.to_string()))
    }

    pub(crate) fn index(&self, index: usize) -> Self {
        self.child(PathStep::Index(index))
    }

    pub(crate) fn key(&self, key: &str) -> Self {
        self.child(PathStep::Key(key.to_string()))
    }

    fn child(&self, step: PathStep) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for step in &self.0 {
            match step {
                PathStep::Attr(name) => write!(f, ".{name}")?,
                PathStep::Index(index) => write!(f, "[{index}]")?,
                PathStep::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_root() {
        assert_eq!(Path::root().to_string(), "<root>");
    }

    #[test]
    fn renders_nested_steps() {
        let path = Path::root().attr("network").index(2).key("zone-a");
        assert_eq!(path.to_string(), r#".network[2]["zone-a"]"#);
    }
}
