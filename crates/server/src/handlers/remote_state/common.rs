// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::protocol::{Diagnostic, Diagnostics, DynamicValue, JsonError};
use crate::remote_state::data_source_schema;
use crate::remote_state::schema::{ATTR_ORGANIZATION, ATTR_WORKSPACE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ERROR_SUMMARY: &str = "Error retrieving values from the config";

/// Metrics outcome for reads rejected before any fetch.
pub const CONFIG_ERROR_OUTCOME: &str = "config_error";

/// Body of the validate and read endpoints.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteStateRequest {
    pub config: DynamicValue,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadResponse {
    /// Encoded data source object, or `null` whenever an error diagnostic is present.
    pub state: Option<DynamicValue>,
    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    pub fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Error)]
pub enum ConfigValueError {
    #[error("config does not match the data source schema: {0}")]
    Decode(#[from] JsonError),

    #[error("attribute '{0}' must be set")]
    Missing(&'static str),

    #[error("attribute '{0}' must not be empty")]
    Empty(&'static str),
}

impl ConfigValueError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(CONFIG_ERROR_SUMMARY, format!("{CONFIG_ERROR_SUMMARY}: {self}"))
    }
}

/// Pull `(organization, workspace)` out of the request config.
pub fn read_config_values(config: &DynamicValue) -> Result<(String, String), ConfigValueError> {
    let value = config.unmarshal(&data_source_schema().value_type())?;

    let string_attribute = |name: &'static str| -> Result<String, ConfigValueError> {
        let attribute = value
            .get(name)
            .and_then(|attribute| attribute.as_str())
            .ok_or(ConfigValueError::Missing(name))?;
        if attribute.is_empty() {
            return Err(ConfigValueError::Empty(name));
        }
        Ok(attribute.to_string())
    };

    Ok((
        string_attribute(ATTR_ORGANIZATION)?,
        string_attribute(ATTR_WORKSPACE)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> DynamicValue {
        DynamicValue::from_json(json.as_bytes().to_vec())
    }

    #[test]
    fn reads_organization_and_workspace() {
        let values = read_config_values(&config(r#"{"organization":"org1","workspace":"ws1"}"#));
        assert_eq!(values.unwrap(), ("org1".to_string(), "ws1".to_string()));
    }

    #[test]
    fn null_attribute_is_missing() {
        let err =
            read_config_values(&config(r#"{"organization":"org1","workspace":null}"#)).unwrap_err();
        assert!(matches!(err, ConfigValueError::Missing("workspace")));
    }

    #[test]
    fn absent_attribute_fails_to_decode() {
        let err = read_config_values(&config(r#"{"organization":"org1"}"#)).unwrap_err();
        assert!(matches!(err, ConfigValueError::Decode(_)));
    }

    #[test]
    fn unknown_attribute_fails_to_decode() {
        let err = read_config_values(&config(
            r#"{"organization":"org1","workspace":"ws1","backend":"s3"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigValueError::Decode(_)));
    }

    #[test]
    fn empty_attribute_is_rejected() {
        let err =
            read_config_values(&config(r#"{"organization":"","workspace":"ws1"}"#)).unwrap_err();
        assert!(matches!(err, ConfigValueError::Empty("organization")));
    }

    #[test]
    fn diagnostic_names_the_config() {
        let diagnostic = ConfigValueError::Missing("workspace").to_diagnostic();
        assert_eq!(diagnostic.summary, CONFIG_ERROR_SUMMARY);
        assert!(diagnostic.detail.contains("'workspace' must be set"));
    }

    #[test]
    fn failed_response_has_null_state() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::error("summary", "detail"));
        let json = serde_json::to_value(ReadResponse::failed(diagnostics)).unwrap();
        assert!(json["state"].is_null());
        assert_eq!(json["diagnostics"][0]["severity"], "error");
    }
}
