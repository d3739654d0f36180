// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error(
        "Invalid Prometheus prefix '{0}': must start with [a-zA-Z_:] and contain only [a-zA-Z0-9_:]"
    )]
    InvalidPrometheusPrefix(String),

    #[error("Invalid Loki URL '{url}': {reason}")]
    InvalidLokiUrl { url: String, reason: String },
}

/// Configuration for Prometheus metrics and Loki log shipping
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Register metrics and record them on every request
    ///
    /// Env: RSA_METRICS_ENABLED
    /// Default: false
    pub enabled: bool,

    /// Prometheus metric name prefix
    ///
    /// Env: RSA_METRICS_PROMETHEUS_PREFIX
    /// Default: remote_state_api
    pub prometheus_prefix: String,

    /// Loki push endpoint; log shipping is off when unset
    ///
    /// Env: RSA_METRICS_LOKI_URL
    pub loki_url: Option<String>,
}

pub(crate) fn default_prometheus_prefix() -> String {
    "remote_state_api".to_string()
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            prometheus_prefix: default_prometheus_prefix(),
            loki_url: None,
        }
    }
}

/// Prometheus metric names must match `[a-zA-Z_:][a-zA-Z0-9_:]*`.
fn is_valid_prometheus_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        None => true,
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        Some(_) => false,
    }
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<(), MetricsError> {
        if !is_valid_prometheus_prefix(&self.prometheus_prefix) {
            return Err(MetricsError::InvalidPrometheusPrefix(
                self.prometheus_prefix.clone(),
            ));
        }

        if let Some(loki_url) = &self.loki_url {
            let parsed = url::Url::parse(loki_url).map_err(|e| MetricsError::InvalidLokiUrl {
                url: loki_url.clone(),
                reason: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(MetricsError::InvalidLokiUrl {
                    url: loki_url.clone(),
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_prefix(prefix: &str) -> MetricsConfig {
        MetricsConfig {
            enabled: true,
            prometheus_prefix: prefix.to_string(),
            loki_url: None,
        }
    }

    #[test]
    fn test_default_metrics_config() {
        let config = MetricsConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.prometheus_prefix, "remote_state_api");
        assert!(config.loki_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_valid_prometheus_prefixes() {
        for prefix in ["my_app_metrics", "app:metrics", "_metrics", ""] {
            assert!(
                with_prefix(prefix).validate().is_ok(),
                "prefix '{}' should be valid",
                prefix
            );
        }
    }

    #[test]
    fn test_invalid_prometheus_prefixes() {
        for prefix in ["123metrics", "my-metrics", "my.metrics"] {
            assert!(
                with_prefix(prefix).validate().is_err(),
                "prefix '{}' should be rejected",
                prefix
            );
        }
    }

    #[test]
    fn test_loki_url_validation() {
        let mut config = with_prefix("test");
        config.loki_url = Some("http://localhost:3100".to_string());
        assert!(config.validate().is_ok());

        config.loki_url = Some("not a url".to_string());
        assert!(config.validate().is_err());

        config.loki_url = Some("ftp://loki:3100".to_string());
        assert!(config.validate().is_err());
    }
}
