// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod env;
mod error;
mod express;
mod log;
mod metrics;
mod tfe;

pub use args::Args;
pub use error::ConfigError;
pub use express::ExpressConfig;
pub use log::LogConfig;
pub use metrics::{MetricsConfig, MetricsError};
pub use tfe::TfeConfig;

use env::EnvVars;
use std::collections::HashMap;
use std::path::Path;

/// Prefix shared by every environment variable this service reads.
pub const ENV_PREFIX: &str = "RSA_";

#[derive(Debug, Clone, Default)]
pub struct RemoteStateConfig {
    pub express: ExpressConfig,
    pub log: LogConfig,
    pub tfe: TfeConfig,
    pub metrics: MetricsConfig,
}

impl RemoteStateConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from `env_file` (when it exists) overlaid by the process
    /// environment. Variables already set in the environment take precedence.
    pub fn from_env_file(env_file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut vars = read_env_file(env_file)?;
        vars.extend(std::env::vars());
        Self::from_vars(vars)
    }

    /// Load configuration from an explicit set of variables. Later duplicates win.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        // envy rejects repeated keys, so collapse them first.
        let vars: HashMap<String, String> = vars.into_iter().collect();
        let env: EnvVars = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        let config = Self::from(env);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.express.validate()?;
        self.log.validate()?;
        self.tfe.validate()?;
        self.metrics.validate()?;
        Ok(())
    }
}

impl From<EnvVars> for RemoteStateConfig {
    fn from(env: EnvVars) -> Self {
        Self {
            express: ExpressConfig {
                bind_host: env.express_bind_host,
                port: env.express_port,
                request_limit: env.express_request_limit,
            },
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
            tfe: TfeConfig {
                address: env.tfe_address,
                token: env.tfe_token,
                request_timeout: env.tfe_request_timeout,
            },
            metrics: MetricsConfig {
                enabled: env.metrics_enabled,
                prometheus_prefix: env.metrics_prometheus_prefix,
                loki_url: env.metrics_loki_url,
            },
        }
    }
}

/// Read `KEY=value` pairs from a dotenv file. A missing file yields no pairs.
pub fn read_env_file(path: impl AsRef<Path>) -> Result<Vec<(String, String)>, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let to_error = |source| ConfigError::EnvFileError {
        path: path.display().to_string(),
        source,
    };

    dotenv::from_path_iter(path)
        .map_err(to_error)?
        .map(|item| item.map_err(to_error))
        .collect()
}

/// Hostname check per RFC 1123.
pub(crate) fn is_valid_host(host: &str) -> bool {
    if host.is_empty() || host.len() > 253 {
        return false;
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}
