use crate::ConfigError;

#[derive(Clone)]
pub struct TfeConfig {
    /// Base address of the Terraform Cloud / Enterprise API
    ///
    /// Env: RSA_TFE_ADDRESS
    /// Valid schemes: http://, https://
    /// Default: https://app.terraform.io
    pub address: String,

    /// API token sent as a bearer token on every request
    ///
    /// Env: RSA_TFE_TOKEN
    /// Default: unset (requests are sent unauthenticated)
    pub token: Option<String>,

    /// Timeout for a single API request in seconds
    ///
    /// Env: RSA_TFE_REQUEST_TIMEOUT
    /// Default: 30
    pub request_timeout: u64,
}

pub(crate) fn default_address() -> String {
    "https://app.terraform.io".to_string()
}

pub(crate) fn default_request_timeout() -> u64 {
    30
}

impl TfeConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.address.is_empty() {
            return Err(ConfigError::ValidateError(
                "TFE address cannot be empty".to_string(),
            ));
        }

        let parsed = url::Url::parse(&self.address).map_err(|e| {
            ConfigError::ValidateError(format!("Invalid TFE address '{}': {}", self.address, e))
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ConfigError::ValidateError(format!(
                    "Invalid TFE address scheme '{}'. Must be http:// or https://",
                    scheme
                )));
            }
        }

        if let Some(token) = &self.token
            && token.trim().is_empty()
        {
            return Err(ConfigError::ValidateError(
                "TFE token cannot be empty when set".to_string(),
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::ValidateError(
                "TFE request timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for TfeConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            token: None,
            request_timeout: default_request_timeout(),
        }
    }
}

// The token must never end up in logs.
impl std::fmt::Debug for TfeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfeConfig")
            .field("address", &self.address)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
