//! HTTP transport configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default whole-request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

/// Default connect timeout in seconds.
const fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("verity/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_reject_error_status() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Base URL that relative request URLs are joined onto (e.g., `https://api.example.com/v1/`).
    #[serde(default)]
    pub base_url: String,

    /// Whole-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP connect timeout, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Headers added to every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Whether non-success statuses are raised as transport errors.
    /// When false the error body is returned as response data.
    #[serde(default = "default_reject_error_status")]
    pub reject_error_status: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
            headers: BTreeMap::new(),
            reject_error_status: default_reject_error_status(),
        }
    }
}

impl HttpConfig {
    /// Returns `true` when a base URL has been set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    /// The base URL, or an error naming the missing section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] if `base_url` is empty.
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        if self.is_configured() {
            Ok(&self.base_url)
        } else {
            Err(ConfigError::NotConfigured {
                section: "http".to_string(),
            })
        }
    }

    /// Whole-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero timeout.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        non_zero_secs("http.timeout_secs", self.timeout_secs)
    }

    /// Connect timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero timeout.
    pub fn connect_timeout(&self) -> Result<Duration, ConfigError> {
        non_zero_secs("http.connect_timeout_secs", self.connect_timeout_secs)
    }
}

fn non_zero_secs(field: &str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
