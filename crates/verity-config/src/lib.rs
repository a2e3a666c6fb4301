//! # verity-config
//!
//! Layered configuration loading for Verity using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VERITY_*` prefix, `__` as separator)
//! 2. Project-level `.verity/config.toml`
//! 3. User-level `~/.config/verity/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VERITY_HTTP__BASE_URL` -> `http.base_url`,
//! `VERITY_SCHEMA__STRICT_MODE` -> `schema.strict_mode`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use verity_config::VerityConfig;
//!
//! let config = VerityConfig::load_with_dotenv().expect("config");
//!
//! if config.http.is_configured() {
//!     println!("API base: {}", config.http.base_url);
//! }
//! ```

mod error;
mod http;
mod schema;

pub use error::ConfigError;
pub use http::HttpConfig;
pub use schema::SchemaConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VerityConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
}

impl VerityConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".verity/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("VERITY_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("verity").join("config.toml"))
    }

    /// Load `.env` from the current directory or its ancestors. Silently does
    /// nothing if no `.env` is found.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = VerityConfig::default();
        assert!(!config.http.is_configured());
        assert!(!config.schema.strict_mode);
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = VerityConfig::figment();
        let config: VerityConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.reject_error_status);
    }
}
