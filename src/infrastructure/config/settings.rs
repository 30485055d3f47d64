//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the database location can be
//! overridden with the `WAGERBOOK_DATABASE` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use wagerbook::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init_with_level(&config.logging.level);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ledger::{LedgerConfig, MAX_STARTING_POINTS};
use super::logging::{LoggingConfig, LOG_FORMATS};
use crate::error::{ConfigError, Result};
use crate::infrastructure::paths;

/// Environment variable that overrides [`Config::database`].
pub const DATABASE_ENV: &str = "WAGERBOOK_DATABASE";

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Account settings.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Path to SQLite database file.
    ///
    /// Defaults to `~/.wagerbook/wagerbook.db`.
    #[serde(default = "default_database_path")]
    pub database: String,
}

fn default_database_path() -> String {
    paths::default_database().to_string_lossy().into_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            ledger: LedgerConfig::default(),
            database: default_database_path(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies the `WAGERBOOK_DATABASE` override before validating.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.override_database(std::env::var(DATABASE_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file fails to load.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.override_database(std::env::var(DATABASE_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Replace the database path when `value` is a non-blank string.
    pub fn override_database(&mut self, value: Option<String>) {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.database = value;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if !(0..=MAX_STARTING_POINTS).contains(&self.ledger.starting_points) {
            return Err(ConfigError::InvalidValue {
                field: "starting_points",
                reason: format!("must be between 0 and {MAX_STARTING_POINTS}"),
            }
            .into());
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "level" }.into());
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        Ok(())
    }

}
