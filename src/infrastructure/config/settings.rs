//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file.
//!
//! # Example
//!
//! ```no_run
//! use siteplan::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::hash::Hash;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::domain::Scenario;
use crate::error::{ConfigError, Result};

/// Where raw input records live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding the CSV record files.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Input data location.
    #[serde(default)]
    pub data: DataConfig,

    /// Planning scenario: target sets, annualization constants, budget and
    /// site count.
    pub scenario: Scenario,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// A relative `data.dir` is resolved against the config file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config = Self::parse_toml(&content)?;
        if config.data.dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.data.dir = parent.join(&config.data.dir);
            }
        }
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        validate_scenario(&self.scenario)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

/// Validate scenario parameters.
///
/// # Errors
///
/// Returns [`ConfigError`] naming the offending field.
pub fn validate_scenario(scenario: &Scenario) -> Result<()> {
    if scenario.target_facilities.is_empty() {
        return Err(ConfigError::MissingField {
            field: "target_facilities",
        }
        .into());
    }
    if scenario.target_warehouses.is_empty() {
        return Err(ConfigError::MissingField {
            field: "target_warehouses",
        }
        .into());
    }
    if let Some(dup) = first_duplicate(&scenario.target_facilities) {
        return Err(ConfigError::InvalidValue {
            field: "target_facilities",
            reason: format!("'{dup}' is listed more than once"),
        }
        .into());
    }
    if let Some(dup) = first_duplicate(&scenario.target_warehouses) {
        return Err(ConfigError::InvalidValue {
            field: "target_warehouses",
            reason: format!("'{dup}' is listed more than once"),
        }
        .into());
    }
    if scenario.days_per_year == 0 {
        return Err(ConfigError::InvalidValue {
            field: "days_per_year",
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    if scenario.amortization_years == 0 {
        return Err(ConfigError::InvalidValue {
            field: "amortization_years",
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    if !scenario.budget_limit.is_finite() || scenario.budget_limit < 0.0 {
        return Err(ConfigError::InvalidValue {
            field: "budget_limit",
            reason: "must be a finite number, 0 or greater".to_string(),
        }
        .into());
    }
    if scenario.site_count == 0 {
        return Err(ConfigError::InvalidValue {
            field: "site_count",
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(())
}

fn first_duplicate<T: Eq + Hash>(items: &[T]) -> Option<&T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().find(|item| !seen.insert(*item))
}
