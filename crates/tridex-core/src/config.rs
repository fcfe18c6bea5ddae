//! `Tridex` Configuration Module
//!
//! Provides configuration file support via `tridex.toml`, environment
//! variables, and inline TOML.
//!
//! # Priority (highest to lowest)
//!
//! 1. Environment variables (`TRIDEX_*`)
//! 2. Configuration file (`tridex.toml`)
//! 3. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Index construction section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Number of distinct trigrams to pre-allocate for.
    pub initial_capacity: usize,
    /// Prune trigrams found in more than this fraction of documents after
    /// building. `None` disables pruning.
    pub prune_threshold: Option<f64>,
    /// Run a sort pass after building. Only `build_with_ids` can insert IDs
    /// out of order; positional builds are already sorted.
    pub sort_on_build: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 4096,
            prune_threshold: None,
            sort_on_build: false,
        }
    }
}

/// Query section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Maximum candidates returned per query (`None` = unlimited).
    pub max_candidates: Option<usize>,
}

/// Logging configuration section.
///
/// The library emits `tracing` events but installs no subscriber. `level`
/// is the default filter directive for the subscriber the caller sets up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main `Tridex` configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TridexConfig {
    /// Index construction configuration.
    pub index: IndexConfig,
    /// Query configuration.
    pub query: QueryConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl TridexConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("tridex.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("TRIDEX_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(threshold) = self.index.prune_threshold {
            if !(threshold > 0.0 && threshold <= 1.0) {
                return Err(ConfigError::InvalidValue {
                    key: "index.prune_threshold".to_string(),
                    message: format!("value {threshold} is out of range (0.0, 1.0]"),
                });
            }
        }

        if self.query.max_candidates == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "query.max_candidates".to_string(),
                message: "value must be >= 1".to_string(),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
