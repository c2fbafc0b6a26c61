//! Configuration Management
//!
//! YAML configuration for the simulator:
//!
//! ```yaml
//! simulator:
//!   ledger_capacity: 100
//! bulk_load:
//!   path: input.txt
//! logger:
//!   level: info
//! ```
//!
//! Every section and field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::DEFAULT_LEDGER_CAPACITY;

/// Default bulk-load source
pub const DEFAULT_BULK_LOAD_PATH: &str = "input.txt";

/// Accepted log level names
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConf {
    /// Message budget of each generation's ledger
    pub ledger_capacity: i64,
}

impl Default for SimulatorConf {
    fn default() -> Self {
        Self {
            ledger_capacity: DEFAULT_LEDGER_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkLoadConf {
    pub path: PathBuf,
}

impl Default for BulkLoadConf {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_BULK_LOAD_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConf {
    pub level: String,
}

impl Default for LoggerConf {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub simulator: SimulatorConf,
    pub bulk_load: BulkLoadConf,
    pub logger: LoggerConf,
}

impl SimulatorConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit; treat it as all defaults
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        log::info!("Configuration loaded from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulator.ledger_capacity <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "ledger_capacity must be positive, got {}",
                self.simulator.ledger_capacity
            )));
        }
        let level = self.logger.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "unknown log level `{}`",
                self.logger.level
            )));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
