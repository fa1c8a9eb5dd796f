//! Feature generation configuration
//!
//! Loaded from JSON. Every field has a default, so a partial file only
//! overrides what it names:
//!
//! ```json
//! { "mid_offsets": [30, 60], "trade_offsets": [10, 30, 120, 300] }
//! ```

use bitmicro_core::Timestamp;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::alignment::DEFAULT_SENSITIVITY;

/// Offsets, tiers and lookup tolerances for one feature-generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Seconds ahead (labels) and behind (lagged features) of each snapshot
    pub mid_offsets: Vec<Timestamp>,

    /// Trailing trade window lengths in seconds
    pub trade_offsets: Vec<Timestamp>,

    /// A nearest-snapshot match must be strictly closer than this (seconds)
    pub sensitivity: Timestamp,

    /// Levels per side used by the power features
    pub depth_levels: usize,

    /// Exponents of the distance weight, one imbalance/price pair each
    pub power_tiers: Vec<i32>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            mid_offsets: vec![30],
            trade_offsets: vec![10, 30, 120, 300],
            sensitivity: DEFAULT_SENSITIVITY,
            depth_levels: 10,
            power_tiers: vec![2, 8],
        }
    }
}

impl FeatureConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration can drive a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trade_offsets.is_empty() {
            return Err(ConfigError::Invalid(
                "trade_offsets must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .mid_offsets
            .iter()
            .chain(self.trade_offsets.iter())
            .find(|&&offset| offset <= 0)
        {
            return Err(ConfigError::Invalid(format!(
                "offsets must be positive, got {}",
                bad
            )));
        }
        if self.sensitivity <= 0 {
            return Err(ConfigError::Invalid(format!(
                "sensitivity must be positive, got {}",
                self.sensitivity
            )));
        }
        if self.depth_levels == 0 {
            return Err(ConfigError::Invalid(
                "depth_levels must be at least 1".to_string(),
            ));
        }
        if self.power_tiers.is_empty() {
            return Err(ConfigError::Invalid(
                "power_tiers must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Longest trailing trade window; decides how far back trades are fetched
    pub fn largest_trade_offset(&self) -> Timestamp {
        self.trade_offsets.iter().copied().max().unwrap_or(0)
    }
}

/// Configuration loading errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
