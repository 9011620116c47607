//! Configuration with validation and defaults.
//!
//! Sections cover the three tunable concerns: session timing, hint
//! distributions, and the storage location. Everything else in the engine is
//! data-driven through the prize table.

use crate::errors::{ConfigError, TriviaqResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level engine configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TriviaqConfig {
    pub session: SessionConfig,
    pub hints: HintConfig,
    pub storage: StorageConfig,
}

/// Session timing rules
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Wall-clock limit after which a collaborator should drive `timeout()`
    pub time_limit_minutes: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit_minutes: 35,
        }
    }
}

impl SessionConfig {
    pub fn time_limit(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.time_limit_minutes)
    }
}

/// Hint distribution parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HintConfig {
    /// Probability that the friend names the correct letter
    pub friend_call_accuracy: f64,
    /// Bounds (inclusive, out of 100 votes) for the correct letter's
    /// audience share
    pub audience_correct_share_min: u32,
    pub audience_correct_share_max: u32,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            friend_call_accuracy: 0.8,
            audience_correct_share_min: 35,
            audience_correct_share_max: 70,
        }
    }
}

/// Storage collaborator settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_directory: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_directory: "./DB/triviaq".to_string(),
        }
    }
}

impl TriviaqConfig {
    pub fn validate(&self) -> TriviaqResult<()> {
        if self.session.time_limit_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.time_limit_minutes".to_string(),
                value: self.session.time_limit_minutes.to_string(),
                reason: "must be positive".to_string(),
            }
            .into());
        }

        let accuracy = self.hints.friend_call_accuracy;
        if !(0.0..=1.0).contains(&accuracy) {
            return Err(ConfigError::InvalidValue {
                field: "hints.friend_call_accuracy".to_string(),
                value: accuracy.to_string(),
                reason: "must be a probability in [0, 1]".to_string(),
            }
            .into());
        }

        let (min, max) = (
            self.hints.audience_correct_share_min,
            self.hints.audience_correct_share_max,
        );
        if min > max || max > 100 {
            return Err(ConfigError::InvalidValue {
                field: "hints.audience_correct_share".to_string(),
                value: format!("{}..={}", min, max),
                reason: "bounds must satisfy min <= max <= 100".to_string(),
            }
            .into());
        }

        if self.storage.data_directory.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.data_directory".to_string(),
                value: String::new(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TriviaqResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        let config: Self =
            toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> TriviaqResult<()> {
        let raw = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        Ok(())
    }
}
