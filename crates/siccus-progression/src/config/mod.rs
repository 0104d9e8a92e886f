// ABOUTME: Progression configuration loaded from environment variables
// ABOUTME: XP cost per level and the policy for backend summaries that disagree with ours
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

/// Configuration error types
pub mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use siccus_core::constants::{env_config, leveling};
use std::env;
use tracing::info;

/// What to do when a backend summary disagrees with the local computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DriftPolicy {
    /// Log the drift and display the locally recomputed numbers
    #[default]
    Recompute,
    /// Refuse the payload as corrupted
    Reject,
}

impl DriftPolicy {
    /// Configuration string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recompute => "recompute",
            Self::Reject => "reject",
        }
    }

    /// Parse from configuration string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "recompute" => Some(Self::Recompute),
            "reject" | "strict" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Progression settings shared by the tracker, report reconciliation and CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// XP cost of a single level
    pub xp_per_level: i64,
    /// Handling of backend summaries that disagree with ours
    pub drift_policy: DriftPolicy,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            xp_per_level: leveling::DEFAULT_XP_PER_LEVEL,
            drift_policy: DriftPolicy::default(),
        }
    }
}

impl ProgressionConfig {
    /// Load configuration from `SICCUS_XP_PER_LEVEL` and `SICCUS_DRIFT_POLICY`
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is not valid unicode, fails to parse,
    /// or the XP cost is not positive.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = read_env(env_config::XP_PER_LEVEL)? {
            config.xp_per_level = raw.trim().parse().map_err(|e| {
                ConfigError::Parse(format!("{}='{raw}': {e}", env_config::XP_PER_LEVEL))
            })?;
        }

        if let Some(raw) = read_env(env_config::DRIFT_POLICY)? {
            config.drift_policy = DriftPolicy::parse(&raw).ok_or_else(|| {
                ConfigError::Parse(format!(
                    "{}='{raw}': expected 'recompute' or 'reject'",
                    env_config::DRIFT_POLICY
                ))
            })?;
        }

        config.validate()?;

        info!(
            xp_per_level = config.xp_per_level,
            drift_policy = config.drift_policy.as_str(),
            "Progression configuration loaded"
        );

        Ok(config)
    }

    /// Check invariants the calculator relies on
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` if the XP cost is not positive.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.xp_per_level <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "xp_per_level must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Override the XP cost per level
    #[must_use]
    pub const fn with_xp_per_level(mut self, xp_per_level: i64) -> Self {
        self.xp_per_level = xp_per_level;
        self
    }

    /// Override the drift policy
    #[must_use]
    pub const fn with_drift_policy(mut self, drift_policy: DriftPolicy) -> Self {
        self.drift_policy = drift_policy;
        self
    }
}

fn read_env(key: &str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::EnvVar(e)),
    }
}
