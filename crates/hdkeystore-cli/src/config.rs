//! CLI configuration — parsed from TOML file + environment variable overrides.
//!
//! Priority: environment variables > config file > defaults.

use anyhow::{Context, Result};
use hdkeystore_core::HashConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Top-level CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Argon2 parameters used for every derivation step
    #[serde(default)]
    pub hash: HashConfig,

    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Log level (off, error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse TOML config")
    }

    /// Load from `path` if given, otherwise fall back to `default_path` when
    /// it exists, otherwise use built-in defaults.
    pub fn load(path: Option<&Path>, default_path: &Path) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if default_path.exists() => Self::from_file(default_path),
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `HDKEYSTORE_T_COST`
    /// - `HDKEYSTORE_M_COST`
    /// - `HDKEYSTORE_P_COST`
    /// - `HDKEYSTORE_LOG_LEVEL`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("HDKEYSTORE_T_COST").and_then(|v| v.parse().ok()) {
            self.hash.t_cost = v;
        }
        if let Some(v) = lookup("HDKEYSTORE_M_COST").and_then(|v| v.parse().ok()) {
            self.hash.m_cost = v;
        }
        if let Some(v) = lookup("HDKEYSTORE_P_COST").and_then(|v| v.parse().ok()) {
            self.hash.p_cost = v;
        }
        if let Some(v) = lookup("HDKEYSTORE_LOG_LEVEL") {
            self.logging.level = v;
        }
    }

    /// Validate that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        self.hash.validate().context("Invalid [hash] section")?;

        anyhow::ensure!(
            LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()),
            "logging.level must be one of {:?}",
            LOG_LEVELS
        );

        Ok(())
    }
}
