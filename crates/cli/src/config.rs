// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run configuration loaded from TOML.

use chrono::format::{Item, StrftimeItems};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Default budget for `I wait until I see "..."`, in seconds
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 10;
/// Default date rendering: day, month, year, hour, minute
pub const DEFAULT_DATE_FORMAT: &str = "%d%m%Y%H%M";
/// Default limit on nested composite expansion
pub const DEFAULT_MAX_EXPANSION_DEPTH: usize = 16;

/// Errors that can occur when loading a run configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Validation(String),
}

fn default_wait_timeout_secs() -> u64 {
    DEFAULT_WAIT_TIMEOUT_SECS
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_max_expansion_depth() -> usize {
    DEFAULT_MAX_EXPANSION_DEPTH
}

/// Settings shared by every scenario of a run
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Budget for waits that don't name one (default: 10)
    /// Overridden by --timeout CLI flag
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// chrono format for date steps (default: "%d%m%Y%H%M")
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Fixed UTC offset for date steps; local time when absent
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,

    /// Maximum composite nesting (default: 16)
    #[serde(default = "default_max_expansion_depth")]
    pub max_expansion_depth: usize,

    /// Origin prepended to visited paths starting with `/`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Field names used by the login macro
    #[serde(default)]
    pub login: LoginConfig,

    /// Parameters available before the first step
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            wait_timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
            date_format: default_date_format(),
            utc_offset_minutes: None,
            max_expansion_depth: DEFAULT_MAX_EXPANSION_DEPTH,
            base_url: None,
            login: LoginConfig::default(),
            parameters: BTreeMap::new(),
        }
    }
}

impl RunConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Validation(format!(
                "date_format '{}' is not a valid strftime format",
                self.date_format
            )));
        }
        if let Some(minutes) = self.utc_offset_minutes {
            if fixed_offset(minutes).is_none() {
                return Err(ConfigError::Validation(format!(
                    "utc_offset_minutes {} is out of range",
                    minutes
                )));
            }
        }
        if self.max_expansion_depth == 0 {
            return Err(ConfigError::Validation(
                "max_expansion_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Offset for date steps; `None` means local time
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes.and_then(fixed_offset)
    }

    /// Join `base_url` onto paths starting with `/`
    pub fn resolve_url(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if url.starts_with('/') => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url.to_string(),
        }
    }
}

fn fixed_offset(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

fn default_username_field() -> String {
    "signin_username".to_string()
}

fn default_password_field() -> String {
    "signin_password".to_string()
}

fn default_password_suffix() -> String {
    "69".to_string()
}

fn default_submit_button() -> String {
    "connexion".to_string()
}

/// Form fields filled by `I am connected with "..." on "..."`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoginConfig {
    #[serde(default = "default_username_field")]
    pub username_field: String,

    #[serde(default = "default_password_field")]
    pub password_field: String,

    /// Appended to the login to form the password
    #[serde(default = "default_password_suffix")]
    pub password_suffix: String,

    #[serde(default = "default_submit_button")]
    pub submit_button: String,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            username_field: default_username_field(),
            password_field: default_password_field(),
            password_suffix: default_password_suffix(),
            submit_button: default_submit_button(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
