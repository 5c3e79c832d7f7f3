//! TOML-based application configuration.
//!
//! Stores:
//! - Focus timer defaults and the allowed duration bounds
//! - Display cadence and greeting name
//! - An optional replacement content seed
//!
//! Read from `~/.config/zenith/config.toml` when present. The file is never
//! written back; every field falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, ValidationError};

/// Focus timer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_minutes")]
    pub default_focus_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub default_break_minutes: u32,
    #[serde(default = "default_min_minutes")]
    pub min_focus_minutes: u32,
    #[serde(default = "default_max_focus_minutes")]
    pub max_focus_minutes: u32,
    #[serde(default = "default_min_minutes")]
    pub min_break_minutes: u32,
    #[serde(default = "default_max_break_minutes")]
    pub max_break_minutes: u32,
    /// Increment used by the duration steppers.
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
    #[serde(default = "default_task")]
    pub default_task: String,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw cadence while a timer phase or the breathing reset is live.
    #[serde(default = "default_redraw_interval_ms")]
    pub redraw_interval_ms: u64,
    /// How long a notice stays on screen.
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default = "default_start_tab")]
    pub start_tab: String,
}

/// Content seed configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Replacement seed file; the embedded seed is used when unset.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

// Default functions
fn default_focus_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}
fn default_min_minutes() -> u32 {
    5
}
fn default_max_focus_minutes() -> u32 {
    120
}
fn default_max_break_minutes() -> u32 {
    30
}
fn default_step_minutes() -> u32 {
    5
}
fn default_task() -> String {
    "Read Chapter 3 (Stats 210)".into()
}
fn default_redraw_interval_ms() -> u64 {
    1000
}
fn default_notice_ttl_ms() -> u64 {
    3000
}
fn default_user_name() -> String {
    "Alex".into()
}
fn default_start_tab() -> String {
    "Today".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_focus_minutes: default_focus_minutes(),
            default_break_minutes: default_break_minutes(),
            min_focus_minutes: default_min_minutes(),
            max_focus_minutes: default_max_focus_minutes(),
            min_break_minutes: default_min_minutes(),
            max_break_minutes: default_max_break_minutes(),
            step_minutes: default_step_minutes(),
            default_task: default_task(),
        }
    }
}

impl TimerConfig {
    /// Both ranges must be non-empty and start at one minute or more; the
    /// defaults must fall inside them.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range(
            "timer.min_focus_minutes",
            self.min_focus_minutes,
            self.max_focus_minutes,
        )?;
        check_range(
            "timer.min_break_minutes",
            self.min_break_minutes,
            self.max_break_minutes,
        )?;
        if self.step_minutes == 0 {
            return Err(ValidationError::invalid(
                "timer.step_minutes",
                "must be at least 1",
            ));
        }
        check_within(
            "timer.default_focus_minutes",
            self.default_focus_minutes,
            self.min_focus_minutes,
            self.max_focus_minutes,
        )?;
        check_within(
            "timer.default_break_minutes",
            self.default_break_minutes,
            self.min_break_minutes,
            self.max_break_minutes,
        )
    }
}

fn check_range(field: &str, min: u32, max: u32) -> Result<(), ValidationError> {
    if min == 0 {
        return Err(ValidationError::invalid(field, "must be at least 1"));
    }
    if min > max {
        return Err(ValidationError::invalid(
            field,
            format!("minimum {min} exceeds maximum {max}"),
        ));
    }
    Ok(())
}

fn check_within(field: &str, value: u32, min: u32, max: u32) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::invalid(
            field,
            format!("{value} is outside {min}..={max}"),
        ))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            redraw_interval_ms: default_redraw_interval_ms(),
            notice_ttl_ms: default_notice_ttl_ms(),
            user_name: default_user_name(),
            start_tab: default_start_tab(),
        }
    }
}

impl UiConfig {
    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms.max(1))
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}

/// Returns `~/.config/zenith[-dev]/` based on ZENITH_ENV.
///
/// Set ZENITH_ENV=dev to use the development directory. Nothing is created.
pub fn config_dir() -> PathBuf {
    let base_dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    let env = std::env::var("ZENITH_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("zenith-dev")
    } else {
        base_dir.join("zenith")
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Default location of the config file.
    pub fn default_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// # Errors
    ///
    /// Returns an error if any section holds an unusable value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.timer.validate()
    }

    /// Parse and validate a config document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML for this schema
    /// or fails [`Config::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else from the default location when that
    /// file exists, else return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => Some(String::new()),
            other => Some(other.to_string()),
        }
    }
}
