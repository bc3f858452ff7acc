//! Configuration file loading with precedence handling.

use crate::state::controller::{
    DragTuning, DEFAULT_AUTOSCROLL_STEP, DEFAULT_AUTOSCROLL_TICK, DEFAULT_DRAG_THRESHOLD,
    DEFAULT_LONG_PRESS,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LANEDRAG_CONFIG";
/// Environment variable overriding the drag threshold.
pub const THRESHOLD_ENV: &str = "LANEDRAG_DRAG_THRESHOLD";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/lanedrag/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Pixels a press must move before it becomes a drag.
    #[serde(default)]
    pub drag_threshold: Option<f32>,

    /// Touch hold time before a drag starts, in milliseconds.
    #[serde(default)]
    pub long_press_ms: Option<u64>,

    /// Interval between auto-scroll ticks, in milliseconds.
    #[serde(default)]
    pub autoscroll_tick_ms: Option<u64>,

    /// Pixels scrolled per auto-scroll tick.
    #[serde(default)]
    pub autoscroll_step: Option<f32>,

    /// Haptic pulse when a long press starts a drag.
    #[serde(default)]
    pub haptics: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Drag threshold in pixels.
    pub drag_threshold: f32,
    /// Long-press delay.
    pub long_press: Duration,
    /// Auto-scroll tick interval.
    pub autoscroll_tick: Duration,
    /// Auto-scroll step in pixels.
    pub autoscroll_step: f32,
    /// Haptic pulse on long press.
    pub haptics: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            long_press: DEFAULT_LONG_PRESS,
            autoscroll_tick: DEFAULT_AUTOSCROLL_TICK,
            autoscroll_step: DEFAULT_AUTOSCROLL_STEP,
            haptics: true,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Engine tuning described by this config.
    pub fn tuning(&self) -> DragTuning {
        DragTuning {
            drag_threshold: self.drag_threshold,
            long_press: self.long_press,
            autoscroll_tick: self.autoscroll_tick,
            autoscroll_step: self.autoscroll_step,
            haptics: self.haptics,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/lanedrag/lanedrag.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("lanedrag").join("lanedrag.log")
    } else {
        PathBuf::from("lanedrag.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/lanedrag/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lanedrag").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LANEDRAG_CONFIG` environment variable
/// 3. Default path `~/.config/lanedrag/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `LANEDRAG_DRAG_THRESHOLD`: Override drag threshold. Values that are not
///   finite, non-negative numbers are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(THRESHOLD_ENV) {
        match raw.trim().parse::<f32>() {
            Ok(threshold) if valid_threshold(threshold) => {
                config.drag_threshold = threshold;
            }
            _ => warn!(value = %raw, "ignoring invalid {THRESHOLD_ENV}"),
        }
    }

    config
}

fn valid_threshold(threshold: f32) -> bool {
    threshold.is_finite() && threshold >= 0.0
}

fn valid_step(step: f32) -> bool {
    step.is_finite() && step > 0.0
}

/// Keep `value` if `valid`, otherwise warn and fall back to `default`.
fn checked<T: Copy + std::fmt::Debug>(
    key: &str,
    value: Option<T>,
    valid: impl Fn(T) -> bool,
    default: T,
) -> T {
    match value {
        Some(v) if valid(v) => v,
        Some(v) => {
            warn!(key, value = ?v, "ignoring invalid config value, using default");
            default
        }
        None => default,
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// A `drag_threshold` that is negative or not finite, or an
/// `autoscroll_step` that is not a finite positive number, is ignored with
/// a warning.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        drag_threshold: checked(
            "drag_threshold",
            config.drag_threshold,
            valid_threshold,
            defaults.drag_threshold,
        ),
        long_press: config
            .long_press_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.long_press),
        autoscroll_tick: config
            .autoscroll_tick_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.autoscroll_tick),
        autoscroll_step: checked(
            "autoscroll_step",
            config.autoscroll_step,
            valid_step,
            defaults.autoscroll_step,
        ),
        haptics: config.haptics.unwrap_or(defaults.haptics),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Arguments
///
/// * `config` - Base resolved config (already merged with defaults, file, and env vars)
/// * `threshold_override` - Optional threshold from `--threshold`
/// * `haptics_override` - `Some(false)` from `--no-haptics`
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    threshold_override: Option<f32>,
    haptics_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(threshold) = threshold_override {
        config.drag_threshold = threshold;
    }

    if let Some(haptics) = haptics_override {
        config.haptics = haptics;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
