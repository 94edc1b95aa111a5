//! Buffer configuration.
//!
//! # Configuration Precedence
//!
//! Settings are resolved in this order (highest priority first):
//!
//! 1. **Programmatic**: values set via builder methods (`with_max_capacity(..)`)
//! 2. **Environment variables**: values from `BYTEBUF_*` env vars
//! 3. **Defaults**: built-in defaults from [`BufferConfig::default()`]
//!
//! # Supported Environment Variables
//!
//! | Variable | Type | Maps to |
//! |----------|------|---------|
//! | `BYTEBUF_INITIAL_CAPACITY` | `usize` | `initial_capacity` |
//! | `BYTEBUF_MAX_CAPACITY` | `usize` or `none` | `max_capacity` |
//! | `BYTEBUF_MAX_FILE_SIZE` | `u64` or `none` | `max_file_size` |

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Environment variable name for the initial capacity.
pub const ENV_INITIAL_CAPACITY: &str = "BYTEBUF_INITIAL_CAPACITY";
/// Environment variable name for the growth cap.
pub const ENV_MAX_CAPACITY: &str = "BYTEBUF_MAX_CAPACITY";
/// Environment variable name for the file load limit.
pub const ENV_MAX_FILE_SIZE: &str = "BYTEBUF_MAX_FILE_SIZE";

/// Default capacity of a buffer built from a config.
pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

/// Construction and growth settings for a [`ByteBuffer`](crate::ByteBuffer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Capacity allocated up front.
    pub initial_capacity: usize,

    /// Upper bound on capacity reached through growth.
    /// Default: None (unbounded).
    pub max_capacity: Option<usize>,

    /// Largest file accepted by file loads, in bytes.
    /// Default: None (unbounded).
    pub max_file_size: Option<u64>,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_capacity: None,
            max_file_size: None,
        }
    }
}

impl BufferConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with `BYTEBUF_*` environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Sets the initial capacity.
    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the growth cap.
    #[must_use]
    pub const fn with_max_capacity(mut self, max_capacity: Option<usize>) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Sets the file load limit.
    #[must_use]
    pub const fn with_max_file_size(mut self, max_file_size: Option<u64>) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Checks that the settings are consistent with each other.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(max) = self.max_capacity {
            if self.initial_capacity > max {
                return Err(ConfigError::Invalid(format!(
                    "initial_capacity {} exceeds max_capacity {max}",
                    self.initial_capacity
                )));
            }
        }
        Ok(())
    }
}

/// Apply environment variable overrides to a [`BufferConfig`].
///
/// Only variables that are set in the environment are applied.
/// Returns an error if a variable is set but contains an unparseable value.
pub fn apply_env_overrides(config: &mut BufferConfig) -> Result<(), ConfigError> {
    apply_overrides_with(config, read_env)
}

/// Apply overrides using `lookup` in place of the process environment.
pub fn apply_overrides_with<F>(config: &mut BufferConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_INITIAL_CAPACITY) {
        config.initial_capacity = parse_usize(ENV_INITIAL_CAPACITY, &val)?;
    }
    if let Some(val) = lookup(ENV_MAX_CAPACITY) {
        config.max_capacity = parse_optional(ENV_MAX_CAPACITY, &val, parse_usize)?;
    }
    if let Some(val) = lookup(ENV_MAX_FILE_SIZE) {
        config.max_file_size = parse_optional(ENV_MAX_FILE_SIZE, &val, parse_u64)?;
    }
    Ok(())
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_usize(var: &'static str, val: &str) -> Result<usize, ConfigError> {
    val.trim()
        .parse::<usize>()
        .map_err(|e| invalid(var, val, e.to_string()))
}

fn parse_u64(var: &'static str, val: &str) -> Result<u64, ConfigError> {
    val.trim()
        .parse::<u64>()
        .map_err(|e| invalid(var, val, e.to_string()))
}

fn parse_optional<T>(
    var: &'static str,
    val: &str,
    parse: fn(&'static str, &str) -> Result<T, ConfigError>,
) -> Result<Option<T>, ConfigError> {
    match val.trim().to_lowercase().as_str() {
        "none" | "unlimited" => Ok(None),
        _ => parse(var, val).map(Some),
    }
}

fn invalid(var: &'static str, val: &str, reason: String) -> ConfigError {
    ConfigError::InvalidEnv {
        var,
        value: val.to_string(),
        reason,
    }
}
