#![forbid(unsafe_code)]

//! Runtime knobs that are not part of the prop surface.
//!
//! | Variable                     | Type  | Default |
//! |------------------------------|-------|---------|
//! | `TAREA_STYLE_CACHE`          | bool  | `false` |
//! | `TAREA_STYLE_CACHE_CAPACITY` | usize | `64`    |
//! | `TAREA_SELECTION_SHIM`       | bool  | `true`  |
//!
//! Booleans accept `1/0/true/false/yes/no/on/off`.

use std::fmt;

/// Environment variable enabling the per-element style cache.
const ENV_STYLE_CACHE: &str = "TAREA_STYLE_CACHE";
/// Environment variable sizing the style cache.
const ENV_STYLE_CACHE_CAPACITY: &str = "TAREA_STYLE_CACHE_CAPACITY";
/// Environment variable toggling selection restore after a measure cycle.
const ENV_SELECTION_SHIM: &str = "TAREA_SELECTION_SHIM";

const DEFAULT_STYLE_CACHE_CAPACITY: usize = 64;

/// An environment value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBool { key: &'static str, value: String },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBool { key, value } => {
                write!(f, "{key}: expected a boolean, got {value:?}")
            }
            Self::InvalidNumber { key, value } => {
                write!(f, "{key}: expected a non-negative integer, got {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Text area runtime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAreaConfig {
    /// Cache each element's sizing style between measurements.
    pub use_style_cache: bool,
    /// Maximum number of elements kept in the style cache.
    pub style_cache_capacity: usize,
    /// Re-apply the selection of a focused element once a measure cycle
    /// settles, so hosts that scroll on height changes keep the caret in view.
    pub restore_selection_after_measure: bool,
}

impl Default for TextAreaConfig {
    fn default() -> Self {
        Self {
            use_style_cache: false,
            style_cache_capacity: DEFAULT_STYLE_CACHE_CAPACITY,
            restore_selection_after_measure: true,
        }
    }
}

impl TextAreaConfig {
    /// Enable the style cache (builder).
    #[must_use]
    pub fn with_style_cache(mut self, enabled: bool) -> Self {
        self.use_style_cache = enabled;
        self
    }

    /// Set the style cache capacity (builder).
    #[must_use]
    pub fn with_style_cache_capacity(mut self, capacity: usize) -> Self {
        self.style_cache_capacity = capacity;
        self
    }

    /// Toggle selection restore after measuring (builder).
    #[must_use]
    pub fn with_selection_restore(mut self, enabled: bool) -> Self {
        self.restore_selection_after_measure = enabled;
        self
    }

    /// Load from the process environment, ignoring invalid values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Load using a custom environment lookup, ignoring invalid values.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = env_bool(&get_env, ENV_STYLE_CACHE).and_then(Result::ok) {
            config.use_style_cache = value;
        }
        if let Some(value) = env_usize(&get_env, ENV_STYLE_CACHE_CAPACITY).and_then(Result::ok) {
            config.style_cache_capacity = value;
        }
        if let Some(value) = env_bool(&get_env, ENV_SELECTION_SHIM).and_then(Result::ok) {
            config.restore_selection_after_measure = value;
        }
        config
    }

    /// Load using a custom environment lookup, rejecting invalid values.
    pub fn try_from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = env_bool(&get_env, ENV_STYLE_CACHE).transpose()? {
            config.use_style_cache = value;
        }
        if let Some(value) = env_usize(&get_env, ENV_STYLE_CACHE_CAPACITY).transpose()? {
            config.style_cache_capacity = value;
        }
        if let Some(value) = env_bool(&get_env, ENV_SELECTION_SHIM).transpose()? {
            config.restore_selection_after_measure = value;
        }
        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_bool<F>(get_env: &F, key: &'static str) -> Option<Result<bool, ConfigError>>
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key).map(|value| {
        parse_bool(&value).ok_or(ConfigError::InvalidBool { key, value })
    })
}

fn env_usize<F>(get_env: &F, key: &'static str) -> Option<Result<usize, ConfigError>>
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key).map(|value| {
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value })
    })
}
