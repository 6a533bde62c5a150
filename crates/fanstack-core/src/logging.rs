#![forbid(unsafe_code)]

//! Logging setup.
//!
//! Library code logs through `tracing` macros only. Binaries call [`init`]
//! once at startup; with the `tracing-json` feature that installs a
//! `tracing-subscriber` fmt subscriber (optionally JSON), without it the
//! call is a no-op and events go nowhere.

use std::fmt;

use crate::motion::parse_bool;

/// Environment variable holding the `EnvFilter` directive.
const ENV_LOG: &str = "FANSTACK_LOG";
/// Environment variable switching to JSON output.
const ENV_LOG_JSON: &str = "FANSTACK_LOG_JSON";

/// Subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `"info,fanstack_runtime=debug"`.
    pub filter: String,
    /// Emit one JSON object per event instead of human-readable lines.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Read the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read the configuration using a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(filter) = get_env(ENV_LOG)
            && !filter.trim().is_empty()
        {
            config.filter = filter.trim().to_string();
        }
        if let Some(json) = get_env(ENV_LOG_JSON).and_then(|v| parse_bool(&v)) {
            config.json = json;
        }
        config
    }

    /// Override the filter directive.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Toggle JSON output.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Failure to install the global subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogInitError {
    /// The filter directive did not parse.
    InvalidFilter(String),
    /// A global subscriber was already installed.
    AlreadyInstalled(String),
}

impl fmt::Display for LogInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFilter(msg) => write!(f, "invalid log filter: {msg}"),
            Self::AlreadyInstalled(msg) => write!(f, "subscriber already installed: {msg}"),
        }
    }
}

impl std::error::Error for LogInitError {}

/// Install the global subscriber described by `config`.
#[cfg(feature = "tracing-json")]
pub fn init(config: &LogConfig) -> Result<(), LogInitError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| LogInitError::InvalidFilter(e.to_string()))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| LogInitError::AlreadyInstalled(e.to_string()))?;
    tracing::debug!(filter = %config.filter, json = config.json, "logging initialized");
    Ok(())
}

/// Install the global subscriber described by `config`.
///
/// Without the `tracing-json` feature there is no subscriber to install.
#[cfg(not(feature = "tracing-json"))]
pub fn init(_config: &LogConfig) -> Result<(), LogInitError> {
    Ok(())
}
