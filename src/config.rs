//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then command-line flags applied by the caller.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    ENV_FETCH_CONCURRENCY, ENV_STORE_PATH, MAX_FETCH_CONCURRENCY, REGISTRY_FILE_NAME,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Global configuration for result processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry snapshot location
    pub store_path: PathBuf,

    /// Maximum pages fetched at once
    pub fetch_concurrency: usize,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    pub user_agent: String,

    /// Replace earlier imports of the same source instead of refusing them
    pub allow_reimport: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            fetch_concurrency: num_cpus::get().clamp(1, MAX_FETCH_CONCURRENCY),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allow_reimport: false,
        }
    }
}

/// `<data_dir>/results-processor/registry.json`, or the working directory
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(REGISTRY_FILE_NAME)
}

/// `<config_dir>/results-processor/config.toml`, when a config dir exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl Config {
    /// Load defaults, the config file and environment overrides
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|path| path.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file over the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;
        let config: Config = toml::from_str(&text)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_STORE_PATH).filter(|value| !value.trim().is_empty()) {
            self.store_path = PathBuf::from(path);
        }

        if let Some(value) = lookup(ENV_FETCH_CONCURRENCY) {
            self.fetch_concurrency = value.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a positive integer, got '{}'",
                    ENV_FETCH_CONCURRENCY, value
                ))
            })?;
        }

        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.fetch_concurrency == 0 {
            return Err(Error::configuration("fetch_concurrency must be at least 1"));
        }

        if self.request_timeout_secs == 0 {
            return Err(Error::configuration("request_timeout_secs must be at least 1"));
        }

        if self.user_agent.trim().is_empty() {
            return Err(Error::configuration("user_agent must not be empty"));
        }

        if self.store_path.as_os_str().is_empty() {
            return Err(Error::configuration("store_path must not be empty"));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Use a different registry location
    pub fn with_store_path(mut self, path: PathBuf) -> Self {
        self.store_path = path;
        self
    }

    /// Set maximum concurrent fetches
    pub fn with_fetch_concurrency(mut self, concurrency: usize) -> Self {
        self.fetch_concurrency = concurrency;
        self
    }

    /// Set the HTTP timeout
    pub fn with_request_timeout_secs(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Allow replacing earlier imports
    pub fn with_reimport(mut self, allow: bool) -> Self {
        self.allow_reimport = allow;
        self
    }
}
