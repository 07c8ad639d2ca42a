//! Configuration settings for Predictrix.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Prefix for environment overrides, e.g. `PREDICTRIX__API__BASE_URL`.
const ENV_PREFIX: &str = "PREDICTRIX";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// Local storage configuration.
    pub storage: StorageConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location, falling back to defaults.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file, layering environment overrides on top.
    ///
    /// A missing file is not an error; every field has a default.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(Self::default_path);

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(config_path.as_path()).required(false))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(Self::default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Reject settings the client cannot run with.
    pub fn validate(&self) -> crate::Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(crate::Error::config("api.base_url must not be empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(crate::Error::config("api.timeout_secs must be positive"));
        }
        Ok(())
    }

    fn default_path() -> PathBuf {
        super::config_dir()
            .map(|p| p.join("config.toml"))
            .unwrap_or_else(|_| PathBuf::from("config.toml"))
    }
}

/// API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend origin every request is resolved against.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retry behavior for transport failures.
    pub retry: RetryConfig,
}

impl ApiConfig {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.predictrix.app/api".to_string(),
            timeout_secs: 30,
            retry: RetryConfig::default(),
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Delay before each retry, in seconds. Its length is the retry limit.
    pub delays_secs: Vec<u64>,
    /// Only retry idempotent methods (GET, HEAD, PUT, DELETE, OPTIONS).
    pub idempotent_only: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            delays_secs: vec![5, 15, 30],
            idempotent_only: false,
        }
    }
}

/// Local storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON store file. Defaults to `<data_dir>/store.json`.
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the store file path.
    pub fn resolve_path(&self) -> crate::Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(super::data_dir()?.join("store.json")),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Also write a daily-rolling log file into the log directory.
    pub file: bool,
    /// Override for the log directory.
    pub directory: Option<PathBuf>,
}

impl LoggingConfig {
    /// Resolve the directory log files go to.
    pub fn resolve_directory(&self) -> crate::Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => super::log_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "predictrix=info".to_string(),
            file: false,
            directory: None,
        }
    }
}
