//! Connection settings for the ZeroVeil relay.
//!
//! Settings come from three independent, optional environment variables with
//! static defaults. A TOML file in the platform config directory can provide
//! a base layer for applications that prefer files over environment.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default relay endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.zeroveil.io/v1";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the relay endpoint URL.
pub const ENV_ENDPOINT: &str = "ZEROVEIL_ENDPOINT";

/// Environment variable holding the relay API key.
pub const ENV_API_KEY: &str = "ZEROVEIL_API_KEY";

/// Environment variable holding the per-request timeout in whole seconds.
pub const ENV_TIMEOUT: &str = "ZEROVEIL_TIMEOUT";

/// Connection configuration for the ZeroVeil relay.
///
/// Immutable once handed to a client. `Debug` output never shows the key.
#[derive(Clone, PartialEq, Eq)]
pub struct ZeroVeilConfig {
    /// Relay API endpoint URL
    pub endpoint: String,
    /// API key used as a bearer token
    pub api_key: Option<String>,
    /// Per-request timeout (zero disables it)
    pub timeout: Duration,
}

impl Default for ZeroVeilConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for ZeroVeilConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZeroVeilConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ZeroVeilConfig {
    /// Build a config from an environment-like lookup function.
    ///
    /// Keys that resolve to `None` keep their defaults. This is the pure core
    /// of [`load_config`].
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().with_overrides(lookup)
    }

    /// Parse a TOML document with optional `endpoint`, `api_key` and
    /// `timeout_secs` keys. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let file: FileConfig = toml::from_str(contents)?;
        let defaults = Self::default();

        Ok(Self {
            endpoint: file.endpoint.unwrap_or(defaults.endpoint),
            api_key: file.api_key,
            timeout: file
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
        })
    }

    /// Load a config from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load the config file from the platform config directory (if present)
    /// and apply the `ZEROVEIL_*` environment variables on top.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read or is not valid TOML
    /// - `ZEROVEIL_TIMEOUT` is set to something other than a non-negative integer
    pub fn load_layered() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        let base = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            tracing::debug!("Config file not found, using defaults");
            Self::default()
        };

        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Path of the optional config file, e.g. `~/.config/zeroveil/config.toml`.
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("io", "zeroveil", "zeroveil").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply overrides from a lookup function on top of this config.
    pub fn with_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            tracing::debug!("Override endpoint from {}: {}", ENV_ENDPOINT, endpoint);
            self.endpoint = endpoint;
        }

        if let Some(api_key) = lookup(ENV_API_KEY) {
            tracing::debug!("Override api_key from {}", ENV_API_KEY);
            self.api_key = Some(api_key);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            self.timeout = parse_timeout(ENV_TIMEOUT, &raw)?;
            tracing::debug!("Override timeout from {}: {:?}", ENV_TIMEOUT, self.timeout);
        }

        Ok(self)
    }

    /// Set the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API key, if one is configured and non-empty.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Per-request timeout, or `None` when the configured timeout is zero.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        (!self.timeout.is_zero()).then_some(self.timeout)
    }

    /// Full URL of the chat completions route.
    ///
    /// Trailing slashes on the endpoint are stripped before the path is appended.
    #[must_use]
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

/// Load config from the `ZEROVEIL_ENDPOINT`, `ZEROVEIL_API_KEY` and
/// `ZEROVEIL_TIMEOUT` environment variables.
///
/// Never touches the file system. Unset variables keep their defaults.
///
/// # Errors
/// Returns [`ConfigError::InvalidValue`] if `ZEROVEIL_TIMEOUT` is not a
/// non-negative integer.
pub fn load_config() -> ConfigResult<ZeroVeilConfig> {
    ZeroVeilConfig::from_lookup(|key| std::env::var(key).ok())
}

fn parse_timeout(field: &str, raw: &str) -> ConfigResult<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected a non-negative integer number of seconds, got {raw:?}"),
        })
}

/// On-disk representation; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    endpoint: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}
