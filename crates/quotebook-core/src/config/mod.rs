//! Runtime configuration for Quotebook clients.
//!
//! Values are layered: explicit overrides (CLI flags) win over environment
//! variables, which win over the JSON config file, which wins over defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sync::DEFAULT_SERVER_URL;
use crate::util::{is_http_url, normalize_text_option};

const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_SYNC_INTERVAL_SECS: u64 = 300;

pub const ENV_DATA_DIR: &str = "QUOTEBOOK_DATA_DIR";
pub const ENV_SERVER_URL: &str = "QUOTEBOOK_SERVER_URL";
pub const ENV_SYNC_INTERVAL_SECS: &str = "QUOTEBOOK_SYNC_INTERVAL_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "QUOTEBOOK_REQUEST_TIMEOUT_SECS";

/// Settings as stored in `config.json`; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub sync_interval_secs: Option<u64>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Read a config file; a missing file yields the empty config.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(error) => return Err(Error::Io(error)),
        };
        serde_json::from_str(&raw).map_err(|error| {
            Error::Config(format!("failed to parse {}: {error}", path.display()))
        })
    }

    /// Apply values found in the environment on top of this file.
    pub fn with_env(self, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| normalize_text_option(env(name));
        Ok(Self {
            server_url: read(ENV_SERVER_URL).or(self.server_url),
            sync_interval_secs: parse_secs(read(ENV_SYNC_INTERVAL_SECS), ENV_SYNC_INTERVAL_SECS)?
                .or(self.sync_interval_secs),
            request_timeout_secs: parse_secs(
                read(ENV_REQUEST_TIMEOUT_SECS),
                ENV_REQUEST_TIMEOUT_SECS,
            )?
            .or(self.request_timeout_secs),
            data_dir: read(ENV_DATA_DIR).map(PathBuf::from).or(self.data_dir),
        })
    }
}

/// Explicit overrides, typically from command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub server_url: Option<String>,
    pub sync_interval_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotebookConfig {
    pub server_url: String,
    pub sync_interval: Duration,
    pub request_timeout: Option<Duration>,
    pub data_dir: PathBuf,
}

impl QuotebookConfig {
    /// Resolve configuration from the default config file, the process
    /// environment, and `overrides`.
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let file = ConfigFile::load_from_path(&default_config_path())?;
        let layered = file.with_env(|name| std::env::var(name).ok())?;
        Self::resolve(layered, overrides)
    }

    /// Merge `overrides` on top of `layered` and validate.
    pub fn resolve(layered: ConfigFile, overrides: ConfigOverrides) -> Result<Self> {
        let server_url = normalize_text_option(overrides.server_url)
            .or_else(|| normalize_text_option(layered.server_url))
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        if !is_http_url(&server_url) {
            return Err(Error::Config(format!(
                "server URL must include http:// or https://: {server_url}"
            )));
        }

        let interval_secs = overrides
            .sync_interval_secs
            .or(layered.sync_interval_secs)
            .unwrap_or(DEFAULT_SYNC_INTERVAL_SECS);
        if interval_secs == 0 {
            return Err(Error::Config(
                "sync interval must be at least one second".to_string(),
            ));
        }

        let request_timeout = match layered.request_timeout_secs {
            Some(0) => {
                return Err(Error::Config(
                    "request timeout must be at least one second".to_string(),
                ));
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        let data_dir = overrides
            .data_dir
            .or(layered.data_dir)
            .unwrap_or_else(default_data_dir);

        Ok(Self {
            server_url,
            sync_interval: Duration::from_secs(interval_secs),
            request_timeout,
            data_dir,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotebook")
        .join(CONFIG_FILE_NAME)
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotebook")
}

fn parse_secs(value: Option<String>, name: &str) -> Result<Option<u64>> {
    value
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|_| Error::Config(format!("{name} must be a whole number of seconds")))
        })
        .transpose()
}
