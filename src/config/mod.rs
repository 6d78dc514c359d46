use crate::reconciliation::MalformedPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs;

/// Flickr REST endpoint
pub const DEFAULT_ENDPOINT: &str = "https://www.flickr.com/services/rest";

/// Request timeout for listing calls, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid setting {name}: {reason}")]
    Invalid {
        name: &'static str,
        reason: &'static str,
    },
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Settings read from an optional JSON config file.
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub originals_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub skip_malformed: bool,
}

/// Connection settings for the Flickr listing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlickrConfig {
    pub api_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page size requested from the service. `None` keeps the service default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl FlickrConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            per_page: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Everything one run needs, built once and passed down by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct RenamerConfig {
    pub flickr: FlickrConfig,
    /// Flickr username owning the album
    pub username: String,
    /// Photoset (album) id
    pub set_id: String,
    pub originals_dir: PathBuf,
    pub dry_run: bool,
    pub malformed_policy: MalformedPolicy,
}

/// Values supplied on the command line, before merging with a config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub set_id: Option<String>,
    pub originals_dir: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub per_page: Option<u32>,
    pub dry_run: bool,
    pub skip_malformed: bool,
}

impl RenamerConfig {
    /// Merge command-line values over file values, failing on anything
    /// still missing.
    pub fn resolve(overrides: ConfigOverrides, file: FileConfig) -> Result<Self, ConfigError> {
        let api_key = overrides
            .api_key
            .or(file.api_key)
            .ok_or(ConfigError::Missing("api key"))?;
        let username = overrides
            .username
            .or(file.username)
            .ok_or(ConfigError::Missing("username"))?;
        let set_id = overrides
            .set_id
            .or(file.set_id)
            .ok_or(ConfigError::Missing("set id"))?;
        let originals_dir = overrides
            .originals_dir
            .or(file.originals_dir)
            .ok_or(ConfigError::Missing("originals directory"))?;

        let flickr = FlickrConfig {
            api_key,
            endpoint: overrides
                .endpoint
                .or(file.endpoint)
                .unwrap_or_else(default_endpoint),
            timeout_secs: overrides
                .timeout_secs
                .or(file.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            per_page: overrides.per_page.or(file.per_page),
        };

        if flickr.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "timeout",
                reason: "must be at least one second",
            });
        }
        if flickr.per_page == Some(0) {
            return Err(ConfigError::Invalid {
                name: "per page",
                reason: "must be at least one",
            });
        }

        let malformed_policy = if overrides.skip_malformed || file.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Abort
        };

        Ok(Self {
            flickr,
            username,
            set_id,
            originals_dir,
            dry_run: overrides.dry_run,
            malformed_policy,
        })
    }
}

/// Read a JSON config file
pub async fn read_config(config_path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(config_path).await?;
    let config: FileConfig = serde_json::from_str(&content)?;
    Ok(config)
}
