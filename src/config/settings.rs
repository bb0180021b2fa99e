//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::client::{BreweryClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, MAX_PER_PAGE, StateQuery};
use crate::fanout::DEFAULT_STATES;
use crate::report::DEFAULT_REPORT_PATH;

/// Errors that can occur during configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create client: {0}")]
    Client(#[from] crate::client::BreweryError),
}

/// Upstream API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Listing endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Records requested per page (1..=200)
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Timeout for a single page request
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_per_page() -> u32 {
    MAX_PER_PAGE
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            per_page: default_per_page(),
            timeout: default_timeout(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    /// States to count, in output order
    #[serde(default = "default_states")]
    pub states: Vec<StateQuery>,

    /// Where the run report is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_states() -> Vec<StateQuery> {
    DEFAULT_STATES.iter().map(|s| StateQuery::from(*s)).collect()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            states: default_states(),
            output: default_output(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.per_page == 0 || self.api.per_page > MAX_PER_PAGE {
            return Err(ConfigError::Invalid(format!(
                "api.per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.api.per_page
            )));
        }

        url::Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::Invalid(format!("api.base_url '{}': {e}", self.api.base_url))
        })?;

        if self.api.timeout.is_zero() {
            return Err(ConfigError::Invalid("api.timeout must be non-zero".to_string()));
        }

        Ok(())
    }

    /// Build the HTTP client described by the `api` section
    pub fn to_client(&self) -> Result<BreweryClient, ConfigError> {
        Ok(BreweryClient::with_timeout(&self.api.base_url, self.api.timeout)?)
    }
}
