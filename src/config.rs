//! Client and resolver configuration
//!
//! `ClientConfig` can be read from `OSS_*` environment variables or a YAML
//! document. Nothing here opens connections.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const ENV_ENDPOINT: &str = "OSS_ENDPOINT";
pub const ENV_REGION: &str = "OSS_REGION";
pub const ENV_TIMEOUT_SECS: &str = "OSS_TIMEOUT_SECS";
pub const ENV_BEARER_TOKEN: &str = "OSS_BEARER_TOKEN";

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Connection settings for [`crate::lifecycle_policy::HttpLifecyclePolicyClient`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Explicit endpoint; derived from `region` when absent
    #[serde(default)]
    pub endpoint: Option<Url>,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub bearer_token: Option<String>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: default_region(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            bearer_token: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(ENV_ENDPOINT) {
            config.endpoint = Some(parse_endpoint(ENV_ENDPOINT, &raw)?);
        }
        if let Some(region) = get(ENV_REGION) {
            config.region = region;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            config.timeout_secs =
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidValue {
                        var: ENV_TIMEOUT_SECS,
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?;
        }
        config.bearer_token = get(ENV_BEARER_TOKEN);

        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// The configured endpoint, or the regional service endpoint
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        match &self.endpoint {
            Some(url) => Ok(url.clone()),
            None => {
                let raw = format!("https://aoss.{}.amazonaws.com/", self.region);
                parse_endpoint(ENV_REGION, &raw)
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_endpoint(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Per-call settings for [`crate::lifecycle_policy::PolicyResolver`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Deadline for the remote call. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
}

impl ResolverConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
