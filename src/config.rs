//! Tool configuration loading and validation.
//!
//! Provides the main [`Config`] struct aggregating cluster connection,
//! provisioning, and logging settings. Configuration is loaded from a TOML
//! file; the cluster endpoint may also be overridden with the
//! `SFDEPLOY_ENDPOINT` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use sfdeploy::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("sfdeploy.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use crate::error::{ConfigError, Result};

/// Environment variable overriding the cluster management endpoint.
pub const ENDPOINT_ENV: &str = "SFDEPLOY_ENDPOINT";

const DEFAULT_ENDPOINT: &str = "http://localhost:19080";

/// Main tool configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section has defaults, so an empty file and
/// a missing file both yield a working local-cluster configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Cluster management endpoint settings.
    #[serde(default)]
    pub cluster: ClusterConfig,

    /// Application type provisioning settings.
    #[serde(default)]
    pub provision: ProvisionConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Cluster connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// HTTP management endpoint of the cluster gateway.
    pub endpoint: String,
    /// Per-request timeout for management calls.
    pub request_timeout_ms: u64,
    pub connect_timeout_ms: u64,
    /// Delay between provisioning status polls.
    pub poll_interval_ms: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            request_timeout_ms: 60_000,
            connect_timeout_ms: 10_000,
            poll_interval_ms: 2_000,
        }
    }
}

/// Application type provisioning configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    /// Upper bound on the provisioning wait, in seconds.
    pub timeout_secs: u64,
}

impl ProvisionConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self { timeout_secs: 300 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies the `SFDEPLOY_ENDPOINT` environment override before
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation
    /// fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_endpoint_override(std::env::var(ENDPOINT_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the given file, or fall back to defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Config::load`] when a path is given, or a
    /// validation error when the environment override is malformed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let mut config = Self::default();
                config.apply_endpoint_override(std::env::var(ENDPOINT_ENV).ok());
                config.validate()?;
                Ok(config)
            }
        }
    }

    fn apply_endpoint_override(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint {
            if !endpoint.is_empty() {
                self.cluster.endpoint = endpoint;
            }
        }
    }

    /// Validate configuration values.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.cluster.endpoint.is_empty() {
            return Err(ConfigError::MissingField { field: "endpoint" }.into());
        }
        if let Err(err) = Url::parse(&self.cluster.endpoint) {
            return Err(ConfigError::InvalidValue {
                field: "endpoint",
                reason: err.to_string(),
            }
            .into());
        }
        if self.provision.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.cluster.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging based on the configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
