//! Configuration for FinMind lookups

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Environment variable holding the FinMind API token
pub const TOKEN_ENV_VAR: &str = "FINMIND_API_TOKEN";

/// FinMind v4 data endpoint
pub const DEFAULT_API_BASE: &str = "https://api.finmindtrade.com/api/v4/data";

/// Configuration for the FinMind client
///
/// Built once at startup and shared by reference; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinMindConfig {
    /// Data endpoint URL
    pub api_base: String,

    /// Bearer token
    pub api_token: Option<String>,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Maximum requests per minute
    pub rate_limit_per_minute: u32,

    /// Length of the default revenue range, in years ending today
    pub history_years: u32,

    /// Result-count cap applied to directory lookups without an explicit limit
    pub directory_limit: usize,
}

impl Default for FinMindConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(30),
            rate_limit_per_minute: 60,
            history_years: 6,
            directory_limit: 20,
        }
    }
}

impl FinMindConfig {
    /// Create a new configuration builder
    pub fn builder() -> FinMindConfigBuilder {
        FinMindConfigBuilder::default()
    }

    /// Load the API token from `FINMIND_API_TOKEN`
    pub fn with_env_token(mut self) -> Self {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            self.api_token = Some(token);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_token.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(ClientError::ConfigError(format!(
                "{TOKEN_ENV_VAR} environment variable is not set"
            )));
        }

        Url::parse(&self.api_base).map_err(|e| {
            ClientError::ConfigError(format!("invalid api_base {:?}: {e}", self.api_base))
        })?;

        if self.rate_limit_per_minute == 0 {
            return Err(ClientError::ConfigError(
                "rate_limit_per_minute must be greater than 0".to_string(),
            ));
        }

        if self.history_years == 0 {
            return Err(ClientError::ConfigError(
                "history_years must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for FinMindConfig
#[derive(Debug, Default)]
pub struct FinMindConfigBuilder {
    api_base: Option<String>,
    api_token: Option<String>,
    request_timeout: Option<Duration>,
    rate_limit_per_minute: Option<u32>,
    history_years: Option<u32>,
    directory_limit: Option<usize>,
}

impl FinMindConfigBuilder {
    /// Set the data endpoint URL
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    /// Set the API token
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Load the API token from `FINMIND_API_TOKEN` unless one was already set
    pub fn with_env_token(mut self) -> Self {
        if self.api_token.is_none() {
            if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
                self.api_token = Some(token);
            }
        }
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the per-minute request quota
    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = Some(limit);
        self
    }

    /// Set the default revenue history length
    pub fn history_years(mut self, years: u32) -> Self {
        self.history_years = Some(years);
        self
    }

    /// Set the default directory result cap
    pub fn directory_limit(mut self, limit: usize) -> Self {
        self.directory_limit = Some(limit);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<FinMindConfig> {
        let defaults = FinMindConfig::default();

        let config = FinMindConfig {
            api_base: self.api_base.unwrap_or(defaults.api_base),
            api_token: self.api_token,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            rate_limit_per_minute: self
                .rate_limit_per_minute
                .unwrap_or(defaults.rate_limit_per_minute),
            history_years: self.history_years.unwrap_or(defaults.history_years),
            directory_limit: self.directory_limit.unwrap_or(defaults.directory_limit),
        };

        config.validate()?;
        Ok(config)
    }
}
