//! # Client configuration: `grow-guides.toml`
//!
//! The web binary embeds a TOML file that tells the client where the backend
//! lives, how long cached data stays fresh and how often failed calls are
//! retried.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000"
//! timeout_secs = 30
//!
//! [cache]
//! stale_time_secs = 300            # user data
//! reference_stale_time_secs = 3600 # option lists
//!
//! [retry]
//! query_attempts = 2      # extra attempts for reads
//! mutation_attempts = 0   # extra attempts for writes
//! delay_ms = 500
//! ```
//!
//! Every section and field has a default, so a missing or empty file is
//! equivalent to [`ClientConfig::default`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid client config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize client config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("api.base_url must start with http:// or https://, got {0:?}")]
    BaseUrl(String),
}

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Freshness window for user-owned data.
    #[serde(default = "default_stale_time")]
    pub stale_time_secs: u64,
    /// Freshness window for read-only option lists.
    #[serde(default = "default_reference_stale_time")]
    pub reference_stale_time_secs: u64,
}

fn default_stale_time() -> u64 {
    300
}

fn default_reference_stale_time() -> u64 {
    3600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_time_secs: default_stale_time(),
            reference_stale_time_secs: default_reference_stale_time(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_query_attempts")]
    pub query_attempts: usize,
    #[serde(default)]
    pub mutation_attempts: usize,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_query_attempts() -> usize {
    2
}

fn default_delay_ms() -> u64 {
    500
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            query_attempts: default_query_attempts(),
            mutation_attempts: 0,
            delay_ms: default_delay_ms(),
        }
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "grow-guides.toml"
    }

    /// Parse and check a TOML document.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builder method to point at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::BaseUrl(url.clone()));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.cache.stale_time_secs, 300);
        assert_eq!(config.retry.query_attempts, 2);
        assert_eq!(config.retry.mutation_attempts, 0);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "https://api.example.org/"

            [retry]
            query_attempts = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url(), "https://api.example.org");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.retry.query_attempts, 1);
        assert_eq!(config.retry.delay_ms, 500);
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let err = ClientConfig::from_toml("[api]\nbase_url = \"localhost:5000\"").unwrap_err();
        assert!(matches!(err, ConfigError::BaseUrl(_)));
    }

    #[test]
    fn toml_roundtrip_preserves_overrides() {
        let config = ClientConfig::default().with_base_url("https://garden.test");
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }
}
