//! # Movies Core Configuration System
//!
//! YAML-based configuration with environment-specific overrides. A single
//! `movies-config.yaml` carries the base values plus optional `development`, `test`
//! and `production` sections that are deep-merged over the base for the detected
//! environment.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use movies_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration (environment auto-detected)
//! let manager = ConfigManager::load()?;
//!
//! let retries = manager.config().resilience.retries;
//! let films_index = &manager.config().entities.films.index;
//! # let _ = (retries, films_index);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::{cache, indexes};
use crate::resilience::{CircuitBreakerConfig, RetryConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MoviesConfig {
    pub app: AppConfig,

    /// Document-search backend connection
    pub search: SearchConfig,

    /// Key-value cache connection and namespacing
    pub cache: CacheConfig,

    /// Circuit breaker and retry tuning for the search client
    pub resilience: ResilienceConfig,

    /// Index and cache lifetime per entity
    pub entities: EntitiesConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "movies".to_string(),
            debug: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    pub dsn: String,
    pub timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            dsn: "http://127.0.0.1:9200".to_string(),
            timeout_seconds: 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub dsn: String,
    /// Namespace prepended to every key as `{prefix}:`
    pub prefix: String,
    pub response_ttl_seconds: u64,
    pub response_namespace: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dsn: "redis://localhost:6379".to_string(),
            prefix: cache::DEFAULT_PREFIX.to_string(),
            response_ttl_seconds: cache::DEFAULT_TTL_SECONDS,
            response_namespace: cache::RESPONSE_NAMESPACE.to_string(),
        }
    }
}

impl CacheConfig {
    pub fn response_ttl(&self) -> Duration {
        Duration::from_secs(self.response_ttl_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResilienceConfig {
    pub max_failures: u32,
    pub reset_timeout_seconds: u64,
    pub retries: u32,
    pub backoff_factor: f64,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        let breaker = CircuitBreakerConfig::default();
        let retry = RetryConfig::default();
        Self {
            max_failures: breaker.max_failures,
            reset_timeout_seconds: breaker.reset_timeout.as_secs(),
            retries: retry.retries,
            backoff_factor: retry.backoff_factor,
        }
    }
}

impl ResilienceConfig {
    pub fn circuit_breaker(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            max_failures: self.max_failures,
            reset_timeout: Duration::from_secs(self.reset_timeout_seconds),
        }
    }

    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            retries: self.retries,
            backoff_factor: self.backoff_factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EntityConfig {
    pub index: String,
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
}

fn default_cache_ttl_seconds() -> u64 {
    cache::DEFAULT_TTL_SECONDS
}

impl EntityConfig {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            cache_ttl_seconds: default_cache_ttl_seconds(),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EntitiesConfig {
    pub films: EntityConfig,
    pub genres: EntityConfig,
    pub persons: EntityConfig,
}

impl Default for EntitiesConfig {
    fn default() -> Self {
        Self {
            films: EntityConfig::new(indexes::FILMS),
            genres: EntityConfig::new(indexes::GENRES),
            persons: EntityConfig::new(indexes::PERSONS),
        }
    }
}

impl MoviesConfig {
    /// Validate configuration for consistency and required fields
    pub fn validate(&self) -> ConfigResult<()> {
        if self.search.dsn.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "search.dsn",
                "search configuration",
            ));
        }

        if self.search.timeout_seconds == 0 {
            return Err(ConfigurationError::invalid_value(
                "search.timeout_seconds",
                "0",
                "timeout must be greater than 0",
            ));
        }

        if self.cache.dsn.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "cache.dsn",
                "cache configuration",
            ));
        }

        if self.cache.prefix.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "cache.prefix",
                "cache configuration",
            ));
        }

        if self.cache.response_ttl_seconds == 0 {
            return Err(ConfigurationError::invalid_value(
                "cache.response_ttl_seconds",
                "0",
                "cache lifetime must be greater than 0",
            ));
        }

        if self.resilience.max_failures == 0 {
            return Err(ConfigurationError::invalid_value(
                "resilience.max_failures",
                "0",
                "failure threshold must be greater than 0",
            ));
        }

        if self.resilience.reset_timeout_seconds == 0 {
            return Err(ConfigurationError::invalid_value(
                "resilience.reset_timeout_seconds",
                "0",
                "reset timeout must be greater than 0",
            ));
        }

        let backoff = self.resilience.backoff_factor;
        if !backoff.is_finite() || backoff < 0.0 {
            return Err(ConfigurationError::invalid_value(
                "resilience.backoff_factor",
                backoff.to_string(),
                "backoff factor must be a finite, non-negative number of seconds",
            ));
        }

        for (name, entity) in [
            ("films", &self.entities.films),
            ("genres", &self.entities.genres),
            ("persons", &self.entities.persons),
        ] {
            if entity.index.trim().is_empty() {
                return Err(ConfigurationError::missing_required_field(
                    format!("entities.{name}.index"),
                    "entity configuration",
                ));
            }
            if entity.cache_ttl_seconds == 0 {
                return Err(ConfigurationError::invalid_value(
                    format!("entities.{name}.cache_ttl_seconds"),
                    "0",
                    "cache lifetime must be greater than 0",
                ));
            }
        }

        Ok(())
    }
}
