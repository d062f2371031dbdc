//! Configuration Module
//!
//! Handles loading cache adapter configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::ttl::ExpirationTtl;

/// Cache adapter configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backing representation name, `string` or `bytes`
    pub representation: String,
    /// Default TTL in seconds for cached results
    pub default_ttl: u64,
    /// Whether reads extend the lifetime of cached results
    pub sliding_expiration: bool,
    /// In-memory store sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_REPRESENTATION` - Backing representation (default: string)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `CACHE_SLIDING_EXPIRATION` - Sliding instead of relative TTL (default: false)
    /// - `CACHE_CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    ///
    /// The representation is not validated here; the provider factory rejects
    /// unsupported names.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            representation: env::var("CACHE_REPRESENTATION")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.representation),
            default_ttl: env::var("CACHE_DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_ttl),
            sliding_expiration: env::var("CACHE_SLIDING_EXPIRATION")
                .ok()
                .and_then(|v| v.trim().to_ascii_lowercase().parse().ok())
                .unwrap_or(defaults.sliding_expiration),
            cleanup_interval: env::var("CACHE_CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
        }
    }

    /// TTL strategy described by `default_ttl` and `sliding_expiration`.
    pub fn ttl_strategy(&self) -> ExpirationTtl {
        let duration = Duration::from_secs(self.default_ttl);
        if self.sliding_expiration {
            ExpirationTtl::Sliding(duration)
        } else {
            ExpirationTtl::Relative(duration)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            representation: "string".to_string(),
            default_ttl: 300,
            sliding_expiration: false,
            cleanup_interval: 1,
        }
    }
}
