//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::ExpiryPolicy;
use crate::notify::{DEFAULT_HUB_CAPACITY, DEFAULT_NOTIFY_BUFFER};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Product list lifetime from population, in seconds
    pub cache_absolute_ttl: u64,
    /// Product list idle lifetime since last read, in seconds
    pub cache_sliding_ttl: u64,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Capacity of the publish queue feeding the dispatcher
    pub notify_buffer: usize,
    /// Per-subscriber broadcast buffer
    pub hub_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_ABSOLUTE_TTL` - Absolute expiry in seconds (default: 300)
    /// - `CACHE_SLIDING_TTL` - Sliding expiry in seconds (default: 120)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 30)
    /// - `NOTIFY_BUFFER` - Publish queue size (default: 256)
    /// - `HUB_CAPACITY` - Per-subscriber buffer (default: 1024)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_absolute_ttl: env_or("CACHE_ABSOLUTE_TTL", defaults.cache_absolute_ttl),
            cache_sliding_ttl: env_or("CACHE_SLIDING_TTL", defaults.cache_sliding_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            notify_buffer: env_or("NOTIFY_BUFFER", defaults.notify_buffer),
            hub_capacity: env_or("HUB_CAPACITY", defaults.hub_capacity),
        }
    }

    pub fn expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy::new(
            Duration::from_secs(self.cache_absolute_ttl),
            Duration::from_secs(self.cache_sliding_ttl),
        )
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_absolute_ttl: 300,
            cache_sliding_ttl: 120,
            cleanup_interval: 30,
            notify_buffer: DEFAULT_NOTIFY_BUFFER,
            hub_capacity: DEFAULT_HUB_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_absolute_ttl, 300);
        assert_eq!(config.cache_sliding_ttl, 120);
        assert_eq!(config.cleanup_interval, 30);
        assert_eq!(config.notify_buffer, 256);
        assert_eq!(config.hub_capacity, 1024);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_ABSOLUTE_TTL");
        env::remove_var("CACHE_SLIDING_TTL");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("NOTIFY_BUFFER");
        env::remove_var("HUB_CAPACITY");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_absolute_ttl, 300);
        assert_eq!(config.cleanup_interval, 30);
    }

    #[test]
    fn test_expiry_policy() {
        let policy = Config::default().expiry_policy();
        assert_eq!(policy, ExpiryPolicy::default());
    }
}
