//! Configuration Module
//!
//! Handles loading server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default Thrones API location
pub const DEFAULT_THRONES_API_BASE: &str = "https://thronesapi.com";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Upstream base URL, without trailing slash
    pub thrones_api_base: String,
    /// Timeout for each upstream request in milliseconds
    pub upstream_timeout_ms: u64,
    /// Lifetime of cached upstream data in milliseconds
    pub cache_ttl_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 4000)
    /// - `THRONES_API_BASE` - Upstream base URL (default: https://thronesapi.com)
    /// - `UPSTREAM_TIMEOUT_MS` - Upstream request timeout (default: 10000)
    /// - `CACHE_TTL_MS` - Cache entry lifetime (default: 60000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            thrones_api_base: env::var("THRONES_API_BASE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| trim_trailing_slash(&v))
                .unwrap_or(defaults.thrones_api_base),
            upstream_timeout_ms: env::var("UPSTREAM_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.upstream_timeout_ms),
            cache_ttl_ms: env::var("CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_ms),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 4000,
            thrones_api_base: DEFAULT_THRONES_API_BASE.to_string(),
            upstream_timeout_ms: 10_000,
            cache_ttl_ms: 60_000,
        }
    }
}

fn trim_trailing_slash(value: &str) -> String {
    value.trim().strip_suffix('/').unwrap_or(value.trim()).to_string()
}
