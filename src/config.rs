//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;

use crate::error::{CacheError, Result};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// TTL in seconds for writes that don't specify one
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Expiry sweep interval in seconds, 0 disables the sweep
    pub cleanup_interval: u64,
    /// Origins allowed to make cross-origin requests
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds, 0 = lazy expiry only (default: 0)
    /// - `CORS_ORIGINS` - Comma separated origins (default: http://localhost:3000)
    ///
    /// Unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            max_entries: parse_var(&lookup, "MAX_ENTRIES").unwrap_or(defaults.max_entries),
            default_ttl: parse_var(&lookup, "DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parse_var(&lookup, "SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var(&lookup, "CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
        }
    }

    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::Config(
                "MAX_ENTRIES must be at least 1".to_string(),
            ));
        }
        self.cors_header_values()?;
        Ok(())
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Returns the sweep interval, or None when only lazy expiry is wanted.
    pub fn cleanup_interval(&self) -> Option<Duration> {
        (self.cleanup_interval > 0).then(|| Duration::from_secs(self.cleanup_interval))
    }

    /// Parses the allowed origins into header values for the CORS layer.
    pub fn cors_header_values(&self) -> Result<Vec<HeaderValue>> {
        self.cors_origins
            .iter()
            .map(|origin| {
                if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                    return Err(CacheError::Config(format!(
                        "CORS origin must start with http:// or https://: {}",
                        origin
                    )));
                }
                HeaderValue::from_str(origin).map_err(|_| {
                    CacheError::Config(format!(
                        "CORS origin is not a valid header value: {}",
                        origin
                    ))
                })
            })
            .collect()
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: 10,
            server_port: 8080,
            cleanup_interval: 0,
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl, 10);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.cleanup_interval, 0);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_empty_source_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl(), Duration::from_secs(10));
        assert!(config.cleanup_interval().is_none());
    }

    #[test]
    fn test_config_overrides() {
        let config = config_from(&[
            ("MAX_ENTRIES", "5"),
            ("DEFAULT_TTL", "60"),
            ("SERVER_PORT", "9000"),
            ("CLEANUP_INTERVAL", "2"),
            ("CORS_ORIGINS", "http://a.test, https://b.test,"),
        ]);
        assert_eq!(config.max_entries, 5);
        assert_eq!(config.default_ttl, 60);
        assert_eq!(config.server_port, 9000);
        assert_eq!(config.cleanup_interval(), Some(Duration::from_secs(2)));
        assert_eq!(config.cors_origins, vec!["http://a.test", "https://b.test"]);
        assert_eq!(config.cors_header_values().unwrap().len(), 2);
    }

    #[test]
    fn test_config_unparsable_falls_back() {
        let config = config_from(&[("MAX_ENTRIES", "lots"), ("SERVER_PORT", "-1")]);
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn test_config_rejects_zero_capacity() {
        let config = config_from(&[("MAX_ENTRIES", "0")]);
        assert!(matches!(config.validate(), Err(CacheError::Config(_))));
    }

    #[test]
    fn test_config_rejects_bad_origin() {
        let config = config_from(&[("CORS_ORIGINS", "localhost:3000")]);
        assert!(matches!(config.validate(), Err(CacheError::Config(_))));
    }
}
