//! Request DTOs for the cache server API
//!
//! Defines the query parameters and path validation for incoming requests.
//! The PUT body is the cached value itself, so it has no DTO.

use std::time::Duration;

use serde::Deserialize;

use crate::cache::MAX_KEY_LENGTH;

/// Query parameters for the SET operation (PUT /cache/:key)
///
/// # Fields
/// - `ttl`: TTL in seconds
/// - `ttl_ms`: TTL in milliseconds
///
/// At most one may be given; with neither, the server default applies.
/// Zero or negative values store an entry that is already expired.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetParams {
    #[serde(default)]
    pub ttl: Option<i64>,
    #[serde(default)]
    pub ttl_ms: Option<i64>,
}

impl SetParams {
    /// Resolves the TTL to apply, falling back to `default`.
    ///
    /// Returns an error message if both units are given.
    pub fn resolve_ttl(&self, default: Duration) -> Result<Duration, String> {
        match (self.ttl, self.ttl_ms) {
            (Some(_), Some(_)) => Err("Specify either ttl or ttl_ms, not both".to_string()),
            (Some(secs), None) => Ok(non_negative(secs, Duration::from_secs)),
            (None, Some(ms)) => Ok(non_negative(ms, Duration::from_millis)),
            (None, None) => Ok(default),
        }
    }
}

fn non_negative(amount: i64, unit: fn(u64) -> Duration) -> Duration {
    u64::try_from(amount).map(unit).unwrap_or(Duration::ZERO)
}

/// Validates a key taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: Duration = Duration::from_secs(10);

    #[test]
    fn test_set_params_deserialize_empty() {
        let params: SetParams = serde_json::from_str("{}").unwrap();
        assert!(params.ttl.is_none());
        assert!(params.ttl_ms.is_none());
        assert_eq!(params.resolve_ttl(DEFAULT), Ok(DEFAULT));
    }

    #[test]
    fn test_resolve_ttl_units() {
        let secs = SetParams {
            ttl: Some(60),
            ttl_ms: None,
        };
        let millis = SetParams {
            ttl: None,
            ttl_ms: Some(250),
        };
        assert_eq!(secs.resolve_ttl(DEFAULT), Ok(Duration::from_secs(60)));
        assert_eq!(millis.resolve_ttl(DEFAULT), Ok(Duration::from_millis(250)));
    }

    #[test]
    fn test_resolve_ttl_negative_is_zero() {
        let params = SetParams {
            ttl: Some(-5),
            ttl_ms: None,
        };
        assert_eq!(params.resolve_ttl(DEFAULT), Ok(Duration::ZERO));
    }

    #[test]
    fn test_resolve_ttl_rejects_both() {
        let params = SetParams {
            ttl: Some(1),
            ttl_ms: Some(1),
        };
        assert!(params.resolve_ttl(DEFAULT).is_err());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("").is_some());
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH + 1)).is_some());
        assert!(validate_key("valid_key").is_none());
    }
}
