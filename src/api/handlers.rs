//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Handlers only
//! translate between HTTP and the three cache operations.

use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderValue, StatusCode},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheStore, Lookup, SharedCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, DeleteResponse, GetResponse, HealthResponse, SetParams, SetResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache handle
    pub cache: SharedCache,
    /// TTL for writes that don't carry one
    pub default_ttl: Duration,
    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<HeaderValue>,
}

impl AppState {
    /// Creates a new AppState around the given cache store, with the default
    /// write TTL and CORS origins.
    pub fn new(cache: CacheStore) -> Self {
        let defaults = Config::default();
        Self {
            cache: SharedCache::new(cache),
            default_ttl: defaults.default_ttl(),
            cors_origins: vec![HeaderValue::from_static("http://localhost:3000")],
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the configuration does not validate.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cache: SharedCache::with_capacity(config.max_entries),
            default_ttl: config.default_ttl(),
            cors_origins: config.cors_header_values()?,
        })
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}

fn check_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

/// Handler for GET /cache/:key
///
/// Returns the value if the key is live; 404 when absent or expired.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    check_key(&key)?;
    debug!("GET request received for key: {}", key);

    match state.cache.lookup(&key).await {
        Lookup::Hit {
            value,
            ttl_remaining,
        } => Ok(Json(GetResponse::new(key, value, ttl_remaining))),
        Lookup::Miss | Lookup::Expired => Err(CacheError::NotFound(key)),
    }
}

/// Decodes a request body as JSON whatever its declared content type.
fn decode_value(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(|err| {
        CacheError::InvalidRequest(format!("Failed to parse the request body as JSON: {}", err))
    })
}

/// Handler for PUT /cache/:key
///
/// Stores the JSON request body under `key` with the requested or default TTL.
/// Query and body rejections are reported through [`CacheError`] so every
/// failure carries a JSON error body.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    params: std::result::Result<Query<SetParams>, QueryRejection>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<SetResponse>)> {
    check_key(&key)?;
    let Query(params) = params?;
    let value = decode_value(&body?)?;
    let ttl = params
        .resolve_ttl(state.default_ttl)
        .map_err(CacheError::InvalidRequest)?;
    debug!("SET request received for key: {}", key);

    state.cache.set(key.clone(), value, ttl).await;

    Ok((StatusCode::CREATED, Json(SetResponse::new(key, ttl))))
}

/// Handler for DELETE /cache/:key
///
/// Reports whether an entry was removed; removing an absent key is not an error.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    check_key(&key)?;
    debug!("DELETE request received for key: {}", key);

    let removed = state.cache.delete(&key).await;

    Ok(Json(DeleteResponse::new(key, removed)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
