//! API Handlers
//!
//! HTTP request handlers for each BFF endpoint, plus the shared state that
//! owns the cache and the upstream source.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{character_key, CacheStore, ALL_CHARACTERS_KEY};
use crate::config::Config;
use crate::error::{EndpointError, Result};
use crate::models::{ApiResponse, Character, ErrorBody, HealthStatus};
use crate::query::{run_query, CharacterQuery};
use crate::upstream::{CharacterSource, ThronesClient, UpstreamError};

/// Values kept in the shared cache.
#[derive(Debug, Clone)]
pub enum CachedValue {
    /// Full normalized list, under [`ALL_CHARACTERS_KEY`]
    List(Arc<Vec<Character>>),
    /// One normalized character, under [`character_key`]
    One(Character),
}

/// Application state shared across all handlers.
///
/// Cloning is cheap: the cache and upstream are behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<RwLock<CacheStore<CachedValue>>>,
    /// Character provider
    pub upstream: Arc<dyn CharacterSource>,
    /// Lifetime of cached upstream data
    pub cache_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState with an empty cache.
    pub fn new(upstream: Arc<dyn CharacterSource>, cache_ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(CacheStore::new())),
            upstream,
            cache_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails only when the upstream base URL is unusable.
    pub fn from_config(config: &Config) -> std::result::Result<Self, UpstreamError> {
        let client = ThronesClient::new(&config.thrones_api_base, config.upstream_timeout())?;
        Ok(Self::new(Arc::new(client), config.cache_ttl()))
    }

    /// Returns the normalized character list, fetching it on a cache miss.
    ///
    /// The cache lock is released while the upstream request is in flight.
    pub async fn all_characters(&self) -> Result<Arc<Vec<Character>>> {
        // `get` may evict, so it needs the write lock
        let cached = self.cache.write().await.get(ALL_CHARACTERS_KEY);
        if let Some(CachedValue::List(all)) = cached {
            return Ok(all);
        }

        let upstream = self.upstream.fetch_characters().await?;
        let all: Arc<Vec<Character>> =
            Arc::new(upstream.into_iter().map(Character::normalized).collect());
        info!(count = all.len(), "fetched character list from upstream");

        self.cache
            .write()
            .await
            .set(ALL_CHARACTERS_KEY, CachedValue::List(all.clone()), self.cache_ttl);
        Ok(all)
    }

    /// Returns one normalized character, fetching it on a cache miss.
    pub async fn character(&self, id: &str) -> Result<Character> {
        let key = character_key(id);
        let cached = self.cache.write().await.get(&key);
        if let Some(CachedValue::One(character)) = cached {
            return Ok(character);
        }

        let character = self.upstream.fetch_character(id).await?.normalized();
        debug!(id, "fetched character from upstream");

        self.cache
            .write()
            .await
            .set(key, CachedValue::One(character.clone()), self.cache_ttl);
        Ok(character)
    }

    /// Drops one cache entry, or all of them when `key` is `None`.
    pub async fn clear_cache(&self, key: Option<&str>) {
        self.cache.write().await.clear(key);
    }
}

/// Handler for GET /api/v1/characters
///
/// Filters, sorts and optionally paginates the cached character list.
/// Query parameters never cause a rejection; bad values fall back to defaults.
pub async fn list_characters_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> std::result::Result<Json<ApiResponse<Vec<Character>>>, EndpointError> {
    let query = CharacterQuery::from_pairs(pairs);
    let all = state.all_characters().await.map_err(EndpointError::list)?;

    let result = run_query(&all, &query);
    debug!(
        matched = result.items.len(),
        paginated = result.pagination.is_some(),
        "character query served"
    );

    Ok(Json(ApiResponse::paginated(result.items, result.pagination)))
}

/// Handler for GET /api/v1/characters/:id
///
/// The id is forwarded to the upstream as given. An id that cannot be
/// decoded is answered with the error envelope like any other failure.
pub async fn get_character_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> std::result::Result<Json<ApiResponse<Character>>, EndpointError> {
    let Path(id) = id.map_err(EndpointError::single)?;
    let character = state.character(&id).await.map_err(EndpointError::single)?;
    Ok(Json(ApiResponse::success(character)))
}

/// Handler for GET /api/v1/health
pub async fn health_handler() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus::healthy()))
}

/// Fallback for unknown routes, so even misses get the JSON envelope.
pub async fn not_found_handler() -> (StatusCode, Json<ApiResponse<()>>) {
    let error = ErrorBody {
        message: "Not found".to_string(),
        code: None,
        status: Some(StatusCode::NOT_FOUND.as_u16()),
    };
    (StatusCode::NOT_FOUND, Json(ApiResponse::failure(error)))
}
