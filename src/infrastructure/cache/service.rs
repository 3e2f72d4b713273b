//! Cache service trait and error types.

use crate::domain::entities::SiteRecord;
use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching the site served for a canonical domain.
///
/// Keys are site domains, holding the record
/// [`crate::domain::repositories::SiteRepository::find_site_by_domain`]
/// returns. Alias resolution never reads this cache.
///
/// Implementations must be thread-safe. A cache failure must never fail a
/// request: callers treat errors as misses and fall back to the registry.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the cached site for a domain.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(site))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get_site(&self, domain: &str) -> CacheResult<Option<SiteRecord>>;

    /// Stores a site under its domain with optional TTL.
    ///
    /// `ttl_seconds` of `None` uses the implementation's default.
    async fn set_site(&self, site: &SiteRecord, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Removes the cached site for a domain.
    ///
    /// Used when a site is registered on the domain, which may change the
    /// record served for it.
    async fn invalidate_site(&self, domain: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
