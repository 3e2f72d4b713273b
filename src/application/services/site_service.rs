//! Site registry access and alias context resolution.

use crate::domain::entities::{NetworkRecord, NewSite, SiteRecord};
use crate::domain::repositories::SiteRepository;
use crate::error::{AppError, ResolutionError};
use crate::infrastructure::cache::CacheService;
use crate::overlay::ResolvedContext;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Network every alias resolves against. Deployments running several
/// independent networks are not supported.
pub const PRIMARY_NETWORK_ID: i64 = 1;

/// Service over the multisite site registry.
///
/// Alias resolution always reads the registry, so a site deleted there stops
/// resolving immediately. Only the platform's canonical domain lookups go
/// through the cache.
pub struct SiteService {
    repository: Arc<dyn SiteRepository>,
    cache: Arc<dyn CacheService>,
}

impl SiteService {
    /// Creates a new site service.
    pub fn new(repository: Arc<dyn SiteRepository>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Builds the request context for an alias hostname mapped to `site_id`.
    ///
    /// The site is looked up first, then the primary network.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::SiteNotFound`] if the registry has no live site
    /// with this ID. Callers treat this as "alias matched but unavailable".
    /// Returns [`ResolutionError::NetworkNotFound`] if the primary network is missing.
    /// Returns [`ResolutionError::Registry`] on storage errors.
    pub async fn resolve(
        &self,
        alias_hostname: &str,
        site_id: i64,
    ) -> Result<ResolvedContext, ResolutionError> {
        let site = self
            .repository
            .find_site(site_id)
            .await?
            .ok_or(ResolutionError::SiteNotFound { site_id })?;

        let network = self
            .repository
            .find_network(PRIMARY_NETWORK_ID)
            .await?
            .ok_or(ResolutionError::NetworkNotFound {
                network_id: PRIMARY_NETWORK_ID,
            })?;

        Ok(ResolvedContext::new(alias_hostname, site, network))
    }

    /// Retrieves a network by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on registry errors.
    pub async fn get_network(&self, network_id: i64) -> Result<Option<NetworkRecord>, AppError> {
        self.repository.find_network(network_id).await
    }

    /// Finds the site the platform serves for a canonical domain, consulting
    /// the cache first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no live site uses this domain.
    /// Returns [`AppError::Internal`] on registry errors. Cache errors are
    /// logged and treated as misses.
    pub async fn get_site_by_domain(&self, domain: &str) -> Result<SiteRecord, AppError> {
        match self.cache.get_site(domain).await {
            Ok(Some(site)) => return Ok(site),
            Ok(None) => debug!("Domain {} not cached", domain),
            Err(e) => warn!("Cache error for domain {}: {}", domain, e),
        }

        let site = self
            .repository
            .find_site_by_domain(domain)
            .await?
            .ok_or_else(|| AppError::not_found("Site not found", json!({"domain": domain})))?;

        if let Err(e) = self.cache.set_site(&site, None).await {
            warn!("Failed to cache site for {}: {}", domain, e);
        }

        Ok(site)
    }

    /// Lists all live sites.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on registry errors.
    pub async fn list_sites(&self) -> Result<Vec<SiteRecord>, AppError> {
        self.repository.list_sites().await
    }

    /// Registers a site on the primary network.
    ///
    /// # Validation
    ///
    /// - Domain: 1-255 characters, at least one dot, alphanumeric/dots/hyphens
    /// - Path: must start with `/`; a trailing `/` is appended when missing
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if validation fails.
    /// Returns [`AppError::Conflict`] if the domain and path pair is taken.
    /// Returns [`AppError::Internal`] on registry errors.
    pub async fn create_site(&self, domain: String, path: String) -> Result<SiteRecord, AppError> {
        validate_domain_name(&domain)?;

        if !path.starts_with('/') {
            return Err(AppError::bad_request(
                "Invalid site path",
                json!({"hint": "Path must start with '/'"}),
            ));
        }
        let path = if path.ends_with('/') {
            path
        } else {
            format!("{}/", path)
        };

        let created = self
            .repository
            .create_site(NewSite {
                network_id: PRIMARY_NETWORK_ID,
                domain,
                path,
            })
            .await?;

        // A shorter path on the same domain takes over its canonical lookup.
        if let Err(e) = self.cache.invalidate_site(&created.domain).await {
            warn!("Failed to invalidate cached site for {}: {}", created.domain, e);
        }

        Ok(created)
    }

    /// Checks cache backend health.
    pub async fn cache_healthy(&self) -> bool {
        self.cache.health_check().await
    }
}

/// Validates domain name format.
fn validate_domain_name(domain: &str) -> Result<(), AppError> {
    if domain.is_empty() || domain.len() > 255 {
        return Err(AppError::bad_request(
            "Invalid domain name length",
            json!({"min": 1, "max": 255}),
        ));
    }

    if !domain.contains('.') {
        return Err(AppError::bad_request(
            "Invalid domain format",
            json!({"hint": "Domain must contain at least one dot"}),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(AppError::bad_request(
            "Invalid characters in domain name",
            json!({"allowed": "a-z, 0-9, dots, hyphens"}),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockSiteRepository;
    use crate::infrastructure::cache::{CacheError, MockCacheService, NullCache};

    fn test_site(id: i64) -> SiteRecord {
        SiteRecord::new(id, 1, "internal.example".to_string(), "/".to_string())
    }

    fn test_network() -> NetworkRecord {
        NetworkRecord::new(1, "internal.example".to_string())
    }

    fn service(repo: MockSiteRepository) -> SiteService {
        SiteService::new(Arc::new(repo), Arc::new(NullCache::new()))
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut mock_repo = MockSiteRepository::new();

        mock_repo
            .expect_find_site()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|id| Ok(Some(test_site(id))));
        mock_repo
            .expect_find_network()
            .withf(|id| *id == PRIMARY_NETWORK_ID)
            .times(1)
            .returning(|_| Ok(Some(test_network())));

        let context = service(mock_repo)
            .resolve("short.example", 7)
            .await
            .unwrap();

        assert_eq!(context.alias_hostname(), "short.example");
        assert_eq!(context.site().id, 7);
        assert_eq!(context.network().id, 1);
    }

    #[tokio::test]
    async fn test_resolve_site_not_found() {
        let mut mock_repo = MockSiteRepository::new();

        mock_repo
            .expect_find_site()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_find_network().times(0);

        let result = service(mock_repo).resolve("short.example", 7).await;

        assert!(matches!(
            result,
            Err(ResolutionError::SiteNotFound { site_id: 7 })
        ));
    }

    #[tokio::test]
    async fn test_resolve_network_not_found() {
        let mut mock_repo = MockSiteRepository::new();

        mock_repo
            .expect_find_site()
            .times(1)
            .returning(|id| Ok(Some(test_site(id))));
        mock_repo
            .expect_find_network()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo).resolve("short.example", 7).await;

        assert!(matches!(
            result,
            Err(ResolutionError::NetworkNotFound { network_id: 1 })
        ));
    }

    #[tokio::test]
    async fn test_resolve_registry_error() {
        let mut mock_repo = MockSiteRepository::new();

        mock_repo
            .expect_find_site()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(mock_repo).resolve("short.example", 7).await;

        assert!(matches!(result, Err(ResolutionError::Registry(_))));
    }

    #[tokio::test]
    async fn test_resolve_reads_registry_not_cache() {
        let mut mock_repo = MockSiteRepository::new();
        mock_repo
            .expect_find_site()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_find_network().times(0);

        // The cache still holds the site; it must not be consulted.
        let mut mock_cache = MockCacheService::new();
        mock_cache
            .expect_get_site()
            .times(0)
            .returning(|_| Ok(Some(test_site(7))));

        let service = SiteService::new(Arc::new(mock_repo), Arc::new(mock_cache));

        let result = service.resolve("short.example", 7).await;

        assert!(matches!(
            result,
            Err(ResolutionError::SiteNotFound { site_id: 7 })
        ));
    }

    #[tokio::test]
    async fn test_get_site_by_domain_cache_hit_skips_registry() {
        let mut mock_repo = MockSiteRepository::new();
        mock_repo.expect_find_site_by_domain().times(0);

        let mut mock_cache = MockCacheService::new();
        mock_cache
            .expect_get_site()
            .withf(|domain| domain == "internal.example")
            .times(1)
            .returning(|_| Ok(Some(test_site(4))));

        let service = SiteService::new(Arc::new(mock_repo), Arc::new(mock_cache));

        let site = service.get_site_by_domain("internal.example").await.unwrap();
        assert_eq!(site, test_site(4));
    }

    #[tokio::test]
    async fn test_get_site_by_domain_cache_miss_populates_cache() {
        let mut mock_repo = MockSiteRepository::new();
        mock_repo
            .expect_find_site_by_domain()
            .times(1)
            .returning(|_| Ok(Some(test_site(4))));

        let mut mock_cache = MockCacheService::new();
        mock_cache.expect_get_site().times(1).returning(|_| Ok(None));
        mock_cache
            .expect_set_site()
            .withf(|site, ttl| site.id == 4 && ttl.is_none())
            .times(1)
            .returning(|_, _| Ok(()));

        let service = SiteService::new(Arc::new(mock_repo), Arc::new(mock_cache));

        assert!(service.get_site_by_domain("internal.example").await.is_ok());
    }

    #[tokio::test]
    async fn test_get_site_by_domain_cache_error_falls_back_to_registry() {
        let mut mock_repo = MockSiteRepository::new();
        mock_repo
            .expect_find_site_by_domain()
            .times(1)
            .returning(|_| Ok(None));

        let mut mock_cache = MockCacheService::new();
        mock_cache
            .expect_get_site()
            .times(1)
            .returning(|_| Err(CacheError::ConnectionError("down".to_string())));
        mock_cache.expect_set_site().times(0);

        let service = SiteService::new(Arc::new(mock_repo), Arc::new(mock_cache));

        let result = service.get_site_by_domain("internal.example").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_site_by_domain_not_found() {
        let mut mock_repo = MockSiteRepository::new();
        mock_repo
            .expect_find_site_by_domain()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo).get_site_by_domain("nowhere.example").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_site_normalizes_path() {
        let mut mock_repo = MockSiteRepository::new();
        mock_repo
            .expect_create_site()
            .withf(|new_site| new_site.path == "/blog/" && new_site.network_id == 1)
            .times(1)
            .returning(|n| Ok(SiteRecord::new(5, n.network_id, n.domain, n.path)));

        let site = service(mock_repo)
            .create_site("internal.example".to_string(), "/blog".to_string())
            .await
            .unwrap();

        assert_eq!(site.path, "/blog/");
    }

    #[tokio::test]
    async fn test_create_site_invalidates_domain() {
        let mut mock_repo = MockSiteRepository::new();
        mock_repo
            .expect_create_site()
            .times(1)
            .returning(|n| Ok(SiteRecord::new(5, n.network_id, n.domain, n.path)));

        let mut mock_cache = MockCacheService::new();
        mock_cache
            .expect_invalidate_site()
            .withf(|domain| domain == "internal.example")
            .times(1)
            .returning(|_| Ok(()));

        let service = SiteService::new(Arc::new(mock_repo), Arc::new(mock_cache));

        service
            .create_site("internal.example".to_string(), "/".to_string())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_site_invalid_domain() {
        let mock_repo = MockSiteRepository::new();

        let result = service(mock_repo)
            .create_site("localhost".to_string(), "/".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_site_invalid_path() {
        let mock_repo = MockSiteRepository::new();

        let result = service(mock_repo)
            .create_site("internal.example".to_string(), "blog".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
