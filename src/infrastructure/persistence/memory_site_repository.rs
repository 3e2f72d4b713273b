//! In-memory site registry.

use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NetworkRecord, NewSite, SiteRecord};
use crate::domain::repositories::SiteRepository;
use crate::error::AppError;

#[derive(Default)]
struct Registry {
    sites: BTreeMap<i64, StoredSite>,
    networks: BTreeMap<i64, NetworkRecord>,
}

struct StoredSite {
    record: SiteRecord,
    deleted: bool,
}

/// Site registry held in memory, seeded with builder calls.
///
/// Mirrors the soft-delete semantics of
/// [`crate::infrastructure::persistence::PgSiteRepository`].
///
/// ```ignore
/// let repo = InMemorySiteRepository::new()
///     .with_network(NetworkRecord::new(1, "internal.example".into()))
///     .with_site(SiteRecord::new(7, 1, "internal.example".into(), "/".into()));
/// ```
#[derive(Default)]
pub struct InMemorySiteRepository {
    inner: RwLock<Registry>,
}

impl InMemorySiteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_network(mut self, network: NetworkRecord) -> Self {
        self.inner.get_mut().networks.insert(network.id, network);
        self
    }

    pub fn with_site(mut self, site: SiteRecord) -> Self {
        self.inner.get_mut().sites.insert(
            site.id,
            StoredSite {
                record: site,
                deleted: false,
            },
        );
        self
    }

    pub fn with_deleted_site(mut self, site: SiteRecord) -> Self {
        self.inner.get_mut().sites.insert(
            site.id,
            StoredSite {
                record: site,
                deleted: true,
            },
        );
        self
    }
}

#[async_trait]
impl SiteRepository for InMemorySiteRepository {
    async fn find_site(&self, site_id: i64) -> Result<Option<SiteRecord>, AppError> {
        let registry = self.inner.read().await;
        Ok(registry
            .sites
            .get(&site_id)
            .filter(|s| !s.deleted)
            .map(|s| s.record.clone()))
    }

    async fn find_site_by_domain(&self, domain: &str) -> Result<Option<SiteRecord>, AppError> {
        let registry = self.inner.read().await;
        Ok(registry
            .sites
            .values()
            .filter(|s| !s.deleted && s.record.domain == domain)
            .min_by_key(|s| (s.record.path.len(), s.record.id))
            .map(|s| s.record.clone()))
    }

    async fn find_network(&self, network_id: i64) -> Result<Option<NetworkRecord>, AppError> {
        let registry = self.inner.read().await;
        Ok(registry.networks.get(&network_id).cloned())
    }

    async fn list_sites(&self) -> Result<Vec<SiteRecord>, AppError> {
        let registry = self.inner.read().await;
        Ok(registry
            .sites
            .values()
            .filter(|s| !s.deleted)
            .map(|s| s.record.clone())
            .collect())
    }

    async fn create_site(&self, new_site: NewSite) -> Result<SiteRecord, AppError> {
        let mut registry = self.inner.write().await;

        let taken = registry
            .sites
            .values()
            .any(|s| s.record.domain == new_site.domain && s.record.path == new_site.path);
        if taken {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "sites_domain_path_key" }),
            ));
        }

        let id = registry.sites.keys().next_back().map_or(1, |last| last + 1);
        let record = SiteRecord::new(id, new_site.network_id, new_site.domain, new_site.path);
        registry.sites.insert(
            id,
            StoredSite {
                record: record.clone(),
                deleted: false,
            },
        );

        Ok(record)
    }
}
