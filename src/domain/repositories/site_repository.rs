//! Repository trait for the multisite site registry.

use crate::domain::entities::{NetworkRecord, NewSite, SiteRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the multisite site and network registry.
///
/// The request path only reads; [`SiteRepository::create_site`] exists for
/// operator tooling.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSiteRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemorySiteRepository`] - Seeded in-memory registry
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Finds a live site by its ID.
    ///
    /// Deleted sites are reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_site(&self, site_id: i64) -> Result<Option<SiteRecord>, AppError>;

    /// Finds the live site served at the root of `domain`.
    ///
    /// When several sites share a domain (subdirectory installs) the one with
    /// the shortest path wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_site_by_domain(&self, domain: &str) -> Result<Option<SiteRecord>, AppError>;

    /// Finds a network by its ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_network(&self, network_id: i64) -> Result<Option<NetworkRecord>, AppError>;

    /// Lists all live sites ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_sites(&self) -> Result<Vec<SiteRecord>, AppError>;

    /// Registers a new site.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the domain and path pair is taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create_site(&self, new_site: NewSite) -> Result<SiteRecord, AppError>;
}
