//! PostgreSQL implementation of the site registry.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NetworkRecord, NewSite, SiteRecord};
use crate::domain::repositories::SiteRepository;
use crate::error::AppError;

/// PostgreSQL repository for sites and networks.
///
/// Uses soft delete: `deleted = TRUE` sites are invisible to lookups.
pub struct PgSiteRepository {
    pool: Arc<PgPool>,
}

impl PgSiteRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SiteRow {
    id: i64,
    network_id: i64,
    domain: String,
    path: String,
}

impl From<SiteRow> for SiteRecord {
    fn from(r: SiteRow) -> Self {
        SiteRecord::new(r.id, r.network_id, r.domain, r.path)
    }
}

#[derive(FromRow)]
struct NetworkRow {
    id: i64,
    domain: String,
}

#[async_trait]
impl SiteRepository for PgSiteRepository {
    async fn find_site(&self, site_id: i64) -> Result<Option<SiteRecord>, AppError> {
        let row = sqlx::query_as::<_, SiteRow>(
            r#"
            SELECT id, network_id, domain, path
            FROM sites
            WHERE id = $1 AND deleted = FALSE
            "#,
        )
        .bind(site_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(SiteRecord::from))
    }

    async fn find_site_by_domain(&self, domain: &str) -> Result<Option<SiteRecord>, AppError> {
        let row = sqlx::query_as::<_, SiteRow>(
            r#"
            SELECT id, network_id, domain, path
            FROM sites
            WHERE domain = $1 AND deleted = FALSE
            ORDER BY length(path), id
            LIMIT 1
            "#,
        )
        .bind(domain)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(SiteRecord::from))
    }

    async fn find_network(&self, network_id: i64) -> Result<Option<NetworkRecord>, AppError> {
        let row = sqlx::query_as::<_, NetworkRow>(
            r#"
            SELECT id, domain
            FROM networks
            WHERE id = $1
            "#,
        )
        .bind(network_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| NetworkRecord::new(r.id, r.domain)))
    }

    async fn list_sites(&self) -> Result<Vec<SiteRecord>, AppError> {
        let rows = sqlx::query_as::<_, SiteRow>(
            r#"
            SELECT id, network_id, domain, path
            FROM sites
            WHERE deleted = FALSE
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(SiteRecord::from).collect())
    }

    async fn create_site(&self, new_site: NewSite) -> Result<SiteRecord, AppError> {
        let row = sqlx::query_as::<_, SiteRow>(
            r#"
            INSERT INTO sites (network_id, domain, path)
            VALUES ($1, $2, $3)
            RETURNING id, network_id, domain, path
            "#,
        )
        .bind(new_site.network_id)
        .bind(new_site.domain)
        .bind(new_site.path)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }
}
