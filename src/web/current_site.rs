//! Current-site extractor for platform handlers.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde_json::json;

use crate::domain::entities::SiteRecord;
use crate::error::AppError;
use crate::overlay::{HomeUrlFilters, host_binder};
use crate::state::AppState;
use crate::utils::extract_host::{request_host, strip_port};
use crate::web::home_url::home_url;

/// The site a request is served for, plus its home URL filters.
///
/// Uses the [`host_binder::SiteBinding`] installed by the domain overlay when
/// present. Otherwise falls back to the platform's own host resolution: the
/// `Host` value without port, matched against site domains.
///
/// # Errors
///
/// Rejects with 400 if no host can be determined and 404 if no site serves it.
#[derive(Debug, Clone)]
pub struct CurrentSite {
    pub site: SiteRecord,
    pub alias_hostname: Option<String>,
    pub filters: HomeUrlFilters,
}

impl CurrentSite {
    /// Home URL of the current site for `path`, with filters applied.
    pub fn home_url(&self, scheme: &str, path: &str) -> String {
        home_url(&self.site, scheme, path, &self.filters)
    }
}

impl FromRequestParts<AppState> for CurrentSite {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let filters = parts
            .extensions
            .get::<HomeUrlFilters>()
            .cloned()
            .unwrap_or_default();

        if let Some(binding) = host_binder::current(&parts.extensions) {
            return Ok(Self {
                site: binding.site.clone(),
                alias_hostname: Some(binding.alias_hostname.clone()),
                filters,
            });
        }

        let host = request_host(&parts.headers, &parts.uri)
            .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?;

        let site = state
            .site_service
            .get_site_by_domain(strip_port(host))
            .await?;

        Ok(Self {
            site,
            alias_hostname: None,
            filters,
        })
    }
}
