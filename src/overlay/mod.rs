//! Domain overlay: serve a site under alias hostnames.
//!
//! # Request Flow
//!
//! ```text
//! Host ─▶ AliasRegistry::lookup ──miss──▶ untouched
//!              │ hit
//!              ▼
//!         SiteService::resolve ──SiteNotFound──▶ untouched (logged)
//!              │
//!              ▼
//!         host_binder::bind          (current site/network in request extensions)
//!              │
//!              ▼
//!         RedirectRule::check ──match──▶ 301
//!              │
//!              ▼
//!         url_masker::install_rewrite_hook ─▶ platform routing
//! ```
//!
//! The [`OverlayLayer`] wraps the whole router so this runs before route
//! matching and every other middleware.

pub mod alias_registry;
pub mod context;
pub mod host_binder;
pub mod layer;
pub mod redirect;
pub mod url_masker;

pub use alias_registry::{AliasRegistry, RegistryError};
pub use context::{RequestPath, ResolvedContext};
pub use host_binder::SiteBinding;
pub use layer::{Overlay, OverlayLayer};
pub use redirect::{RedirectResponse, RedirectRule};
pub use url_masker::{HomeUrlFilters, UrlMasker};

use crate::application::services::SiteService;
use crate::error::ResolutionError;
use crate::utils::extract_host::request_host;
use axum::http::Request;
use tracing::{debug, info, warn};

/// Alias table plus the alias-scoped redirect rule.
#[derive(Debug, Clone, Default)]
pub struct DomainOverlay {
    registry: AliasRegistry,
    redirect: RedirectRule,
}

impl DomainOverlay {
    pub fn new(registry: AliasRegistry, redirect: RedirectRule) -> Self {
        Self { registry, redirect }
    }

    pub fn registry(&self) -> &AliasRegistry {
        &self.registry
    }

    pub fn redirect_rule(&self) -> &RedirectRule {
        &self.redirect
    }

    /// Resolves the context for a host if it is a registered alias.
    ///
    /// Returns `Ok(None)` for hosts that are not aliases and for aliases whose
    /// site is missing from the registry; the latter is logged.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::NetworkNotFound`] or [`ResolutionError::Registry`]
    /// when the registry itself is broken or unreachable.
    pub async fn resolve_host(
        &self,
        sites: &SiteService,
        host: &str,
    ) -> Result<Option<ResolvedContext>, ResolutionError> {
        let Some(site_id) = self.registry.lookup(host) else {
            return Ok(None);
        };

        match sites.resolve(host, site_id).await {
            Ok(context) => Ok(Some(context)),
            Err(ResolutionError::SiteNotFound { site_id }) => {
                warn!(
                    alias = host,
                    site_id, "Alias points at a missing site, overlay disabled for this request"
                );
                metrics::counter!("overlay_requests_total", "outcome" => "site_not_found")
                    .increment(1);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Runs the overlay for one request.
    ///
    /// On an alias hit the request leaves with a [`SiteBinding`] and a
    /// [`HomeUrlFilters`] entry in its extensions, or the redirect to send
    /// instead of routing it.
    ///
    /// # Errors
    ///
    /// See [`DomainOverlay::resolve_host`]. Nothing is installed on error.
    pub async fn apply<B>(
        &self,
        sites: &SiteService,
        req: &mut Request<B>,
    ) -> Result<Option<RedirectResponse>, ResolutionError> {
        let Some(host) = request_host(req.headers(), req.uri()).map(str::to_owned) else {
            return Ok(None);
        };

        let Some(context) = self.resolve_host(sites, &host).await? else {
            return Ok(None);
        };

        host_binder::bind(req.extensions_mut(), &context);

        let path = RequestPath::from_uri(req.uri());
        if let Some(redirect) = self.redirect.check(&path) {
            info!(
                alias = %host,
                location = redirect.location(),
                "Alias redirect"
            );
            metrics::counter!("overlay_requests_total", "outcome" => "redirected").increment(1);
            return Ok(Some(redirect));
        }

        url_masker::install_rewrite_hook(
            req.extensions_mut(),
            context.alias_hostname(),
            &context.origin_domain(),
        );
        debug!(
            alias = %host,
            site_id = context.site().id,
            origin = %context.origin_domain(),
            "Alias bound"
        );
        metrics::counter!("overlay_requests_total", "outcome" => "masked").increment(1);

        Ok(None)
    }
}
