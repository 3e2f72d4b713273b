//! Binds the resolved site to the request.

use super::context::ResolvedContext;
use crate::domain::entities::{NetworkRecord, SiteRecord};
use axum::http::Extensions;

/// Current site and network for a request served through an alias.
///
/// Lives in the request's extensions, so it is dropped with the request and
/// never visible to concurrent requests. Platform code reads it instead of
/// resolving the site from the canonical host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteBinding {
    pub alias_hostname: String,
    pub site: SiteRecord,
    pub network: NetworkRecord,
}

/// Installs the current site and network for the rest of the request.
///
/// Must run before any routing; a binding already present is replaced.
pub fn bind(extensions: &mut Extensions, context: &ResolvedContext) {
    extensions.insert(SiteBinding {
        alias_hostname: context.alias_hostname().to_string(),
        site: context.site().clone(),
        network: context.network().clone(),
    });
}

/// Returns the binding installed by [`bind`], if any.
pub fn current(extensions: &Extensions) -> Option<&SiteBinding> {
    extensions.get::<SiteBinding>()
}
