//! Rewrites canonical home URLs to the alias hostname.

use super::context::ResolvedContext;
use axum::http::Extensions;
use std::fmt;
use std::sync::Arc;

/// Literal substitution of the site's origin domain with the alias hostname.
///
/// Idempotent as long as the alias hostname does not itself contain the
/// origin domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMasker {
    alias_hostname: String,
    origin_domain: String,
}

impl UrlMasker {
    pub fn new(alias_hostname: impl Into<String>, origin_domain: impl Into<String>) -> Self {
        Self {
            alias_hostname: alias_hostname.into(),
            origin_domain: origin_domain.into(),
        }
    }

    pub fn for_context(context: &ResolvedContext) -> Self {
        Self::new(context.alias_hostname(), context.origin_domain())
    }

    pub fn alias_hostname(&self) -> &str {
        &self.alias_hostname
    }

    pub fn origin_domain(&self) -> &str {
        &self.origin_domain
    }

    /// Replaces every occurrence of the origin domain in `url`.
    pub fn mask(&self, url: &str) -> String {
        // An empty pattern would match between every character.
        if self.origin_domain.is_empty() || self.origin_domain == self.alias_hostname {
            return url.to_string();
        }
        url.replace(&self.origin_domain, &self.alias_hostname)
    }
}

type HomeUrlFilter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Filters applied, in installation order, to every home URL the platform
/// emits while handling one request.
#[derive(Clone, Default)]
pub struct HomeUrlFilters {
    filters: Vec<HomeUrlFilter>,
}

impl HomeUrlFilters {
    pub fn add<F>(&mut self, filter: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.filters.push(Arc::new(filter));
    }

    pub fn apply(&self, url: String) -> String {
        self.filters.iter().fold(url, |url, filter| filter(&url))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for HomeUrlFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomeUrlFilters")
            .field("len", &self.filters.len())
            .finish()
    }
}

/// Registers the alias rewrite on the request's home URL filter chain.
pub fn install_rewrite_hook(extensions: &mut Extensions, alias_hostname: &str, origin_domain: &str) {
    let masker = UrlMasker::new(alias_hostname, origin_domain);

    if extensions.get::<HomeUrlFilters>().is_none() {
        extensions.insert(HomeUrlFilters::default());
    }
    if let Some(filters) = extensions.get_mut::<HomeUrlFilters>() {
        filters.add(move |url| masker.mask(url));
    }
}
