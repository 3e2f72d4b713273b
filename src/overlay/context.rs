//! Request-scoped values produced while resolving an alias.

use crate::domain::entities::{NetworkRecord, SiteRecord};
use axum::http::Uri;

/// Site and network an alias hostname resolved to, for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    alias_hostname: String,
    site: SiteRecord,
    network: NetworkRecord,
}

impl ResolvedContext {
    pub fn new(alias_hostname: impl Into<String>, site: SiteRecord, network: NetworkRecord) -> Self {
        Self {
            alias_hostname: alias_hostname.into(),
            site,
            network,
        }
    }

    pub fn alias_hostname(&self) -> &str {
        &self.alias_hostname
    }

    pub fn site(&self) -> &SiteRecord {
        &self.site
    }

    pub fn network(&self) -> &NetworkRecord {
        &self.network
    }

    /// Prefix of every canonical home URL of the bound site.
    pub fn origin_domain(&self) -> String {
        self.site.origin_domain()
    }
}

/// Request path with leading and trailing `/` removed.
///
/// A missing path normalizes to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPath(String);

impl RequestPath {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim_matches('/').to_string())
    }

    pub fn from_uri(uri: &Uri) -> Self {
        Self::new(uri.path())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path_trims_separators() {
        assert_eq!(RequestPath::new("/join").as_str(), "join");
        assert_eq!(RequestPath::new("/join/").as_str(), "join");
        assert_eq!(RequestPath::new("//join//").as_str(), "join");
        assert_eq!(RequestPath::new("/artist/page/").as_str(), "artist/page");
    }

    #[test]
    fn test_request_path_root_and_empty() {
        assert_eq!(RequestPath::new("/").as_str(), "");
        assert_eq!(RequestPath::new("").as_str(), "");
        assert_eq!(RequestPath::default().as_str(), "");
    }

    #[test]
    fn test_request_path_from_uri_ignores_query() {
        let uri: Uri = "http://short.example/join/?ref=mail".parse().unwrap();
        assert_eq!(RequestPath::from_uri(&uri).as_str(), "join");
    }

    #[test]
    fn test_origin_domain_from_context() {
        let context = ResolvedContext::new(
            "short.example",
            SiteRecord::new(7, 1, "internal.example".to_string(), "/blog/".to_string()),
            NetworkRecord::new(1, "internal.example".to_string()),
        );
        assert_eq!(context.origin_domain(), "internal.example/blog");
    }
}
