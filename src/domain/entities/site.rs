//! Site and network records owned by the multisite registry.

use serde::{Deserialize, Serialize};

/// A site in the multisite network.
///
/// Records are borrowed from the site registry and never written by the
/// overlay. `path` is the site's base path (`/` for a root site); a trailing
/// separator on it is never significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub id: i64,
    pub network_id: i64,
    pub domain: String,
    pub path: String,
}

impl SiteRecord {
    /// Creates a new SiteRecord instance.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let site = SiteRecord::new(4, 1, "artist.example.com".to_string(), "/".to_string());
    /// ```
    pub fn new(id: i64, network_id: i64, domain: String, path: String) -> Self {
        Self {
            id,
            network_id,
            domain,
            path,
        }
    }

    /// Canonical domain followed by the base path with trailing separators removed.
    ///
    /// This is the prefix every home URL of the site carries, e.g.
    /// `internal.example/blog` for domain `internal.example` and path `/blog/`.
    pub fn origin_domain(&self) -> String {
        format!("{}{}", self.domain, untrailingslashit(&self.path))
    }
}

/// A network grouping sites of one multisite installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub id: i64,
    pub domain: String,
}

impl NetworkRecord {
    pub fn new(id: i64, domain: String) -> Self {
        Self { id, domain }
    }
}

/// Input data for registering a new site.
#[derive(Debug, Clone)]
pub struct NewSite {
    pub network_id: i64,
    pub domain: String,
    pub path: String,
}

/// Strips every trailing `/` or `\` from a path.
pub fn untrailingslashit(path: &str) -> &str {
    path.trim_end_matches(['/', '\\'])
}
