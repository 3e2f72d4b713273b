//! Home URL construction.

use crate::domain::entities::SiteRecord;
use crate::domain::entities::site::untrailingslashit;
use crate::overlay::HomeUrlFilters;

/// Builds `{scheme}://{domain}{base path}/{path}` for a site and runs it
/// through the request's home URL filters.
///
/// Every URL the platform emits for a site must come from here so alias
/// masking covers all of them.
pub fn home_url(site: &SiteRecord, scheme: &str, path: &str, filters: &HomeUrlFilters) -> String {
    let url = format!(
        "{}://{}{}/{}",
        scheme,
        site.domain,
        untrailingslashit(&site.path),
        path.trim_start_matches('/')
    );
    filters.apply(url)
}
