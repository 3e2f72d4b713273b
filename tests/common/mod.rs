#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use std::sync::Arc;
use domain_overlay::application::services::SiteService;
use domain_overlay::domain::entities::{AliasEntry, NetworkRecord, SiteRecord};
use domain_overlay::infrastructure::cache::NullCache;
use domain_overlay::infrastructure::persistence::InMemorySiteRepository;
use domain_overlay::overlay::{AliasRegistry, DomainOverlay, Overlay, RedirectRule};
use domain_overlay::overlay::redirect::{JOIN_PATH, JOIN_REDIRECT_URL};
use domain_overlay::routes::app_router;
use domain_overlay::state::AppState;

pub const NETWORK_DOMAIN: &str = "network.example";
pub const ORIGIN_DOMAIN: &str = "internal.example";
pub const ALIAS: &str = "short.example";

/// Network 1 with a main site, the aliased site 7 and a deleted site 9.
pub fn seeded_repository() -> InMemorySiteRepository {
    InMemorySiteRepository::new()
        .with_network(NetworkRecord::new(1, NETWORK_DOMAIN.to_string()))
        .with_site(site(1, NETWORK_DOMAIN, "/"))
        .with_site(site(7, ORIGIN_DOMAIN, "/"))
        .with_deleted_site(site(9, "gone.example", "/"))
}

pub fn site(id: i64, domain: &str, path: &str) -> SiteRecord {
    SiteRecord::new(id, 1, domain.to_string(), path.to_string())
}

pub fn default_aliases() -> Vec<AliasEntry> {
    vec![
        AliasEntry::new(ALIAS, 7),
        AliasEntry::new("gone.example", 9),
        // Stale alias shadowing a canonical domain.
        AliasEntry::new(NETWORK_DOMAIN, 99),
    ]
}

pub fn create_test_state(repository: InMemorySiteRepository, aliases: Vec<AliasEntry>) -> AppState {
    let site_service = Arc::new(SiteService::new(
        Arc::new(repository),
        Arc::new(NullCache::new()),
    ));
    let overlay = Arc::new(DomainOverlay::new(
        AliasRegistry::from_entries(aliases).unwrap(),
        RedirectRule::new(JOIN_PATH, JOIN_REDIRECT_URL),
    ));

    AppState::new(site_service, overlay, "http")
}

pub fn create_test_app() -> Overlay<Router> {
    app_router(create_test_state(seeded_repository(), default_aliases()))
}

pub fn get(host: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::HOST, host)
        .body(Body::empty())
        .unwrap()
}
