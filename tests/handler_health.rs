mod common;

use axum::http::StatusCode;
use axum::{Router, routing::get};
use axum_test::TestServer;
use common::{ALIAS, create_test_state, default_aliases, seeded_repository, site};
use domain_overlay::api::handlers::health_handler;
use domain_overlay::domain::entities::AliasEntry;
use domain_overlay::infrastructure::persistence::InMemorySiteRepository;

#[tokio::test]
async fn test_health_endpoint_success() {
    let state = create_test_state(seeded_repository(), vec![AliasEntry::new(ALIAS, 7)]);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["registry"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert_eq!(json["checks"]["aliases"]["message"], "1 alias(es) configured");
}

#[tokio::test]
async fn test_health_endpoint_missing_network() {
    let repository = InMemorySiteRepository::new().with_site(site(7, "internal.example", "/"));
    let state = create_test_state(repository, default_aliases());
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["registry"]["status"], "error");
}

#[tokio::test]
async fn test_health_endpoint_broken_alias() {
    // default_aliases maps gone.example to a deleted site.
    let state = create_test_state(seeded_repository(), default_aliases());
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["checks"]["registry"]["status"], "ok");
    assert_eq!(json["checks"]["aliases"]["status"], "error");
    let message = json["checks"]["aliases"]["message"].as_str().unwrap();
    assert!(message.contains("gone.example"));
    assert!(!message.contains("short.example"));
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let state = create_test_state(seeded_repository(), Vec::new());
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("registry").is_some());
    assert!(json["checks"].get("cache").is_some());
    assert!(json["checks"].get("aliases").is_some());
}
