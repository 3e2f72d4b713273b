mod common;

use axum::body::to_bytes;
use axum::http::{StatusCode, header};
use common::{ALIAS, create_test_app, get};
use domain_overlay::overlay::redirect::JOIN_REDIRECT_URL;
use tower::ServiceExt;

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_join_on_alias_redirects() {
    let app = create_test_app();

    let response = app.oneshot(get(ALIAS, "/join")).await.unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        JOIN_REDIRECT_URL
    );
    assert!(body_text(response).await.is_empty());
}

#[tokio::test]
async fn test_join_with_slashes_redirects() {
    let app = create_test_app();

    let response = app.oneshot(get(ALIAS, "/join/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
}

#[tokio::test]
async fn test_join_ignores_query_string() {
    let app = create_test_app();

    let response = app
        .oneshot(get(ALIAS, "/join?ref=footer"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
}

#[tokio::test]
async fn test_join_subpath_is_not_redirected() {
    let app = create_test_app();

    let response = app.oneshot(get(ALIAS, "/join/now")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_alias_page_masks_home_urls() {
    let app = create_test_app();

    let response = app.oneshot(get(ALIAS, "/artist/page")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::LINK).unwrap(),
        "<http://short.example/artist/page>; rel=\"canonical\""
    );

    let body = body_text(response).await;
    assert!(body.contains("short.example"));
    assert!(!body.contains("internal.example"));
}

#[tokio::test]
async fn test_alias_front_page_is_bound_site() {
    let app = create_test_app();

    let response = app.oneshot(get(ALIAS, "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Site 7"));
}

#[tokio::test]
async fn test_alias_host_is_matched_exactly() {
    let app = create_test_app();

    // Neither an alias (port differs) nor a canonical site domain.
    let response = app.oneshot(get("short.example:8080", "/join")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
