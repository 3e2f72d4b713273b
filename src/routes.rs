//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`     - Health check: registry, cache, alias table (public)
//! - `GET /{*path}`    - Site pages for the current site
//!
//! # Middleware
//!
//! - **Domain overlay** - Outermost; binds alias hosts before routing
//! - **Tracing** - Structured request/response logging

use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::overlay::{Overlay, OverlayLayer};
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;

/// Constructs the application service with all routes and middleware.
///
/// The router is wrapped by [`OverlayLayer`] instead of receiving it through
/// `Router::layer`, so alias handling happens before route matching.
pub fn app_router(state: AppState) -> Overlay<Router> {
    let overlay = OverlayLayer::new(state.overlay.clone(), state.site_service.clone());

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(web::routes::routes())
        .with_state(state)
        .layer(tracing::layer());

    overlay.layer(router)
}
