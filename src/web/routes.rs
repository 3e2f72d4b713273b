//! Platform route configuration.

use crate::state::AppState;
use crate::web::handlers::page_handler;
use axum::{Router, routing::get};

/// Site page routes.
///
/// # Endpoints
///
/// - `GET /` - Site front page
/// - `GET /{*path}` - Any other page of the current site
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(page_handler))
        .route("/{*path}", get(page_handler))
}
