//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::application::services::PRIMARY_NETWORK_ID;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Registry**: Primary network lookup
/// 2. **Cache**: Redis PING (always ok when caching is disabled)
/// 3. **Aliases**: Every alias resolves to a live site
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "registry": { "status": "ok", "message": "Network 1: internal.example" },
///     "cache": { "status": "ok", "message": "Cache reachable" },
///     "aliases": { "status": "ok", "message": "1 alias(es) configured" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let registry_check = check_registry(&state).await;

    let cache_check = check_cache(&state).await;

    let aliases_check = check_aliases(&state).await;

    let all_healthy = registry_check.is_ok() && cache_check.is_ok() && aliases_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            registry: registry_check,
            cache: cache_check,
            aliases: aliases_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks that the registry is reachable and the primary network exists.
async fn check_registry(state: &AppState) -> CheckStatus {
    match state.site_service.get_network(PRIMARY_NETWORK_ID).await {
        Ok(Some(network)) => CheckStatus::ok(format!("Network {}: {}", network.id, network.domain)),
        Ok(None) => CheckStatus::error(format!("Network {} not found", PRIMARY_NETWORK_ID)),
        Err(e) => CheckStatus::error(format!("Registry error: {}", e)),
    }
}

/// Checks cache connectivity.
async fn check_cache(state: &AppState) -> CheckStatus {
    if state.site_service.cache_healthy().await {
        CheckStatus::ok("Cache reachable")
    } else {
        CheckStatus::error("Cache connection failed")
    }
}

/// Checks that every alias still resolves against the registry.
///
/// An empty table is valid: the overlay is inert.
async fn check_aliases(state: &AppState) -> CheckStatus {
    let registry = state.overlay.registry();
    let mut broken = Vec::new();

    for entry in registry.entries() {
        if let Err(e) = state
            .site_service
            .resolve(&entry.hostname, entry.site_id)
            .await
        {
            broken.push(format!("{} ({})", entry.hostname, e));
        }
    }

    if broken.is_empty() {
        CheckStatus::ok(format!("{} alias(es) configured", registry.len()))
    } else {
        CheckStatus::error(format!("Broken aliases: {}", broken.join(", ")))
    }
}
