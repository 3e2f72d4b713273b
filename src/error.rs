use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!("Database error: {}", e);
        AppError::internal("Database error", json!({}))
    }
}

/// Failure to build a [`crate::overlay::ResolvedContext`] for an alias.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// The alias points at a site the registry does not know (or has deleted).
    /// Recovered by the overlay: the request continues without a binding.
    #[error("site {site_id} not found in registry")]
    SiteNotFound { site_id: i64 },

    /// The deployment's own network record is missing. Not recoverable.
    #[error("network {network_id} not found in registry")]
    NetworkNotFound { network_id: i64 },

    #[error(transparent)]
    Registry(#[from] AppError),
}

impl From<ResolutionError> for AppError {
    fn from(e: ResolutionError) -> Self {
        match e {
            ResolutionError::SiteNotFound { site_id } => {
                AppError::not_found("Site not found", json!({ "site_id": site_id }))
            }
            ResolutionError::NetworkNotFound { network_id } => AppError::internal(
                "Network is not configured",
                json!({ "network_id": network_id }),
            ),
            ResolutionError::Registry(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_not_found_is_internal() {
        let err: AppError = ResolutionError::NetworkNotFound { network_id: 1 }.into();
        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_registry_error_passes_through() {
        let err: AppError =
            ResolutionError::Registry(AppError::internal("Database error", json!({}))).into();
        assert_eq!(err.to_string(), "Database error");
    }

    #[test]
    fn test_site_not_found_display() {
        let err = ResolutionError::SiteNotFound { site_id: 9 };
        assert_eq!(err.to_string(), "site 9 not found in registry");
    }
}
