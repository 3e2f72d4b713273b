//! Alias-scoped permanent redirect for a single path.

use super::context::RequestPath;
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// Path that triggers the redirect, after normalization.
pub const JOIN_PATH: &str = "join";

/// Default redirect target.
pub const JOIN_REDIRECT_URL: &str = "https://artist.extrachill.com/login/?from_join=true";

/// Redirects one normalized path to a fixed absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    path: String,
    location: String,
}

impl RedirectRule {
    pub fn new(path: &str, location: impl Into<String>) -> Self {
        Self {
            path: RequestPath::new(path).as_str().to_string(),
            location: location.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the redirect when `path` equals the rule's path exactly.
    pub fn check(&self, path: &RequestPath) -> Option<RedirectResponse> {
        (path.as_str() == self.path).then(|| RedirectResponse {
            location: self.location.clone(),
        })
    }
}

impl Default for RedirectRule {
    fn default() -> Self {
        Self::new(JOIN_PATH, JOIN_REDIRECT_URL)
    }
}

/// `301 Moved Permanently` with a `Location` header and no body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectResponse {
    location: String,
}

impl RedirectResponse {
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl IntoResponse for RedirectResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, self.location)],
        )
            .into_response()
    }
}
