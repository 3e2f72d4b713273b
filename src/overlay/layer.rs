//! Tower layer running the overlay ahead of the router.

use super::DomainOverlay;
use crate::application::services::SiteService;
use crate::error::AppError;
use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use std::{
    convert::Infallible,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::error;

/// Wraps a service (normally the whole [`axum::Router`]) with the domain overlay.
///
/// Applying it around the router, rather than with `Router::layer`, makes the
/// overlay run before route matching.
///
/// ```rust,ignore
/// let app = OverlayLayer::new(overlay, site_service).layer(router);
/// axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
/// ```
#[derive(Clone)]
pub struct OverlayLayer {
    overlay: Arc<DomainOverlay>,
    sites: Arc<SiteService>,
}

impl OverlayLayer {
    pub fn new(overlay: Arc<DomainOverlay>, sites: Arc<SiteService>) -> Self {
        Self { overlay, sites }
    }
}

impl<S> Layer<S> for OverlayLayer {
    type Service = Overlay<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Overlay {
            inner,
            overlay: self.overlay.clone(),
            sites: self.sites.clone(),
        }
    }
}

/// Service produced by [`OverlayLayer`].
#[derive(Clone)]
pub struct Overlay<S> {
    inner: S,
    overlay: Arc<DomainOverlay>,
    sites: Arc<SiteService>,
}

impl<S> Service<Request> for Overlay<S>
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send + 'static>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        // The clone may not be ready; keep the service that was polled.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let overlay = self.overlay.clone();
        let sites = self.sites.clone();

        Box::pin(async move {
            match overlay.apply(&sites, &mut req).await {
                Ok(Some(redirect)) => Ok(redirect.into_response()),
                Ok(None) => inner.call(req).await,
                Err(e) => {
                    error!("Domain overlay failed: {}", e);
                    Ok(AppError::from(e).into_response())
                }
            }
        })
    }
}
