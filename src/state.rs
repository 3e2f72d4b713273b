use std::sync::Arc;

use crate::application::services::SiteService;
use crate::overlay::DomainOverlay;

#[derive(Clone)]
pub struct AppState {
    pub site_service: Arc<SiteService>,
    pub overlay: Arc<DomainOverlay>,
    /// Scheme used when building home URLs (`http` or `https`).
    pub home_scheme: Arc<str>,
}

impl AppState {
    pub fn new(
        site_service: Arc<SiteService>,
        overlay: Arc<DomainOverlay>,
        home_scheme: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            site_service,
            overlay,
            home_scheme: home_scheme.into(),
        }
    }
}
