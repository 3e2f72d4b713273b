//! Site page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::{Uri, header},
    response::IntoResponse,
};

use crate::overlay::RequestPath;
use crate::state::AppState;
use crate::web::current_site::CurrentSite;

/// Template for a site page.
///
/// Renders `templates/page.html`; every link in it is a home URL.
#[derive(Template, WebTemplate)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub site_id: i64,
    pub path: String,
    pub served_as: String,
    pub home_url: String,
    pub page_url: String,
    pub join_url: String,
}

/// Renders the page for any path of the current site.
///
/// # Endpoint
///
/// `GET /` and `GET /{*path}`
///
/// Sends the canonical page URL in a `Link` header as well as in the body.
pub async fn page_handler(
    State(state): State<AppState>,
    site: CurrentSite,
    uri: Uri,
) -> impl IntoResponse {
    let scheme: &str = &state.home_scheme;
    let path = RequestPath::from_uri(&uri);

    let page_url = site.home_url(scheme, path.as_str());
    let template = PageTemplate {
        site_id: site.site.id,
        path: path.as_str().to_string(),
        served_as: site
            .alias_hostname
            .clone()
            .unwrap_or_else(|| site.site.domain.clone()),
        home_url: site.home_url(scheme, ""),
        page_url: page_url.clone(),
        join_url: site.home_url(scheme, "join/"),
    };

    (
        [(header::LINK, format!("<{}>; rel=\"canonical\"", page_url))],
        template,
    )
}
