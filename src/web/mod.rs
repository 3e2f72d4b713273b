//! Platform layer serving site pages.
//!
//! Stands in for the multisite platform behind the overlay: it resolves the
//! current site (from the overlay's binding or its own host lookup) and
//! builds every outbound URL through [`home_url::home_url`].
//!
//! # Modules
//!
//! - [`current_site`] - Current-site extractor
//! - [`home_url`] - Home URL builder applying request filters
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration

pub mod current_site;
pub mod handlers;
pub mod home_url;
pub mod routes;
