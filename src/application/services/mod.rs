//! Business logic services for the application layer.

pub mod site_service;

pub use site_service::{PRIMARY_NETWORK_ID, SiteService};
