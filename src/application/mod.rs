//! Application layer services.
//!
//! Services orchestrate repository and cache calls and enforce validation
//! rules; HTTP handlers and the overlay consume them.
//!
//! # Available Services
//!
//! - [`services::site_service::SiteService`] - Site registry access and alias context resolution

pub mod services;
