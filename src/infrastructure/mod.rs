//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`cache`] - Site record caching (Redis and no-op implementations)
//! - [`persistence`] - Site registry implementations

pub mod cache;
pub mod persistence;
