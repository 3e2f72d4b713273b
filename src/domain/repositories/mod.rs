//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`; a mock is
//! generated via `mockall` for unit tests.

pub mod site_repository;

pub use site_repository::SiteRepository;

#[cfg(test)]
pub use site_repository::MockSiteRepository;
