//! Site registry implementations.
//!
//! # Repositories
//!
//! - [`PgSiteRepository`] - PostgreSQL-backed registry (production)
//! - [`InMemorySiteRepository`] - Seeded in-memory registry (development and tests)

pub mod memory_site_repository;
pub mod pg_site_repository;

pub use memory_site_repository::InMemorySiteRepository;
pub use pg_site_repository::PgSiteRepository;
