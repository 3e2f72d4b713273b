//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`SiteRecord`] - A site of the multisite network (borrowed from the registry)
//! - [`NetworkRecord`] - The network a site belongs to
//! - [`AliasEntry`] - A hostname that overlays an existing site
//!
//! `NewSite` is the creation input used by the admin tooling.

pub mod alias;
pub mod site;

pub use alias::AliasEntry;
pub use site::{NetworkRecord, NewSite, SiteRecord};
