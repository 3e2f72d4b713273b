//! Domain layer containing entities and repository contracts.
//!
//! - [`entities`] - Site, network and alias data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Resolution logic lives in [`crate::application::services`] and
//! [`crate::overlay`].

pub mod entities;
pub mod repositories;
