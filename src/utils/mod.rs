//! Utility functions for request handling.
//!
//! - [`extract_host`] - Host extraction from HTTP requests

pub mod extract_host;
