//! Alias table entry mapping an external hostname to a site.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// One row of the alias table.
///
/// Hostnames are matched exactly against the incoming `Host` value, so the
/// entry must be written the way clients send it (including a port, if any).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct AliasEntry {
    #[validate(length(min = 1, max = 255), custom(function = "validate_hostname"))]
    pub hostname: String,
    #[validate(range(min = 1))]
    pub site_id: i64,
}

impl AliasEntry {
    pub fn new(hostname: impl Into<String>, site_id: i64) -> Self {
        Self {
            hostname: hostname.into(),
            site_id,
        }
    }
}

fn validate_hostname(hostname: &str) -> Result<(), ValidationError> {
    if hostname
        .chars()
        .any(|c| c.is_whitespace() || c == '/' || c == '\\')
    {
        return Err(ValidationError::new("hostname")
            .with_message("hostname must not contain whitespace or path separators".into()));
    }
    Ok(())
}
