//! Static hostname → site ID table.

use crate::domain::entities::AliasEntry;
use std::collections::HashMap;
use validator::{Validate, ValidationErrors};

/// Errors raised while loading the alias table.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid alias entry '{hostname}': {source}")]
    InvalidEntry {
        hostname: String,
        #[source]
        source: ValidationErrors,
    },

    #[error("alias hostname '{0}' is configured more than once")]
    DuplicateHostname(String),
}

/// Immutable mapping from alias hostname to site ID.
///
/// Built once at startup and shared read-only between requests. Lookups are
/// exact string matches: no case folding and no port stripping.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    entries: HashMap<String, i64>,
}

impl AliasRegistry {
    /// Builds a registry from configured entries.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidEntry`] for an empty or malformed hostname
    /// or a non-positive site ID, and [`RegistryError::DuplicateHostname`] when a
    /// hostname appears twice.
    pub fn from_entries(
        entries: impl IntoIterator<Item = AliasEntry>,
    ) -> Result<Self, RegistryError> {
        let mut map = HashMap::new();

        for entry in entries {
            entry
                .validate()
                .map_err(|source| RegistryError::InvalidEntry {
                    hostname: entry.hostname.clone(),
                    source,
                })?;

            if map.insert(entry.hostname.clone(), entry.site_id).is_some() {
                return Err(RegistryError::DuplicateHostname(entry.hostname));
            }
        }

        Ok(Self { entries: map })
    }

    /// Returns the site ID an alias hostname maps to.
    pub fn lookup(&self, hostname: &str) -> Option<i64> {
        self.entries.get(hostname).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by hostname.
    pub fn entries(&self) -> Vec<AliasEntry> {
        let mut entries: Vec<AliasEntry> = self
            .entries
            .iter()
            .map(|(hostname, site_id)| AliasEntry::new(hostname.clone(), *site_id))
            .collect();
        entries.sort_by(|a, b| a.hostname.cmp(&b.hostname));
        entries
    }
}
