//! # Asset Catalog (`catalog`)
//!
//! The fixed set of 3D assets a prompt can resolve to. A [`Catalog`] is built once at
//! startup, validated, and then only ever read: there is no mutation API, so it can be
//! shared behind an `Arc` by every request.
//!
//! Catalog order matters. Both the keyword matcher and the semantic ranking break ties
//! in favour of the earlier entry, so the order of the source file is the declared
//! priority.
//!
//! ```
//! use catalog::Catalog;
//!
//! let catalog = Catalog::reference();
//! assert_eq!(catalog.len(), 6);
//! assert_eq!(catalog.first().id, "astronaut");
//! ```

mod error;
mod load;
mod reference;
mod types;

use std::collections::HashSet;

use tracing::debug;

pub use crate::error::CatalogError;
pub use crate::types::AssetDescriptor;

/// Validated, immutable, non-empty sequence of [`AssetDescriptor`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<AssetDescriptor>,
}

impl Catalog {
    /// Build a catalog, normalizing tags to trimmed, deduplicated lowercase and enforcing the
    /// invariants: at least one entry, unique non-blank ids, a non-empty tag set per entry.
    pub fn new(entries: Vec<AssetDescriptor>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        let mut normalized = Vec::with_capacity(entries.len());
        for mut entry in entries {
            if entry.id.trim().is_empty() {
                return Err(CatalogError::InvalidEntry("asset id must not be blank".into()));
            }
            if entry.url.trim().is_empty() {
                return Err(CatalogError::InvalidEntry(format!(
                    "asset '{}' has a blank url",
                    entry.id
                )));
            }
            if !seen.insert(entry.id.clone()) {
                return Err(CatalogError::DuplicateId(entry.id));
            }

            // Duplicates collapse onto their first occurrence.
            let mut unique_tags = HashSet::with_capacity(entry.tags.len());
            entry.tags = entry
                .tags
                .iter()
                .map(|tag| tag.trim().to_lowercase())
                .filter(|tag| !tag.is_empty() && unique_tags.insert(tag.clone()))
                .collect();
            if entry.tags.is_empty() {
                return Err(CatalogError::MissingTags(entry.id));
            }
            normalized.push(entry);
        }

        debug!(entries = normalized.len(), "catalog_built");
        Ok(Self {
            entries: normalized,
        })
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[AssetDescriptor] {
        &self.entries
    }

    /// The first entry; the default answer whenever nothing else matches.
    pub fn first(&self) -> &AssetDescriptor {
        // Non-empty by construction.
        &self.entries[0]
    }

    pub fn get(&self, id: &str) -> Option<&AssetDescriptor> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never `true` for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetDescriptor> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a AssetDescriptor;
    type IntoIter = std::slice::Iter<'a, AssetDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
