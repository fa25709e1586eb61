//! `MetadataMap`: type identifier → metadata descriptor

use crate::{HalEntity, Metadata};
use std::collections::HashMap;

/// Metadata for known domain types.
///
/// Keys are type identifiers: [`HalEntity::TYPE_NAME`] for typed objects,
/// free-form names for instances built by hand. The generator only queries
/// the map; populate it before constructing the generator.
#[derive(Debug, Clone, Default)]
pub struct MetadataMap {
    entries: HashMap<String, Metadata>,
}

impl MetadataMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add metadata keyed by its own `entity_type` (builder pattern).
    ///
    /// A later entry for the same type replaces the earlier one.
    #[must_use]
    pub fn with(mut self, metadata: impl Into<Metadata>) -> Self {
        self.insert(metadata);
        self
    }

    /// Add metadata keyed by its own `entity_type`.
    pub fn insert(&mut self, metadata: impl Into<Metadata>) {
        let metadata = metadata.into();
        self.entries
            .insert(metadata.entity_type().to_owned(), metadata);
    }

    /// Add metadata for `T`, keyed by [`HalEntity::TYPE_NAME`].
    ///
    /// The descriptor's `entity_type` is overwritten with `T::TYPE_NAME`, so
    /// the stored metadata always names the key it sits under.
    pub fn insert_for<T: HalEntity + ?Sized>(&mut self, metadata: impl Into<Metadata>) {
        self.insert(metadata.into().with_entity_type(T::TYPE_NAME));
    }

    /// Returns `true` if `type_name` has metadata.
    #[must_use]
    pub fn has(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// Metadata for `type_name`.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&Metadata> {
        self.entries.get(type_name)
    }

    /// Number of mapped types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no types are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mapped type identifiers (sorted).
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<Metadata> for MetadataMap {
    fn from_iter<I: IntoIterator<Item = Metadata>>(iter: I) -> Self {
        let mut map = Self::new();
        for metadata in iter {
            map.insert(metadata);
        }
        map
    }
}
