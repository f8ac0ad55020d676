//! Per-token cache of descriptive hotel metadata.
//!
//! Keys are provider tokens from the fixed registry, so the map is bounded by
//! the registry size and has no eviction. A registry that grows at runtime
//! would need an LRU or TTL policy here.
//!
//! Population is check-then-insert without holding the lock across the
//! upstream call: concurrent first requests for one token may both fetch,
//! and the first insert wins.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use hotelsearch_core::HotelMetadata;

#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: RwLock<HashMap<String, HotelMetadata>>,
}

impl MetadataCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, token: &str) -> Option<HotelMetadata> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
    }

    /// Stores `metadata` unless the token is already cached, and returns
    /// whichever value is now cached.
    pub fn insert_if_absent(&self, token: &str, metadata: HotelMetadata) -> HotelMetadata {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(token.to_owned())
            .or_insert(metadata)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
