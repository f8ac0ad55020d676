//! Short-TTL cache of list responses keyed by search criteria.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use hotelsearch_core::{AggregatedHotelResult, SearchCriteria};
use tokio::sync::Mutex;

#[derive(Debug)]
struct Entry {
    stored_at: Instant,
    results: Vec<AggregatedHotelResult>,
}

/// A zero TTL disables caching entirely.
#[derive(Debug)]
pub struct SearchCache {
    ttl: Duration,
    entries: Mutex<HashMap<SearchCriteria, Entry>>,
}

impl SearchCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Returns a fresh entry, dropping it if it has expired.
    pub async fn get(&self, criteria: &SearchCriteria) -> Option<Vec<AggregatedHotelResult>> {
        if !self.is_enabled() {
            return None;
        }
        let mut entries = self.entries.lock().await;
        match entries.get(criteria) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.results.clone()),
            Some(_) => {
                entries.remove(criteria);
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, criteria: SearchCriteria, results: Vec<AggregatedHotelResult>) {
        if !self.is_enabled() {
            return;
        }
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        entries.insert(
            criteria,
            Entry {
                stored_at: Instant::now(),
                results,
            },
        );
    }
}
