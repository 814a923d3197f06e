//! Time-stamped store of parsed records per source.
//!
//! The store never expires entries on its own; callers decide freshness with
//! [`CacheEntry::is_fresh`]. Entries are replaced wholesale, never mutated.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use super::clock::{Clock, SystemClock};
use super::key::SourceKey;
use crate::parse::Record;

/// Parsed records for one source and the time they were stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    records: Arc<Vec<Record>>,
    fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn records(&self) -> &Arc<Vec<Record>> {
        &self.records
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Usable while `now - fetched_at < ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now - self.fetched_at < ttl
    }
}

/// In-memory map from source key to its latest parsed records.
pub struct ResultCache {
    entries: HashMap<SourceKey, CacheEntry>,
    clock: Arc<dyn Clock>,
}

impl ResultCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { entries: HashMap::new(), clock }
    }

    /// The entry for `key`, fresh or not.
    pub fn get(&self, key: &SourceKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Replace any entry for `key`, stamped with the current time.
    pub fn set(&mut self, key: SourceKey, records: Vec<Record>) -> Arc<Vec<Record>> {
        let records = Arc::new(records);
        let entry = CacheEntry { records: Arc::clone(&records), fetched_at: self.clock.now() };
        self.entries.insert(key, entry);
        records
    }

    /// Remove one entry. Returns whether anything was removed.
    pub fn delete(&mut self, key: &SourceKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached keys in sorted order.
    pub fn keys(&self) -> Vec<SourceKey> {
        let mut keys: Vec<SourceKey> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
