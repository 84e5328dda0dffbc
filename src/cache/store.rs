//! In-process mirror of the `products` table.

use std::collections::HashMap;
use std::sync::RwLock;

use metrics::{counter, gauge};

use crate::domain::entities::ProductRecord;

use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

pub(crate) const METRIC_CACHE_HIT_TOTAL: &str = "cellar_catalog_cache_hit_total";
pub(crate) const METRIC_CACHE_MISS_TOTAL: &str = "cellar_catalog_cache_miss_total";
pub(crate) const METRIC_CACHE_ENTRIES: &str = "cellar_catalog_cache_entries";

/// Product records keyed by product id.
///
/// Entries are only ever replaced or removed whole. The mapping sits behind a
/// single `RwLock`, so any number of request handlers may read while a writer
/// (in practice only the startup loader) holds exclusive access for the duration
/// of one operation.
///
/// Nothing here talks to the database. Writes to the `products` table are not
/// reflected until the next [`replace_all`](Self::replace_all).
pub struct ProductCache {
    entries: RwLock<HashMap<i64, ProductRecord>>,
}

impl Default for ProductCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Store `record` under `id`, overwriting whatever was there.
    pub fn insert(&self, id: i64, record: ProductRecord) {
        let len = {
            let mut entries = rw_write(&self.entries, SOURCE, "insert");
            entries.insert(id, record);
            entries.len()
        };
        record_len(len);
    }

    pub fn get(&self, id: i64) -> Option<ProductRecord> {
        let found = rw_read(&self.entries, SOURCE, "get").get(&id).cloned();
        match found {
            Some(_) => counter!(METRIC_CACHE_HIT_TOTAL).increment(1),
            None => counter!(METRIC_CACHE_MISS_TOTAL).increment(1),
        }
        found
    }

    /// Remove `id`; returns whether an entry was present.
    pub fn delete(&self, id: i64) -> bool {
        let (removed, len) = {
            let mut entries = rw_write(&self.entries, SOURCE, "delete");
            let removed = entries.remove(&id).is_some();
            (removed, entries.len())
        };
        if removed {
            record_len(len);
        }
        removed
    }

    /// Snapshot of every cached record. Order is unspecified.
    pub fn get_all(&self) -> Vec<ProductRecord> {
        rw_read(&self.entries, SOURCE, "get_all")
            .values()
            .cloned()
            .collect()
    }

    /// Swap in a fully built mapping, returning how many entries it replaced.
    ///
    /// Readers observe either the old mapping or the new one, never a partially
    /// cleared cache.
    pub fn replace_all(&self, entries: HashMap<i64, ProductRecord>) -> usize {
        let len = entries.len();
        let previous = {
            let mut guard = rw_write(&self.entries, SOURCE, "replace_all");
            std::mem::replace(&mut *guard, entries)
        };
        record_len(len);
        previous.len()
    }

    pub fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn record_len(len: usize) {
    gauge!(METRIC_CACHE_ENTRIES).set(len as f64);
}
