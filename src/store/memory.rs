//! In-process variant store
//!
//! Keeps the same contract as the persistent store without touching disk.
//! Useful for tests and for ephemeral single-run deployments.

use crate::error::{CacheError, Result};
use crate::store::entry::CacheEntry;
use crate::store::VariantStore;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Variant store backed by a `HashMap` behind a `RwLock`.
///
/// Writes take the lock exclusively, so the duplicate check, insert, and
/// eviction for one `put` are atomic with respect to concurrent writers.
/// Reads take the lock shared and never observe a half-applied write.
pub struct MemoryStore {
    limit: usize,
    buckets: RwLock<HashMap<String, Vec<CacheEntry>>>,
}

impl MemoryStore {
    /// Create a store retaining at most `limit` variants per key
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            buckets: RwLock::new(HashMap::new()),
        }
    }

    /// Number of variants currently retained for `key`
    pub fn len(&self, key: &str) -> usize {
        self.buckets
            .read()
            .map(|b| b.get(key).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl VariantStore for MemoryStore {
    fn put(&self, key: &str, artifact: &Value) -> Result<()> {
        let entry = CacheEntry::new(key, artifact)?;

        let mut buckets = self
            .buckets
            .write()
            .map_err(|_| CacheError::StoreUnavailable("store lock poisoned".to_string()))?;
        let bucket = buckets.entry(key.to_string()).or_default();

        // Duplicate content for this key is an idempotent no-op.
        if bucket.iter().any(|e| e.content_hash == entry.content_hash) {
            debug!(key, hash = %entry.content_hash, "duplicate variant, skipping insert");
        } else {
            debug!(key, hash = %entry.content_hash, "retaining new variant");
            bucket.push(entry);
        }

        // Entries are appended in insertion order, so the front is oldest.
        while bucket.len() > self.limit {
            let evicted = bucket.remove(0);
            debug!(key, hash = %evicted.content_hash, "evicting oldest variant");
        }

        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<Value>> {
        let buckets = self
            .buckets
            .read()
            .map_err(|_| CacheError::StoreUnavailable("store lock poisoned".to_string()))?;

        match buckets.get(key) {
            None => Ok(Vec::new()),
            Some(bucket) => bucket.iter().map(CacheEntry::artifact).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_key_returns_empty() {
        let store = MemoryStore::new(10);
        assert!(store.get("unknown").unwrap().is_empty());
    }

    #[test]
    fn test_put_then_get() {
        let store = MemoryStore::new(10);
        let artifact = json!([{"name": "Fever", "severity": 2}]);

        store.put("flu", &artifact).unwrap();
        assert_eq!(store.get("flu").unwrap(), vec![artifact]);
    }

    #[test]
    fn test_duplicate_put_is_idempotent() {
        let store = MemoryStore::new(10);
        let artifact = json!({"name": "Fever"});

        store.put("flu", &artifact).unwrap();
        store.put("flu", &artifact).unwrap();

        assert_eq!(store.len("flu"), 1);
    }

    #[test]
    fn test_equivalent_key_order_deduplicates() {
        let store = MemoryStore::new(10);

        store.put("flu", &json!({"a": 1, "b": 2})).unwrap();
        store.put("flu", &json!({"b": 2, "a": 1})).unwrap();

        assert_eq!(store.len("flu"), 1);
    }

    #[test]
    fn test_eviction_keeps_newest() {
        let store = MemoryStore::new(2);

        store.put("flu", &json!({"v": "x"})).unwrap();
        store.put("flu", &json!({"v": "y"})).unwrap();
        store.put("flu", &json!({"v": "z"})).unwrap();

        let variants = store.get("flu").unwrap();
        assert_eq!(variants, vec![json!({"v": "y"}), json!({"v": "z"})]);
    }

    #[test]
    fn test_eviction_is_per_key() {
        let store = MemoryStore::new(1);

        store.put("flu", &json!({"v": 1})).unwrap();
        store.put("cold", &json!({"v": 2})).unwrap();

        assert_eq!(store.len("flu"), 1);
        assert_eq!(store.len("cold"), 1);
    }
}
