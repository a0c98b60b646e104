//! Cache entries and content addressing
//!
//! An artifact is stored as its canonical JSON text plus a SHA-256 digest of
//! that text. Canonical means deterministic property order, so semantically
//! identical artifacts always hash identically; serde_json serializes object
//! keys in sorted order as long as its `preserve_order` feature stays off.

use crate::error::{CacheError, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// A single retained variant for a cache key.
///
/// Entries are immutable once written; they disappear only through the
/// per-key retention rule or full store teardown.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Normalized cache key this variant belongs to
    pub key: String,

    /// Canonical serialized artifact
    pub payload: String,

    /// Hex-encoded SHA-256 digest of `payload`
    pub content_hash: String,

    /// Insertion time, used for oldest-first eviction
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Build an entry from a validated artifact
    pub fn new(key: impl Into<String>, artifact: &Value) -> Result<Self> {
        let payload = canonical_json(artifact)?;
        let content_hash = content_hash(&payload);

        Ok(Self {
            key: key.into(),
            payload,
            content_hash,
            created_at: Utc::now(),
        })
    }

    /// Deserialize the payload back to structured form
    pub fn artifact(&self) -> Result<Value> {
        serde_json::from_str(&self.payload)
            .map_err(|e| CacheError::StoreUnavailable(format!("corrupt cache payload: {e}")))
    }
}

/// Serialize an artifact with deterministic property ordering
pub fn canonical_json(artifact: &Value) -> Result<String> {
    serde_json::to_string(artifact)
        .map_err(|e| CacheError::StoreUnavailable(format!("cannot serialize artifact: {e}")))
}

/// Hex-encoded SHA-256 digest of a canonical payload
pub fn content_hash(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}
