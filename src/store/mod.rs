//! Keyed storage of validated artifacts with content-hash deduplication
//!
//! Only previously-validated artifacts are ever written here, which is why
//! cache reads skip re-validation. Two implementations share one contract:
//! [`SqliteStore`] for persistence and [`MemoryStore`] for ephemeral use.

pub mod entry;
pub mod memory;
pub mod sqlite;

use crate::error::Result;
use serde_json::Value;

pub use entry::{canonical_json, content_hash, CacheEntry};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Repository contract for retained artifact variants.
///
/// Implementations must uphold two invariants:
/// - for a fixed key, no two retained entries share a content hash; inserting
///   already-present content is a silent no-op;
/// - at most the configured number of variants is retained per key, evicting
///   oldest-first (insertion order breaks ties) once the limit is exceeded.
///
/// A `put` is atomic with respect to concurrent `put`s on the same key:
/// duplicate check, insert, and eviction never interleave. Entries are
/// immutable once written; there is no delete or update outside eviction.
pub trait VariantStore: Send + Sync {
    /// Insert a validated artifact under `key`, then enforce retention
    fn put(&self, key: &str, artifact: &Value) -> Result<()>;

    /// All retained variants for `key`, oldest first. Unknown keys yield an
    /// empty collection, never an error.
    fn get(&self, key: &str) -> Result<Vec<Value>>;
}

impl<S: VariantStore + ?Sized> VariantStore for std::sync::Arc<S> {
    fn put(&self, key: &str, artifact: &Value) -> Result<()> {
        (**self).put(key, artifact)
    }

    fn get(&self, key: &str) -> Result<Vec<Value>> {
        (**self).get(key)
    }
}
