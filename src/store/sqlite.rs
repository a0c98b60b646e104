//! SQLite-backed variant store
//!
//! One table holds every retained variant. The `(key, content_hash)`
//! uniqueness constraint is what makes a duplicate insert a no-op, and the
//! `(key, created_at)` index is what the retention trim orders by.

use crate::error::{CacheError, Result};
use crate::store::entry::CacheEntry;
use crate::store::VariantStore;
use rusqlite::{params, Connection};
use serde_json::Value;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Persistent variant store backed by an embedded SQLite database.
///
/// The single connection sits behind a mutex, so every `put` runs its
/// insert-then-trim transaction without interleaving with other writers, and
/// reads never see a partially applied write.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    limit: usize,
}

impl SqliteStore {
    /// Open (or create) the database at `path`, retaining at most `limit`
    /// variants per key
    pub fn open(path: impl AsRef<Path>, limit: usize) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn, limit)
    }

    /// Open a throwaway in-memory database, mainly for tests
    pub fn open_in_memory(limit: usize) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, limit)
    }

    fn with_connection(conn: Connection, limit: usize) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS variants (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                key TEXT NOT NULL,
                payload TEXT NOT NULL,
                content_hash TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(key, content_hash)
            );
            CREATE INDEX IF NOT EXISTS idx_variants_key_created
                ON variants (key, created_at);",
        )?;

        info!(limit, "variant store ready");
        Ok(Self {
            conn: Mutex::new(conn),
            limit,
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CacheError::StoreUnavailable("store lock poisoned".to_string()))
    }

    /// Number of variants currently retained for `key`
    pub fn len(&self, key: &str) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM variants WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

impl VariantStore for SqliteStore {
    fn put(&self, key: &str, artifact: &Value) -> Result<()> {
        let entry = CacheEntry::new(key, artifact)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        // INSERT OR IGNORE makes the duplicate-hash case a silent success.
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO variants (key, payload, content_hash)
             VALUES (?1, ?2, ?3)",
            params![key, entry.payload, entry.content_hash],
        )?;

        if inserted == 0 {
            debug!(key, hash = %entry.content_hash, "duplicate variant, skipping insert");
        } else {
            debug!(key, hash = %entry.content_hash, "retaining new variant");
        }

        // Keep the L most recent entries; created_at ties resolve by
        // insertion id so the order is total.
        let evicted = tx.execute(
            "DELETE FROM variants
             WHERE key = ?1
               AND id NOT IN (
                   SELECT id FROM variants
                   WHERE key = ?1
                   ORDER BY created_at DESC, id DESC
                   LIMIT ?2
               )",
            params![key, self.limit as i64],
        )?;

        if evicted > 0 {
            debug!(key, evicted, "evicted oldest variants");
        }

        tx.commit()?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<Value>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT payload FROM variants
             WHERE key = ?1
             ORDER BY created_at ASC, id ASC",
        )?;

        let payloads = stmt.query_map(params![key], |row| row.get::<_, String>(0))?;

        let mut variants = Vec::new();
        for payload in payloads {
            let payload = payload?;
            let artifact = serde_json::from_str(&payload).map_err(|e| {
                CacheError::StoreUnavailable(format!("corrupt cache payload: {e}"))
            })?;
            variants.push(artifact);
        }

        Ok(variants)
    }
}
