//! SQLite-backed key-value medium.
//!
//! # Invariants
//! - Requires a connection returned by `db::open_db*` (migrations applied).
//! - `set` is a single upsert statement, atomic per key.

use super::{KeyValueStore, Namespace, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// `KeyValueStore` over the `kv_entries` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, namespace: Namespace, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE namespace = ?1 AND entry_key = ?2;",
                params![namespace.as_str(), key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, namespace: Namespace, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (namespace, entry_key, value)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (namespace, entry_key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![namespace.as_str(), key, value],
        )?;
        Ok(())
    }

    fn delete(&self, namespace: Namespace, key: &str) -> StorageResult<()> {
        self.conn.execute(
            "DELETE FROM kv_entries WHERE namespace = ?1 AND entry_key = ?2;",
            params![namespace.as_str(), key],
        )?;
        Ok(())
    }
}
