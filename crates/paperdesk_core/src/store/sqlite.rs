//! SQLite-backed collection store.
//!
//! # Invariants
//! - One row per collection; a save is a single upsert statement, so a
//!   concurrent reload never observes a partially written collection.
//! - Connections must be migrated (`db::open_db*`) before use.

use super::{CollectionStore, StorageError, StoreResult};
use crate::db::migrations::latest_version;
use crate::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Durable collection store over one SQLite connection.
pub struct SqliteCollectionStore {
    conn: Connection,
}

impl SqliteCollectionStore {
    /// Wraps a connection that already has migrations applied.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        if version != latest_version() {
            return Err(StorageError::Unavailable(format!(
                "connection schema version {version} does not match expected {}",
                latest_version()
            )));
        }
        Ok(Self { conn })
    }

    /// Opens (or creates) a database file and wraps it.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Returns stored collection names sorted by name.
    pub fn collection_names(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM collections ORDER BY name ASC;")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

impl CollectionStore for SqliteCollectionStore {
    fn read_slot(&self, name: &str) -> StoreResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM collections WHERE name = ?1;",
                [name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_slot(&self, name: &str, payload: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO collections (name, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![name, payload],
        )?;
        Ok(())
    }

    fn remove_slot(&self, name: &str) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM collections WHERE name = ?1;", [name])?;
        Ok(changed > 0)
    }
}
