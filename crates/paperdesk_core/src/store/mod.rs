//! Persistent collection store.
//!
//! # Responsibility
//! - Persist whole ordered collections of records under a collection name.
//! - Keep backend details (SQLite, in-memory) behind one slot-level trait.
//!
//! # Invariants
//! - `save` rewrites the whole collection in a single write.
//! - `load` never fails: absence, read errors and undecodable payloads all
//!   degrade to an empty collection plus a logged diagnostic.
//! - The store never inspects record shape beyond JSON (de)serialization.

use crate::db::DbError;
use crate::logging::sanitize_message;
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

mod memory;
mod sqlite;

pub use memory::MemoryCollectionStore;
pub use sqlite::SqliteCollectionStore;

const MAX_LOGGED_ERROR_CHARS: usize = 200;

pub type StoreResult<T> = Result<T, StorageError>;

/// Durable write (or read) did not happen.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serialize(serde_json::Error),
    QuotaExceeded {
        collection: String,
        limit_bytes: usize,
        requested_bytes: usize,
    },
    /// Backend cannot serve requests (e.g. unmigrated connection).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize collection: {err}"),
            Self::QuotaExceeded {
                collection,
                limit_bytes,
                requested_bytes,
            } => write!(
                f,
                "storage quota exceeded for `{collection}`: {requested_bytes} bytes requested, limit {limit_bytes}"
            ),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::QuotaExceeded { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value slot storage for serialized collections.
///
/// Backends implement the three slot methods; typed `load`/`save` are
/// provided on top of them.
pub trait CollectionStore {
    /// Returns the raw payload stored under `name`, if any.
    fn read_slot(&self, name: &str) -> StoreResult<Option<String>>;

    /// Replaces the payload stored under `name`.
    fn write_slot(&self, name: &str, payload: &str) -> StoreResult<()>;

    /// Drops the slot. Returns `false` when nothing was stored under `name`.
    fn remove_slot(&self, name: &str) -> StoreResult<bool>;

    /// Loads an ordered collection, degrading to empty on any failure.
    fn load<T: DeserializeOwned>(&self, name: &str) -> Vec<T>
    where
        Self: Sized,
    {
        let payload = match self.read_slot(name) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!("event=collection_load module=store status=absent collection={name}");
                return Vec::new();
            }
            Err(err) => {
                error!(
                    "event=collection_load module=store status=error collection={} error_code=read_failed error={}",
                    name,
                    sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS)
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&payload) {
            Ok(records) => {
                info!(
                    "event=collection_load module=store status=ok collection={} count={}",
                    name,
                    records.len()
                );
                records
            }
            Err(err) => {
                warn!(
                    "event=collection_load module=store status=degraded collection={} error_code=decode_failed bytes={} error={}",
                    name,
                    payload.len(),
                    sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS)
                );
                Vec::new()
            }
        }
    }

    /// Serializes and writes the whole collection.
    fn save<T: Serialize>(&self, name: &str, records: &[T]) -> StoreResult<()>
    where
        Self: Sized,
    {
        let payload = serde_json::to_string(records).map_err(StorageError::Serialize)?;
        match self.write_slot(name, &payload) {
            Ok(()) => {
                info!(
                    "event=collection_save module=store status=ok collection={} count={} bytes={}",
                    name,
                    records.len(),
                    payload.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=collection_save module=store status=error collection={} count={} error={}",
                    name,
                    records.len(),
                    sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS)
                );
                Err(err)
            }
        }
    }
}

impl<S: CollectionStore + ?Sized> CollectionStore for &S {
    fn read_slot(&self, name: &str) -> StoreResult<Option<String>> {
        (**self).read_slot(name)
    }

    fn write_slot(&self, name: &str, payload: &str) -> StoreResult<()> {
        (**self).write_slot(name, payload)
    }

    fn remove_slot(&self, name: &str) -> StoreResult<bool> {
        (**self).remove_slot(name)
    }
}

impl<S: CollectionStore + ?Sized> CollectionStore for Rc<S> {
    fn read_slot(&self, name: &str) -> StoreResult<Option<String>> {
        (**self).read_slot(name)
    }

    fn write_slot(&self, name: &str, payload: &str) -> StoreResult<()> {
        (**self).write_slot(name, payload)
    }

    fn remove_slot(&self, name: &str) -> StoreResult<bool> {
        (**self).remove_slot(name)
    }
}
