//! Durable slot backends for the note store.
//!
//! # Responsibility
//! - Define the storage seam the store persists through.
//! - Provide the SQLite-backed durable slot plus no-op/in-memory variants.
//!
//! # Invariants
//! - All backends expose exactly one value under the fixed namespaced key.
//! - A missing value reads as `Ok(None)`, never as an error.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Fixed namespaced key of the single durable slot.
pub const STORAGE_KEY: &str = "ocean-notes:v1";

pub type StateStoreResult<T> = Result<T, StateStoreError>;

/// Backend error for slot reads and writes.
#[derive(Debug)]
pub enum StateStoreError {
    Db(DbError),
}

impl Display for StateStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StateStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StateStoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StateStoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage seam for the note store's single durable slot.
pub trait StateStore {
    /// Reads the slot value, `Ok(None)` when nothing was ever written.
    fn read(&self) -> StateStoreResult<Option<String>>;
    /// Replaces the slot value. Last write wins.
    fn write(&mut self, value: &str) -> StateStoreResult<()>;
}

/// SQLite-backed durable slot.
pub struct SqliteStateStore {
    conn: Connection,
}

impl SqliteStateStore {
    /// Wraps a migrated/ready connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) the database file backing the slot.
    pub fn open(path: impl AsRef<Path>) -> StateStoreResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens an in-memory database. State lives only as long as the value.
    pub fn in_memory() -> StateStoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }
}

impl StateStore for SqliteStateStore {
    fn read(&self) -> StateStoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM store_state WHERE key = ?1;",
                [STORAGE_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, value: &str) -> StateStoreResult<()> {
        self.conn.execute(
            "INSERT INTO store_state (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![STORAGE_KEY, value],
        )?;
        Ok(())
    }
}

/// Backend for environments with no durable medium.
///
/// Reads are always absent and writes are accepted and dropped. This is a
/// recognized operating mode, not an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStateStore;

impl StateStore for NullStateStore {
    fn read(&self) -> StateStoreResult<Option<String>> {
        Ok(None)
    }

    fn write(&mut self, _value: &str) -> StateStoreResult<()> {
        Ok(())
    }
}

/// Volatile backend holding the slot in memory. Used by tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStateStore {
    slot: Option<String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current slot value, if any.
    pub fn slot(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Pre-loads the slot, as if a previous session had written it.
    pub fn with_slot(value: impl Into<String>) -> Self {
        Self {
            slot: Some(value.into()),
        }
    }
}

impl StateStore for MemoryStateStore {
    fn read(&self) -> StateStoreResult<Option<String>> {
        Ok(self.slot.clone())
    }

    fn write(&mut self, value: &str) -> StateStoreResult<()> {
        self.slot = Some(value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStateStore, NullStateStore, SqliteStateStore, StateStore};

    #[test]
    fn sqlite_slot_reads_back_last_write() {
        let mut backend = SqliteStateStore::in_memory().unwrap();
        assert_eq!(backend.read().unwrap(), None);

        backend.write("first").unwrap();
        backend.write("second").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn null_backend_drops_writes() {
        let mut backend = NullStateStore;
        backend.write("ignored").unwrap();
        assert_eq!(backend.read().unwrap(), None);
    }

    #[test]
    fn memory_backend_round_trips() {
        let mut backend = MemoryStateStore::new();
        backend.write("payload").unwrap();
        assert_eq!(backend.slot(), Some("payload"));
        assert_eq!(backend.read().unwrap().as_deref(), Some("payload"));
    }
}
