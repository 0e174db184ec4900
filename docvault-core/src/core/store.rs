//! Namespaced key-value record store behind an injected interface.
//!
//! All persisted application state lives in a handful of named string
//! records. CRUD logic never touches a concrete backend: it goes through
//! [`RecordStore`], so the durable [`SqliteStore`] and the volatile
//! [`MemoryStore`] are interchangeable.

use crate::Result;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Opaque keys for the persisted records.
pub mod keys {
    /// The document collection (JSON array).
    pub const DOCUMENTS: &str = "docvault.documents";
    /// Application settings (JSON object holding the password digest).
    pub const SETTINGS: &str = "docvault.settings";
    /// Theme preference (plain string, `"dark"` or `"light"`).
    pub const THEME: &str = "docvault.theme";
    /// Generated client identity (plain string).
    pub const CLIENT_ID: &str = "docvault.clientId";
}

/// A minimal key-value persistence capability: read and write string records.
///
/// Implementations are free to be durable or not; callers must tolerate an
/// empty store on first run. No versioning or schema validation happens at
/// this layer — stored data is trusted as-is.
pub trait RecordStore {
    /// Returns the raw record stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures; a missing key is `Ok(None)`.
    fn read_raw(&self, key: &str) -> Result<Option<String>>;

    /// Persists `value` under `key`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot complete the write.
    fn write_raw(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Reads and deserializes the JSON record under `key`.
///
/// Any failure — missing key, backend error, corrupt JSON — falls back to
/// `default`. The failure is logged but never surfaced, so a damaged record
/// degrades to a fresh state instead of a broken session.
pub fn read_record<T: DeserializeOwned, S: RecordStore + ?Sized>(
    store: &S,
    key: &str,
    default: T,
) -> T {
    let raw = match store.read_raw(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(e) => {
            log::warn!("read of record '{key}' failed, using default: {e}");
            return default;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("record '{key}' holds corrupt JSON, using default: {e}");
            default
        }
    }
}

/// Serializes `value` to JSON and persists it under `key`.
///
/// # Errors
///
/// Unlike reads, write failures are surfaced: the caller decides how to
/// report a failed save.
pub fn write_record<T: Serialize + ?Sized, S: RecordStore + ?Sized>(
    store: &mut S,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.write_raw(key, &raw)
}

/// Durable record store backed by a single-table SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the store at `path` and ensures the records table exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocvaultError::Database`] for any SQLite failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )?;
        Ok(Self { conn })
    }

    /// Opens an in-process store that is discarded on drop.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocvaultError::Database`] if SQLite cannot create the database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )?;
        Ok(Self { conn })
    }
}

impl RecordStore for SqliteStore {
    fn read_raw(&self, key: &str) -> Result<Option<String>> {
        use rusqlite::OptionalExtension;
        let value = self
            .conn
            .query_row("SELECT value FROM records WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_raw(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO records (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }
}

/// Volatile record store for tests and embedding without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn read_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn write_raw(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.read_raw("missing").unwrap().is_none());

        store.write_raw("k", "v1").unwrap();
        assert_eq!(store.read_raw("k").unwrap().as_deref(), Some("v1"));

        store.write_raw("k", "v2").unwrap();
        assert_eq!(store.read_raw("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_sqlite_store_survives_reopen() {
        let temp = NamedTempFile::new().unwrap();

        {
            let mut store = SqliteStore::open(temp.path()).unwrap();
            store.write_raw(keys::THEME, "dark").unwrap();
        }

        let store = SqliteStore::open(temp.path()).unwrap();
        assert_eq!(
            store.read_raw(keys::THEME).unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn test_sqlite_store_upserts() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.write_raw("k", "first").unwrap();
        store.write_raw("k", "second").unwrap();
        assert_eq!(store.read_raw("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_read_record_returns_default_when_absent() {
        let store = MemoryStore::new();
        let value: Vec<String> = read_record(&store, keys::DOCUMENTS, vec![]);
        assert!(value.is_empty());
    }

    #[test]
    fn test_read_record_swallows_corrupt_json() {
        let mut store = MemoryStore::new();
        store.write_raw(keys::DOCUMENTS, "{not json").unwrap();

        let value: Vec<String> = read_record(&store, keys::DOCUMENTS, vec![]);
        assert!(value.is_empty());
    }

    #[test]
    fn test_write_then_read_record_round_trips() {
        let mut store = MemoryStore::new();
        let value = vec!["a".to_string(), "b".to_string()];
        write_record(&mut store, "list", &value).unwrap();

        let back: Vec<String> = read_record(&store, "list", vec![]);
        assert_eq!(back, value);
    }
}
