use rusqlite::{Connection, OptionalExtension};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the key/value store.
///
/// Callers treat persistence as best-effort: errors are logged and the
/// operation continues, they are never surfaced to the user.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The Store manages the small SQLite settings database.
///
/// It is a flat key/value table holding the two preference emails and the
/// JSON-serialized partial-clear toggle map. Values survive across sessions
/// with no versioning or migration.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store, creating the database file if needed.
    ///
    /// The database file lives in the user's data directory:
    /// - Linux: ~/.local/share/lead-capture/lead_capture.db
    /// - macOS: ~/Library/Application Support/lead-capture/lead_capture.db
    /// - Windows: %APPDATA%\lead-capture\lead_capture.db
    pub fn open() -> Result<Self, StoreError> {
        let db_path = Self::db_path();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .expect("Failed to create application data directory");
        }

        let conn = Connection::open(&db_path)?;
        println!("📁 Settings store at: {}", db_path.display());

        let store = Store { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory store. Used by tests.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Store { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Where the settings database lives on disk.
    fn db_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user data directory");

        path.push("lead-capture");
        path.push("lead_capture.db");
        path
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Read the value stored under `key`, or `None` if the key was never set.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Write `value` under `key`, replacing any previous value.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.get("never-set").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let store = Store::open_in_memory().unwrap();
        store.set("salesEmail", "a@example.com").unwrap();
        assert_eq!(
            store.get("salesEmail").unwrap(),
            Some("a@example.com".to_string())
        );
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let store = Store::open_in_memory().unwrap();
        store.set("key", "first").unwrap();
        store.set("key", "second").unwrap();
        assert_eq!(store.get("key").unwrap(), Some("second".to_string()));
    }
}
