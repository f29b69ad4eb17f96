//! SQLite-backed key-value storage.

use crate::db::error::DbError;
use crate::db::schema::{INIT_SCHEMA_VERSION, SCHEMA, SCHEMA_VERSION};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use vocab_core::{Storage, StorageError};

type Result<T> = std::result::Result<T, DbError>;

/// Key-value records in a single SQLite table.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.initialize()?;
        Ok(storage)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.initialize()?;
        Ok(storage)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;

        let found: Option<i32> = self
            .conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
        if let Some(found) = found {
            if found > SCHEMA_VERSION {
                return Err(DbError::UnsupportedSchema {
                    found,
                    supported: SCHEMA_VERSION,
                });
            }
        }

        self.conn.execute(INIT_SCHEMA_VERSION, params![SCHEMA_VERSION])?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, now],
        )?;
        Ok(())
    }

    /// When a record was last written.
    #[cfg(test)]
    fn updated_at(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }
}

impl Storage for SqliteStorage {
    fn load(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        self.get(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    fn save(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        self.put(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}
