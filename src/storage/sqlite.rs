//! SQLite storage backend.
//!
//! A single `storage` table maps keys to JSON payloads. Migrations follow
//! the versioned `schema_version` pattern and are safe to run on every open.

use std::path::Path;

use rusqlite::{params, Connection};

use super::StorageBackend;
use crate::types::errors::StorageError;

/// Current schema version. Bump this when adding a new migration.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key→JSON store backed by a SQLite database.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens (or creates) the database at `path` and runs migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        let backend = Self { conn };
        backend.run_migrations()?;
        Ok(backend)
    }

    /// Opens an in-memory database, discarded on drop. Useful for testing.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let backend = Self { conn };
        backend.run_migrations()?;
        Ok(backend)
    }

    fn run_migrations(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             CREATE TABLE IF NOT EXISTS schema_version (
                 version INTEGER PRIMARY KEY,
                 applied_at INTEGER NOT NULL,
                 description TEXT NOT NULL
             );",
        )?;

        let current: i32 = self
            .conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        if current < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS storage (
                     key TEXT PRIMARY KEY,
                     value TEXT NOT NULL,
                     updated_at INTEGER NOT NULL
                 );",
            )?;
            self.record_version(1, "Initial schema: key-value storage table")?;
        }

        Ok(())
    }

    fn record_version(&self, version: i32, description: &str) -> Result<(), rusqlite::Error> {
        let now = chrono::Utc::now().timestamp();
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
            params![version, now, description],
        )?;
        Ok(())
    }
}

impl StorageBackend for SqliteBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .ok()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = chrono::Utc::now().timestamp_millis();
        self.conn
            .execute(
                "INSERT OR REPLACE INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![key, value, now],
            )
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM storage WHERE key = ?1", params![key])
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }
}
