//! Database Connection Management
//!
//! Handles the SQLite connection and exposes it as a key-value byte store.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, OptionalExtension, params};

use super::kv::KeyValueStore;
use super::{schema::init_schema, DbResult};

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file
    pub path: PathBuf,
    /// Enable WAL mode
    pub wal_mode: bool,
}

impl DatabaseConfig {
    /// Create config for a specific path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            wal_mode: true,
        }
    }
}

/// Database wrapper with connection management
pub struct Database {
    conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Open or create a database with the given config
    pub fn open(config: DatabaseConfig) -> DbResult<Self> {
        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&config.path, flags)?;

        if config.wal_mode {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }

        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        init_schema(&conn)?;

        tracing::debug!(path = %config.path.display(), "opened store database");
        Ok(Self { conn, config })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> DbResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_db() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(DatabaseConfig::with_path(dir.path().join("book.db"))).unwrap();
        (dir, db)
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("book.db");

        let db = Database::open(DatabaseConfig::with_path(&path)).unwrap();
        assert_eq!(db.path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn test_missing_key_is_none() {
        let (_dir, db) = temp_db();
        assert_eq!(db.get("passwords").unwrap(), None);
    }

    #[test]
    fn test_set_replaces_value() {
        let (_dir, mut db) = temp_db();
        db.set("passwords", b"[]").unwrap();
        db.set("passwords", b"[1]").unwrap();

        assert_eq!(db.get("passwords").unwrap(), Some(b"[1]".to_vec()));
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("book.db");

        {
            let mut db = Database::open(DatabaseConfig::with_path(&path)).unwrap();
            db.set("passwords", b"hello").unwrap();
        }

        let db = Database::open(DatabaseConfig::with_path(&path)).unwrap();
        assert_eq!(db.get("passwords").unwrap(), Some(b"hello".to_vec()));
    }
}
