//! Database Module
//!
//! Opaque key-value byte store backing the credential book. SQLite on disk,
//! a `HashMap` in tests.

pub mod connection;
pub mod kv;
pub mod schema;

use thiserror::Error;

/// Database errors
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

pub type DbResult<T> = Result<T, DbError>;

// Re-exports
pub use connection::{Database, DatabaseConfig};
pub use kv::{KeyValueStore, MemoryStore};
