//! Store Module
//!
//! The credential book: an ordered, index-addressed sequence of entries
//! persisted as one JSON blob.

pub mod credential;
pub mod manager;

use thiserror::Error;

/// Key the whole sequence is persisted under
pub const STORE_KEY: &str = "passwords";

/// A required field was left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Website is required")]
    MissingWebsite,

    #[error("Password is required")]
    MissingPassword,
}

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::db::DbError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// The validation failure, if this error is one.
    pub fn validation(&self) -> Option<ValidationFailure> {
        match self {
            Self::Validation(v) => Some(*v),
            _ => None,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// Re-exports
pub use credential::CredentialEntry;
pub use manager::CredentialStore;
