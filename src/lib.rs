//! Passbook Library
//!
//! The credential book behind the TUI: the byte store, the credential
//! sequence on top of it, the password generator, and the dialog controller
//! that gates store changes on a user's answer.

pub mod db;
pub mod dialog;
pub mod generator;
pub mod store;

// Re-export commonly used types
pub use db::{Database, DatabaseConfig, KeyValueStore, MemoryStore};
pub use dialog::{DialogController, DialogRequest, DialogResult};
pub use generator::{CharClasses, GeneratorOptions};
pub use store::{CredentialEntry, CredentialStore, StoreError, ValidationFailure};
