//! Credential Store
//!
//! Owns the in-memory sequence and keeps it consistent with the persisted
//! blob. Every mutation serializes and writes the full sequence before the
//! in-memory copy is replaced, so a failed write leaves both sides as they
//! were.
//!
//! Entries are addressed by index only. An index is valid until the next
//! insertion or deletion; callers re-derive indices from a fresh render.

use crate::db::KeyValueStore;

use super::credential::{validate_password, CredentialEntry};
use super::{StoreResult, STORE_KEY};

pub struct CredentialStore<S> {
    backend: S,
    entries: Vec<CredentialEntry>,
}

impl<S: KeyValueStore> CredentialStore<S> {
    /// Wrap a byte store and load whatever it currently holds.
    pub fn open(backend: S) -> Self {
        let mut store = Self {
            backend,
            entries: Vec::new(),
        };
        store.load();
        store
    }

    /// Re-read the persisted blob. Missing, unreadable, or malformed data
    /// loads as an empty sequence.
    pub fn load(&mut self) -> &[CredentialEntry] {
        self.entries = read_entries(&self.backend);
        &self.entries
    }

    /// Persist `entries` as the full sequence, replacing any prior value.
    pub fn save(&mut self, entries: Vec<CredentialEntry>) -> StoreResult<()> {
        self.commit(entries)
    }

    pub fn add(&mut self, entry: CredentialEntry) -> StoreResult<()> {
        entry.validate()?;

        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next)?;

        tracing::info!(count = self.entries.len(), "credential added");
        Ok(())
    }

    /// Replace the password of the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[track_caller]
    pub fn update_password_at(&mut self, index: usize, new_password: &str) -> StoreResult<()> {
        self.check_index(index);
        validate_password(new_password)?;

        let mut next = self.entries.clone();
        next[index].password = new_password.to_string();
        self.commit(next)?;

        tracing::info!(index, "credential password updated");
        Ok(())
    }

    /// Remove the entry at `index`, shifting later entries down by one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[track_caller]
    pub fn delete_at(&mut self, index: usize) -> StoreResult<()> {
        self.check_index(index);

        let mut next = self.entries.clone();
        next.remove(index);
        self.commit(next)?;

        tracing::info!(index, remaining = self.entries.len(), "credential deleted");
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[track_caller]
    pub fn entry_at(&self, index: usize) -> &CredentialEntry {
        self.check_index(index);
        &self.entries[index]
    }

    pub fn entries(&self) -> &[CredentialEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    #[track_caller]
    fn check_index(&self, index: usize) {
        assert!(
            index < self.entries.len(),
            "credential index {} out of range ({} entries)",
            index,
            self.entries.len()
        );
    }

    fn commit(&mut self, entries: Vec<CredentialEntry>) -> StoreResult<()> {
        let blob = serde_json::to_vec(&entries)?;
        self.backend.set(STORE_KEY, &blob)?;
        self.entries = entries;
        tracing::debug!(count = self.entries.len(), bytes = blob.len(), "store persisted");
        Ok(())
    }
}

fn read_entries<S: KeyValueStore>(backend: &S) -> Vec<CredentialEntry> {
    let blob = match backend.get(STORE_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read store, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_slice::<Vec<CredentialEntry>>(&blob) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, bytes = blob.len(), "discarding unreadable store contents");
            Vec::new()
        }
    }
}
