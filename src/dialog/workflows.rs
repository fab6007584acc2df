//! Composed workflows
//!
//! Store mutations gated on a dialog answer. Each workflow suspends at most
//! once per dialog, and never holds a store borrow across that suspension.

use std::cell::RefCell;

use crate::db::KeyValueStore;
use crate::store::{CredentialEntry, CredentialStore, StoreError, ValidationFailure};

use super::controller::DialogController;
use super::request::{DialogRequest, DialogResult};
use super::WorkflowError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The store was mutated
    Completed,
    /// The user backed out; nothing changed
    Cancelled,
    /// Input failed validation; the user was notified
    Rejected(ValidationFailure),
}

/// Show a plain message and wait for it to be acknowledged.
pub async fn notify(dialog: &DialogController, message: impl Into<String>) -> Result<(), WorkflowError> {
    dialog.open(DialogRequest::info(message))?.await?;
    Ok(())
}

/// Ask before deleting the entry at `index`.
pub async fn confirm_delete<S: KeyValueStore>(
    dialog: &DialogController,
    store: &RefCell<CredentialStore<S>>,
    index: usize,
) -> Result<WorkflowOutcome, WorkflowError> {
    let website = store.borrow().entry_at(index).website.clone();
    let request = DialogRequest::confirm(format!("Delete the entry for {}?", website));

    let answer = dialog.open(request)?.await?;
    if !answer.is_confirmed() {
        return Ok(WorkflowOutcome::Cancelled);
    }

    store.borrow_mut().delete_at(index)?;
    Ok(WorkflowOutcome::Completed)
}

/// Prompt for a new password for the entry at `index`, seeded with the
/// current one. Empty submissions are re-prompted by the controller.
pub async fn edit_password<S: KeyValueStore>(
    dialog: &DialogController,
    store: &RefCell<CredentialStore<S>>,
    index: usize,
) -> Result<WorkflowOutcome, WorkflowError> {
    let request = {
        let store = store.borrow();
        let entry = store.entry_at(index);
        DialogRequest::edit(format!("New password for {}", entry.website), entry.password.clone())
    };

    let DialogResult::Submitted(password) = dialog.open(request)?.await? else {
        return Ok(WorkflowOutcome::Cancelled);
    };

    store.borrow_mut().update_password_at(index, &password)?;
    Ok(WorkflowOutcome::Completed)
}

/// Append `entry`, or tell the user which required field is missing.
pub async fn add_entry<S: KeyValueStore>(
    dialog: &DialogController,
    store: &RefCell<CredentialStore<S>>,
    entry: CredentialEntry,
) -> Result<WorkflowOutcome, WorkflowError> {
    let added = store.borrow_mut().add(entry);

    match added {
        Ok(()) => Ok(WorkflowOutcome::Completed),
        Err(StoreError::Validation(failure)) => {
            notify(dialog, failure.to_string()).await?;
            Ok(WorkflowOutcome::Rejected(failure))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::dialog::{DialogError, DialogMode, DialogState, EMPTY_VALUE_MESSAGE};

    fn store_with(entries: &[CredentialEntry]) -> RefCell<CredentialStore<MemoryStore>> {
        let mut store = CredentialStore::open(MemoryStore::new());
        store.save(entries.to_vec()).unwrap();
        RefCell::new(store)
    }

    fn entry(website: &str, username: &str, password: &str) -> CredentialEntry {
        CredentialEntry::new(website, username, password)
    }

    /// Wait until a dialog is on screen, the way a user would.
    async fn when_showing(dialog: &DialogController) {
        while !dialog.is_showing() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_confirm_delete_cancelled_leaves_store() {
        let dialog = DialogController::new();
        let store = store_with(&[entry("a.com", "u", "p1"), entry("b.com", "v", "p2")]);

        let (outcome, ()) = tokio::join!(confirm_delete(&dialog, &store, 0), async {
            when_showing(&dialog).await;
            assert_eq!(dialog.request().unwrap().mode, DialogMode::Confirm);
            dialog.cancel().unwrap();
        });

        assert_eq!(outcome.unwrap(), WorkflowOutcome::Cancelled);
        assert_eq!(store.borrow().len(), 2);
        assert!(dialog.is_idle());
    }

    #[tokio::test]
    async fn test_confirm_delete_confirmed() {
        let dialog = DialogController::new();
        let store = store_with(&[entry("a.com", "u", "p1"), entry("b.com", "v", "p2")]);

        let (outcome, ()) = tokio::join!(confirm_delete(&dialog, &store, 0), async {
            when_showing(&dialog).await;
            assert!(dialog.request().unwrap().message.contains("a.com"));
            dialog.confirm().unwrap();
        });

        assert_eq!(outcome.unwrap(), WorkflowOutcome::Completed);
        assert_eq!(store.borrow_mut().load(), &[entry("b.com", "v", "p2")]);
    }

    #[tokio::test]
    async fn test_edit_self_loop_then_submit() {
        let dialog = DialogController::new();
        let store = store_with(&[entry("a.com", "u", "old")]);

        let (outcome, ()) = tokio::join!(edit_password(&dialog, &store, 0), async {
            when_showing(&dialog).await;
            assert_eq!(dialog.request().unwrap().seed_value.as_deref(), Some("old"));

            dialog.submit("").unwrap();
            tokio::task::yield_now().await;
            assert!(matches!(dialog.state(), DialogState::Showing(ref r) if r.message == EMPTY_VALUE_MESSAGE));
            assert_eq!(store.borrow().entry_at(0).password, "old");

            dialog.submit("new").unwrap();
        });

        assert_eq!(outcome.unwrap(), WorkflowOutcome::Completed);
        assert!(dialog.is_idle());
        assert_eq!(store.borrow_mut().load(), &[entry("a.com", "u", "new")]);
    }

    #[tokio::test]
    async fn test_edit_cancelled() {
        let dialog = DialogController::new();
        let store = store_with(&[entry("a.com", "u", "old")]);

        let (outcome, ()) = tokio::join!(edit_password(&dialog, &store, 0), async {
            when_showing(&dialog).await;
            dialog.cancel().unwrap();
        });

        assert_eq!(outcome.unwrap(), WorkflowOutcome::Cancelled);
        assert_eq!(store.borrow().entry_at(0).password, "old");
    }

    #[tokio::test]
    async fn test_second_workflow_while_busy() {
        let dialog = DialogController::new();
        let store = store_with(&[entry("a.com", "u", "p1"), entry("b.com", "v", "p2")]);
        let _open = dialog.open(DialogRequest::info("copied to clipboard")).unwrap();

        let result = confirm_delete(&dialog, &store, 1).await;

        assert!(matches!(result, Err(WorkflowError::Dialog(DialogError::DialogBusy))));
        assert_eq!(store.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_add_entry_valid() {
        let dialog = DialogController::new();
        let store = store_with(&[]);

        let outcome = add_entry(&dialog, &store, entry("a.com", "u", "p")).await.unwrap();

        assert_eq!(outcome, WorkflowOutcome::Completed);
        assert!(dialog.is_idle());
        assert_eq!(store.borrow_mut().load(), &[entry("a.com", "u", "p")]);
    }

    #[tokio::test]
    async fn test_add_entry_invalid_notifies() {
        let dialog = DialogController::new();
        let store = store_with(&[]);

        let (outcome, ()) = tokio::join!(add_entry(&dialog, &store, entry("a.com", "u", "")), async {
            when_showing(&dialog).await;
            let request = dialog.request().unwrap();
            assert_eq!(request.mode, DialogMode::Info);
            assert!(!request.has_cancel);
            dialog.confirm().unwrap();
        });

        assert_eq!(
            outcome.unwrap(),
            WorkflowOutcome::Rejected(ValidationFailure::MissingPassword)
        );
        assert!(store.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_notify_waits_for_acknowledgement() {
        let dialog = DialogController::new();

        let (result, ()) = tokio::join!(notify(&dialog, "copied to clipboard"), async {
            when_showing(&dialog).await;
            assert_eq!(dialog.cancel(), Err(DialogError::CancelUnavailable));
            dialog.confirm().unwrap();
        });

        assert!(result.is_ok());
    }
}
