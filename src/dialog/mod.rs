//! Dialog Module
//!
//! Single-flight modal dialogs. Messages, confirmations and value prompts
//! all go through one controller whose `open` suspends the caller until
//! the user acts.

pub mod controller;
pub mod request;
pub mod workflows;

use thiserror::Error;

use crate::store::StoreError;

/// Dialog errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    #[error("Another dialog is already open")]
    DialogBusy,

    #[error("No dialog is open")]
    NotShowing,

    #[error("This dialog cannot be cancelled")]
    CancelUnavailable,

    #[error("Control not available in {0} dialogs")]
    ModeMismatch(request::DialogMode),

    #[error("Dialog closed without an answer")]
    Abandoned,
}

/// Errors from composed dialog + store workflows
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Dialog(#[from] DialogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// Re-exports
pub use controller::{DialogController, DialogState, PendingDialog, Transition};
pub use request::{DialogMode, DialogRequest, DialogResult, EMPTY_VALUE_MESSAGE};
pub use workflows::{add_entry, confirm_delete, edit_password, notify, WorkflowOutcome};
