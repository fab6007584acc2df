//! UI Components
//!
//! Reusable TUI widgets for the credential list, entry form, and dialogs.

pub mod form;
pub mod help;
pub mod list;
pub mod popup;
pub mod statusline;

// Re-exports
pub use form::{EntryForm, EntryFormWidget};
pub use help::{HelpScreen, HelpState};
pub use list::{CredentialList, EmptyState, ListViewState};
pub use popup::{ConfirmDialog, EditDialog, MessagePopup};
pub use statusline::{HelpBar, MessageType, StatusLine};
