//! Dialog requests and results.

use std::fmt;

/// Message shown when an edit prompt is submitted empty
pub const EMPTY_VALUE_MESSAGE: &str = "value cannot be empty";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    /// Plain message, acknowledged with OK
    Info,
    /// Yes/no question
    Confirm,
    /// Prompt for a replacement value
    Edit,
}

impl fmt::Display for DialogMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Info => "info",
            Self::Confirm => "confirm",
            Self::Edit => "edit",
        };
        f.write_str(name)
    }
}

/// One user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub message: String,
    pub mode: DialogMode,
    /// Initial input value; only set for `Edit`
    pub seed_value: Option<String>,
    pub has_cancel: bool,
}

impl DialogRequest {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mode: DialogMode::Info,
            seed_value: None,
            has_cancel: false,
        }
    }

    pub fn confirm(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mode: DialogMode::Confirm,
            seed_value: None,
            has_cancel: true,
        }
    }

    pub fn edit(message: impl Into<String>, seed_value: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mode: DialogMode::Edit,
            seed_value: Some(seed_value.into()),
            has_cancel: true,
        }
    }

    pub fn with_cancel(mut self, has_cancel: bool) -> Self {
        self.has_cancel = has_cancel;
        self
    }
}

/// What the user answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    /// `Info` dismissed with OK
    Acknowledged,
    /// `Confirm` answered yes
    Confirmed,
    /// `Edit` submitted with a non-empty value
    Submitted(String),
    /// Any mode dismissed with Cancel
    Cancelled,
}

impl DialogResult {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn submitted(&self) -> Option<&str> {
        match self {
            Self::Submitted(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let info = DialogRequest::info("copied to clipboard");
        assert_eq!(info.mode, DialogMode::Info);
        assert!(!info.has_cancel);
        assert_eq!(info.seed_value, None);

        let confirm = DialogRequest::confirm("Delete?");
        assert!(confirm.has_cancel);

        let edit = DialogRequest::edit("New password", "old");
        assert_eq!(edit.seed_value.as_deref(), Some("old"));
        assert!(!edit.with_cancel(false).has_cancel);
    }

    #[test]
    fn test_result_helpers() {
        assert!(DialogResult::Confirmed.is_confirmed());
        assert!(DialogResult::Cancelled.is_cancelled());
        assert_eq!(DialogResult::Submitted("x".into()).submitted(), Some("x"));
        assert_eq!(DialogResult::Acknowledged.submitted(), None);
    }
}
