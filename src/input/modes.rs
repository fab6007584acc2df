//! Input Modes
//!
//! Which part of the screen owns the keyboard. Three of the modes exist
//! only while a dialog is open and mirror its `DialogMode`.

use crate::dialog::DialogMode;

use super::line::LineBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// List navigation
    Normal,
    /// Typing into an edit dialog
    Insert,
    /// Command line (:)
    Command,
    /// Yes/no dialog
    Confirm,
    /// Message dialog
    Notice,
    Help,
}

impl InputMode {
    /// Badge shown in the status line
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Command => "COMMAND",
            Self::Confirm => "CONFIRM",
            Self::Notice => "NOTICE",
            Self::Help => "HELP",
        }
    }

    pub fn is_dialog(&self) -> bool {
        matches!(self, Self::Insert | Self::Confirm | Self::Notice)
    }

    pub fn for_dialog(mode: DialogMode) -> Self {
        match mode {
            DialogMode::Info => Self::Notice,
            DialogMode::Confirm => Self::Confirm,
            DialogMode::Edit => Self::Insert,
        }
    }
}

/// Current mode plus the text typed in it.
///
/// Every mode change starts from an empty line and drops any half-typed
/// key sequence (`g`, `d`, `y`).
#[derive(Debug, Clone)]
pub struct ModeState {
    pub mode: InputMode,
    pub line: LineBuffer,
    pub pending: Option<char>,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            mode: InputMode::Normal,
            line: LineBuffer::new(),
            pending: None,
        }
    }
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.line.clear();
        self.pending = None;
    }

    pub fn to_normal(&mut self) {
        self.set_mode(InputMode::Normal);
    }

    pub fn to_command(&mut self) {
        self.set_mode(InputMode::Command);
    }

    pub fn to_help(&mut self) {
        self.set_mode(InputMode::Help);
    }

    /// Enter the mode matching an open dialog. Edit dialogs start with
    /// their seed value and the cursor at its end.
    pub fn to_dialog(&mut self, mode: DialogMode, seed: Option<&str>) {
        self.set_mode(InputMode::for_dialog(mode));
        if let Some(seed) = seed {
            self.line.set(seed);
        }
    }
}
