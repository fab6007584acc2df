//! Keymap
//!
//! Key bindings for each context that can own the keyboard: the list, a
//! text line, the entry form, and the three dialog kinds.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::generator::CharClass;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // List navigation
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,

    // Entries
    New,
    Edit,
    Delete,
    CopyPassword,
    CopyUsername,
    TogglePasswordVisibility,
    GeneratePassword,
    Reload,

    // Screens
    EnterCommand,
    ExecuteCommand(String),
    ShowHelp,
    Back,
    Clear,
    Quit,

    // Dialog answers
    Confirm,
    Cancel,
    Submit,

    // Entry form
    NextField,
    PrevField,
    ToggleClass(CharClass),
    AdjustLength(i64),

    // Line editing
    InsertChar(char),
    DeleteChar,
    DeleteCharForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearLine,

    Invalid(String),
    None,
}

/// Second key of a two-key sequence started by `first`.
fn sequence(first: char, second: char) -> Option<Action> {
    match (first, second) {
        ('g', 'g') => Some(Action::MoveToTop),
        ('d', 'd') => Some(Action::Delete),
        // `yy` and `yc` both yank; `c` starts the same sequence as `y`
        ('y', 'y' | 'c') => Some(Action::CopyPassword),
        _ => None,
    }
}

/// Keys that start a sequence, and the prefix they leave pending.
fn sequence_prefix(c: char) -> Option<char> {
    match c {
        'g' | 'd' | 'y' => Some(c),
        'c' => Some('y'),
        _ => None,
    }
}

/// Map a key in the list view. `pending` is the first key of a sequence in
/// progress; the returned prefix replaces it. A second key that does not
/// complete the sequence is treated as a fresh key.
pub fn normal_mode_action(key: KeyEvent, pending: Option<char>) -> (Action, Option<char>) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        let action = match key.code {
            KeyCode::Char('d') => Action::HalfPageDown,
            KeyCode::Char('u') => Action::HalfPageUp,
            KeyCode::Char('l') => Action::Clear,
            KeyCode::Char('r') => Action::Reload,
            _ => Action::None,
        };
        return (action, None);
    }

    if let KeyCode::Char(c) = key.code {
        if let Some(action) = pending.and_then(|first| sequence(first, c)) {
            return (action, None);
        }
        if let Some(prefix) = sequence_prefix(c) {
            return (Action::None, Some(prefix));
        }
    }

    let action = match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('G') | KeyCode::End => Action::MoveToBottom,
        KeyCode::Home => Action::MoveToTop,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('n') => Action::New,
        KeyCode::Char('e') | KeyCode::Enter => Action::Edit,
        KeyCode::Char('x') | KeyCode::Delete => Action::Delete,
        KeyCode::Char('u') => Action::CopyUsername,
        KeyCode::Char('s') => Action::TogglePasswordVisibility,
        KeyCode::Char(':') => Action::EnterCommand,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => Action::Clear,
        _ => Action::None,
    };
    (action, None)
}

/// Map a key on a single text line (command line, edit dialog).
pub fn text_input_action(key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Action::Cancel,
        KeyCode::Enter => Action::Submit,
        KeyCode::Backspace => Action::DeleteChar,
        KeyCode::Delete => Action::DeleteCharForward,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        KeyCode::Char('a') if ctrl => Action::CursorHome,
        KeyCode::Char('e') if ctrl => Action::CursorEnd,
        KeyCode::Char('u') if ctrl => Action::ClearLine,
        KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => Action::None,
        KeyCode::Char(c) => Action::InsertChar(c),
        _ => Action::None,
    }
}

/// Map a key in the entry form.
///
/// Alt-1..4 toggle the lower/upper/digit/symbol classes, Ctrl-Left/Right
/// shorten or lengthen the generated password. Anything else edits the
/// active field.
pub fn form_action(key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Tab | KeyCode::Down => Action::NextField,
        KeyCode::BackTab | KeyCode::Up => Action::PrevField,
        KeyCode::Char('g') if ctrl => Action::GeneratePassword,
        KeyCode::Char('s') if ctrl => Action::TogglePasswordVisibility,
        KeyCode::Left if ctrl => Action::AdjustLength(-1),
        KeyCode::Right if ctrl => Action::AdjustLength(1),
        KeyCode::Char(c @ '1'..='4') if alt => {
            let index = c as usize - '1' as usize;
            Action::ToggleClass(CharClass::ALL[index])
        }
        _ => text_input_action(key),
    }
}

/// Map a key while a yes/no dialog is open.
pub fn confirm_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

/// Map a key while a message is shown. Every dismissal key acknowledges;
/// a notice has nothing to cancel.
pub fn notice_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ' | 'q') => Action::Confirm,
        _ => Action::None,
    }
}

/// Map a key on the help screen.
pub fn help_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q' | '?') => Action::Back,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        _ => Action::None,
    }
}

/// Resolve a `:` command line. Only the first word counts.
pub fn parse_command(cmd: &str) -> Action {
    let Some(name) = cmd.split_whitespace().next() else {
        return Action::None;
    };

    match name {
        "q" | "quit" | "wq" => Action::Quit,
        // Every mutation is already persisted
        "w" | "write" => Action::None,
        "n" | "new" | "add" => Action::New,
        "e" | "edit" => Action::Edit,
        "del" | "delete" => Action::Delete,
        "gen" | "generate" => Action::GeneratePassword,
        "reload" | "refresh" => Action::Reload,
        "cls" | "clear" => Action::Clear,
        "h" | "help" => Action::ShowHelp,
        other => Action::Invalid(other.to_string()),
    }
}
