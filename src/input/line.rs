//! Line Editing
//!
//! A single-line text buffer with a character-indexed cursor, shared by the
//! command line, the edit dialog, and the entry form fields.

use super::keymap::Action;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    /// Cursor position, in characters
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing action. Returns false for actions that are not edits.
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::InsertChar(c) => {
                let at = self.byte_index(self.cursor);
                self.text.insert(at, *c);
                self.cursor += 1;
            }
            Action::DeleteChar if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
            }
            Action::DeleteCharForward if self.cursor < self.char_len() => {
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
            }
            Action::DeleteChar | Action::DeleteCharForward => {}
            Action::CursorLeft => self.cursor = self.cursor.saturating_sub(1),
            Action::CursorRight => self.cursor = (self.cursor + 1).min(self.char_len()),
            Action::CursorHome => self.cursor = 0,
            Action::CursorEnd => self.cursor = self.char_len(),
            Action::ClearLine => self.clear(),
            _ => return false,
        }
        true
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

/// First character to draw so that `cursor` stays inside a field `width`
/// cells wide. The cursor cell past the last character counts too.
pub fn scroll_offset(cursor: usize, width: usize) -> usize {
    (cursor + 1).saturating_sub(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(text: &str) -> LineBuffer {
        let mut line = LineBuffer::new();
        line.set(text);
        line
    }

    fn typed(text: &str) -> LineBuffer {
        let mut line = LineBuffer::new();
        for c in text.chars() {
            line.apply(&Action::InsertChar(c));
        }
        line
    }

    #[test]
    fn test_typing_and_deleting() {
        let mut line = typed("hello");
        assert_eq!(line.as_str(), "hello");
        assert_eq!(line.cursor(), 5);

        line.apply(&Action::DeleteChar);
        assert_eq!(line.as_str(), "hell");

        line.apply(&Action::CursorHome);
        line.apply(&Action::DeleteCharForward);
        assert_eq!(line.as_str(), "ell");
        assert_eq!(line.cursor(), 0);

        line.apply(&Action::DeleteChar);
        assert_eq!(line.as_str(), "ell");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut line = holding("pässwörd");

        line.apply(&Action::CursorLeft);
        line.apply(&Action::CursorLeft);
        line.apply(&Action::DeleteChar);
        assert_eq!(line.as_str(), "pässwrd");

        line.apply(&Action::InsertChar('ø'));
        assert_eq!(line.as_str(), "pässwørd");
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut line = holding("abc");

        line.apply(&Action::CursorRight);
        assert_eq!(line.cursor(), 3);

        line.apply(&Action::CursorHome);
        line.apply(&Action::CursorLeft);
        assert_eq!(line.cursor(), 0);

        line.apply(&Action::DeleteCharForward);
        line.apply(&Action::CursorEnd);
        assert_eq!(line.cursor(), 2);
    }

    #[test]
    fn test_non_edit_actions_are_left_alone() {
        let mut line = holding("abc");

        assert!(!line.apply(&Action::Submit));
        assert!(!line.apply(&Action::Cancel));
        assert!(line.apply(&Action::ClearLine));
        assert_eq!(line.as_str(), "");
        assert_eq!(line.cursor(), 0);
    }

    #[test]
    fn test_scroll_offset_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 10), 0);
        assert_eq!(scroll_offset(9, 10), 0);
        assert_eq!(scroll_offset(10, 10), 1);
        assert_eq!(scroll_offset(128, 40), 89);
        assert_eq!(scroll_offset(3, 0), 4);
    }
}
