//! Popup Components
//!
//! Dialog boxes and input fields drawn over the list.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::input::scroll_offset;

/// Centered rectangle helper
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Fixed size centered rectangle
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn popup_block(title: &str, border: Style) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(Style::default().bg(Color::Black))
}

fn key_hint(key: &'static str, color: Color) -> Span<'static> {
    Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Confirmation dialog
pub struct ConfirmDialog<'a> {
    title: &'a str,
    message: &'a str,
    has_cancel: bool,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self {
            title,
            message,
            has_cancel: true,
        }
    }

    pub fn has_cancel(mut self, has_cancel: bool) -> Self {
        self.has_cancel = has_cancel;
        self
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect_fixed(50, 7, area);
        Clear.render(popup_area, buf);

        let block = popup_block(self.title, Style::default().fg(Color::Yellow));
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        Paragraph::new(self.message)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(Rect::new(inner.x, inner.y, inner.width, inner.height.min(2)), buf);

        let mut hint = vec![key_hint("[y]", Color::Green), Span::raw(" Yes  ")];
        if self.has_cancel {
            hint.extend([key_hint("[n]", Color::Red), Span::raw(" No")]);
        }
        if inner.height > 3 {
            buf.set_line(inner.x, inner.y + 3, &Line::from(hint), inner.width);
        }
    }
}

/// Message popup
pub struct MessagePopup<'a> {
    title: &'a str,
    message: &'a str,
    style: Style,
}

impl<'a> MessagePopup<'a> {
    pub fn info(title: &'a str, message: &'a str) -> Self {
        Self {
            title,
            message,
            style: Style::default().fg(Color::Magenta),
        }
    }
}

impl Widget for MessagePopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect_fixed(60, 6, area);
        Clear.render(popup_area, buf);

        let block = popup_block(self.title, self.style);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        Paragraph::new(self.message)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(Rect::new(inner.x, inner.y, inner.width, inner.height.min(2)), buf);

        if inner.height > 3 {
            let hint = Line::from(vec![key_hint("[Enter]", Color::Green), Span::raw(" OK")]);
            buf.set_line(inner.x, inner.y + 3, &hint, inner.width);
        }
    }
}

/// One-row text input that scrolls to keep the cursor visible
pub struct InputField<'a> {
    value: &'a str,
    cursor: usize,
    masked: bool,
}

impl<'a> InputField<'a> {
    pub fn new(value: &'a str, cursor: usize) -> Self {
        Self {
            value,
            cursor,
            masked: false,
        }
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }
}

impl Widget for InputField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = area.width as usize;
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), Style::default().bg(Color::DarkGray));

        let start = scroll_offset(self.cursor, width);
        let shown: String = if self.masked {
            "*".repeat(self.value.chars().count().saturating_sub(start))
        } else {
            self.value.chars().skip(start).collect()
        };
        buf.set_stringn(area.x, area.y, &shown, width, Style::default().fg(Color::White));

        let cursor_x = area.x + (self.cursor - start) as u16;
        if let Some(cell) = buf.cell_mut((cursor_x, area.y)) {
            cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
        }
    }
}

/// Single value edit dialog
pub struct EditDialog<'a> {
    title: &'a str,
    prompt: &'a str,
    value: &'a str,
    cursor: usize,
    masked: bool,
    warning: bool,
}

impl<'a> EditDialog<'a> {
    pub fn new(title: &'a str, prompt: &'a str, value: &'a str, cursor: usize) -> Self {
        Self {
            title,
            prompt,
            value,
            cursor,
            masked: false,
            warning: false,
        }
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    /// Draw the prompt as a warning, after a rejected submission.
    pub fn warning(mut self, warning: bool) -> Self {
        self.warning = warning;
        self
    }
}

impl Widget for EditDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect_fixed(60, 7, area);
        Clear.render(popup_area, buf);

        let block = popup_block(self.title, Style::default().fg(Color::Magenta));
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);
        if inner.height < 2 {
            return;
        }

        let prompt_color = if self.warning { Color::Red } else { Color::White };
        buf.set_stringn(inner.x, inner.y, self.prompt, inner.width as usize, Style::default().fg(prompt_color));

        InputField::new(self.value, self.cursor)
            .masked(self.masked)
            .render(Rect::new(inner.x, inner.y + 1, inner.width, 1), buf);

        if inner.height > 3 {
            let hint = Line::from(vec![
                key_hint("[Enter]", Color::Green),
                Span::raw(" Save  "),
                key_hint("[Esc]", Color::Red),
                Span::raw(" Cancel"),
            ]);
            buf.set_line(inner.x, inner.y + 3, &hint, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(widget: impl Widget) -> String {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_centered_rect_fixed() {
        let r = centered_rect_fixed(50, 7, Rect::new(0, 0, 100, 21));
        assert_eq!(r, Rect::new(25, 7, 50, 7));

        let clipped = centered_rect_fixed(50, 7, Rect::new(0, 0, 30, 5));
        assert_eq!(clipped.width, 30);
        assert_eq!(clipped.height, 5);
    }

    #[test]
    fn test_confirm_without_cancel_hides_no() {
        let screen = render(ConfirmDialog::new(" Confirm ", "Proceed?").has_cancel(false));
        assert!(screen.contains("[y]"));
        assert!(!screen.contains("[n]"));
    }

    #[test]
    fn test_edit_dialog_masks_value() {
        let screen = render(EditDialog::new(" Edit ", "New password", "hunter2", 7).masked(true));
        assert!(screen.contains("New password"));
        assert!(screen.contains("*******"));
        assert!(!screen.contains("hunter2"));
    }

    #[test]
    fn test_input_field_scrolls_long_values() {
        let value: String = ('a'..='z').collect();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        InputField::new(&value, 26).render(area, &mut buf);

        let row: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert_eq!(row, "rstuvwxyz ");
        assert_eq!(buf[(9, 0)].bg, Color::White);
    }

    #[test]
    fn test_message_popup() {
        let screen = render(MessagePopup::info(" Notice ", "copied to clipboard"));
        assert!(screen.contains("copied to clipboard"));
        assert!(screen.contains("OK"));
    }
}
