//! List View Component
//!
//! Displays credential entries in a scrollable list, one row per entry in
//! store order.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::store::CredentialEntry;
use crate::ui::renderer::Renderer;

const WEBSITE_WIDTH: usize = 28;
const USERNAME_WIDTH: usize = 24;

#[derive(Debug, Clone, Default)]
pub struct ListViewState {
    pub selected: Option<usize>,
    pub total: usize,
    list_state: ListState,
}

impl ListViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
        self.list_state.select(index);
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Re-clamp the selection after the entry count changed.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.select(compute_selection_after_total_change(self.selected, total));
    }

    pub fn move_up(&mut self) {
        if self.total == 0 {
            return;
        }
        let new_index = self.selected.unwrap_or(0).saturating_sub(1);
        self.select(Some(new_index));
    }

    pub fn move_down(&mut self) {
        if self.total == 0 {
            return;
        }
        let new_index = self.selected.map_or(0, |i| (i + 1).min(self.total - 1));
        self.select(Some(new_index));
    }

    pub fn move_to_top(&mut self) {
        if self.total > 0 {
            self.select(Some(0));
        }
    }

    pub fn move_to_bottom(&mut self) {
        if self.total > 0 {
            self.select(Some(self.total - 1));
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        if self.total == 0 {
            return;
        }
        let new_index = self.selected.unwrap_or(0).saturating_sub(page_size);
        self.select(Some(new_index));
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.total == 0 {
            return;
        }
        let new_index = self.selected.map_or(0, |i| (i + page_size).min(self.total - 1));
        self.select(Some(new_index));
    }

    pub fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list_state
    }
}

fn compute_selection_after_total_change(selected: Option<usize>, total: usize) -> Option<usize> {
    if total == 0 {
        return None;
    }
    match selected {
        Some(sel) if sel >= total => Some(total - 1),
        Some(sel) => Some(sel),
        None => Some(0),
    }
}

pub struct CredentialList<'a> {
    entries: &'a [CredentialEntry],
    block: Option<Block<'a>>,
    highlight_style: Style,
    reveal: bool,
}

impl<'a> CredentialList<'a> {
    pub fn new(entries: &'a [CredentialEntry]) -> Self {
        Self {
            entries,
            block: None,
            highlight_style: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            reveal: false,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Show passwords in clear text instead of masked.
    pub fn reveal(mut self, reveal: bool) -> Self {
        self.reveal = reveal;
        self
    }
}

fn build_selection_symbol(is_selected: bool) -> Span<'static> {
    if is_selected {
        Span::styled("▌ ", Style::default().fg(Color::Magenta).bg(Color::DarkGray))
    } else {
        Span::raw("  ")
    }
}

fn pad(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}… ", cut)
    } else {
        format!("{}{} ", text, " ".repeat(width - count))
    }
}

fn build_item_spans(
    entry: &CredentialEntry,
    is_selected: bool,
    highlight_style: Style,
    reveal: bool,
) -> Vec<Span<'static>> {
    let base_style = if is_selected { highlight_style } else { Style::default() };
    let password = if reveal {
        Span::styled(entry.password.clone(), base_style.fg(Color::Yellow))
    } else {
        Span::styled(entry.masked_password(), base_style.fg(Renderer::hex_color(0x4C566A)))
    };

    vec![
        build_selection_symbol(is_selected),
        Span::styled(pad(&entry.website, WEBSITE_WIDTH), base_style.fg(Color::White)),
        Span::styled(pad(&entry.username, USERNAME_WIDTH), base_style.fg(Color::Cyan)),
        password,
    ]
}

impl<'a> StatefulWidget for CredentialList<'a> {
    type State = ListViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let selected = state.selected();

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let is_selected = Some(i) == selected;
                let spans = build_item_spans(entry, is_selected, self.highlight_style, self.reveal);
                let item = ListItem::new(Line::from(spans));
                if is_selected { item.style(self.highlight_style) } else { item }
            })
            .collect();

        let list = List::new(items);
        let list = match self.block {
            Some(block) => list.block(block),
            None => list,
        };

        StatefulWidget::render(list, area, buf, state.list_state_mut());
    }
}

pub struct EmptyState<'a> {
    message: &'a str,
    hint: Option<&'a str>,
}

impl<'a> EmptyState<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message, hint: None }
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }
}

fn center_x(area: &Rect, text_len: usize) -> u16 {
    area.x + (area.width.saturating_sub(text_len as u16)) / 2
}

impl<'a> Widget for EmptyState<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let center_y = area.y + area.height / 2;
        let msg_x = center_x(&area, self.message.len());
        buf.set_string(msg_x, center_y, self.message, Style::default().fg(Color::DarkGray));

        if let Some(hint) = self.hint {
            let style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
            buf.set_string(center_x(&area, hint.len()), center_y + 1, hint, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_list_state_navigation() {
        let mut state = ListViewState::new();
        state.set_total(5);

        assert_eq!(state.selected(), Some(0));

        state.move_down();
        assert_eq!(state.selected(), Some(1));

        state.move_up();
        assert_eq!(state.selected(), Some(0));

        state.move_to_bottom();
        assert_eq!(state.selected(), Some(4));

        state.move_to_top();
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_list_state_empty() {
        let mut state = ListViewState::new();
        state.set_total(0);

        state.move_down();
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_selection_clamped_after_delete() {
        let mut state = ListViewState::new();
        state.set_total(3);
        state.move_to_bottom();

        state.set_total(2);
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn test_renders_masked_passwords() {
        let entries = vec![CredentialEntry::new("a.com", "alice", "hunter2")];
        let area = Rect::new(0, 0, 80, 2);
        let mut buf = Buffer::empty(area);
        let mut state = ListViewState::new();
        state.set_total(1);

        CredentialList::new(&entries).render(area, &mut buf, &mut state);
        let row = row_text(&buf, 0);

        assert!(row.contains("a.com"));
        assert!(row.contains("alice"));
        assert!(row.contains("*******"));
        assert!(!row.contains("hunter2"));
    }

    #[test]
    fn test_renders_revealed_passwords() {
        let entries = vec![CredentialEntry::new("a.com", "alice", "hunter2")];
        let area = Rect::new(0, 0, 80, 2);
        let mut buf = Buffer::empty(area);
        let mut state = ListViewState::new();
        state.set_total(1);

        CredentialList::new(&entries).reveal(true).render(area, &mut buf, &mut state);

        assert!(row_text(&buf, 0).contains("hunter2"));
    }
}
