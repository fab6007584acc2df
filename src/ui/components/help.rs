//! Help Screen
//!
//! Key binding reference, scrollable, in one or two columns.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::popup::centered_rect;

const TWO_COLUMN_MIN_WIDTH: u16 = 80;

type Section = (&'static str, Vec<(&'static str, &'static str)>);

/// Scrollable help screen state
#[derive(Debug, Default)]
pub struct HelpState {
    pub scroll: usize,
}

impl HelpState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize, max_scroll: usize) {
        self.scroll = (self.scroll + amount).min(max_scroll);
    }

    pub fn home(&mut self) {
        self.scroll = 0;
    }
}

/// Help screen widget
pub struct HelpScreen<'a> {
    state: &'a HelpState,
}

impl<'a> HelpScreen<'a> {
    pub fn new(state: &'a HelpState) -> Self {
        Self { state }
    }

    /// Total content height in single-column layout
    pub fn content_height() -> usize {
        build_help_lines(&help_sections()).len()
    }

    /// Calculate max scroll value given visible height
    pub fn max_scroll(visible_height: u16) -> usize {
        Self::content_height().saturating_sub(visible_height as usize)
    }

    /// Inner height of the help popup for a terminal of `area`
    pub fn visible_height(area: Rect) -> u16 {
        centered_rect(65, 65, area).height.saturating_sub(2)
    }
}

impl Widget for HelpScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(65, 65, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Help Page ")
            .title_bottom(Line::from(" j/k scroll • q close ").centered())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(popup);
        block.render(popup, buf);

        if inner.width >= TWO_COLUMN_MIN_WIDTH {
            render_two_columns(inner, buf, self.state.scroll);
        } else {
            render_single_column(inner, buf, self.state.scroll);
        }
    }
}

fn render_single_column(area: Rect, buf: &mut Buffer, scroll: usize) {
    let sections = help_sections();
    let lines = build_help_lines(&sections);

    for (i, line) in lines.iter().enumerate().skip(scroll) {
        let y = area.y + (i - scroll) as u16;
        if y >= area.y + area.height {
            break;
        }
        render_help_line(area.x, y, area.width, line, buf);
    }
}

fn render_two_columns(area: Rect, buf: &mut Buffer, scroll: usize) {
    let sections = help_sections();
    let (left_sections, right_sections) = split_sections_for_columns(sections);

    let left_lines = build_help_lines(&left_sections);
    let right_lines = build_help_lines(&right_sections);

    let gap = 4u16;
    let col_width = (area.width.saturating_sub(gap)) / 2;
    let right_x = area.x + col_width + gap;

    let max_lines = left_lines.len().max(right_lines.len());

    for i in scroll..max_lines {
        let y = area.y + (i - scroll) as u16;
        if y >= area.y + area.height {
            break;
        }

        if let Some(line) = left_lines.get(i) {
            render_help_line(area.x, y, col_width, line, buf);
        }
        if let Some(line) = right_lines.get(i) {
            render_help_line(right_x, y, col_width, line, buf);
        }
    }
}

enum HelpLine<'a> {
    Header(&'a str),
    Binding(&'a str, &'a str),
    Empty,
}

fn build_help_lines(sections: &[Section]) -> Vec<HelpLine<'static>> {
    let mut lines = Vec::new();

    for (i, (header, bindings)) in sections.iter().enumerate() {
        lines.push(HelpLine::Header(*header));
        for (key, desc) in bindings {
            lines.push(HelpLine::Binding(*key, *desc));
        }
        if i < sections.len() - 1 {
            lines.push(HelpLine::Empty);
        }
    }

    lines
}

fn render_help_line(x: u16, y: u16, width: u16, line: &HelpLine, buf: &mut Buffer) {
    match line {
        HelpLine::Header(title) => {
            buf.set_string(x, y, *title, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        }
        HelpLine::Binding(key, desc) => {
            buf.set_string(x + 2, y, *key, Style::default().fg(Color::Cyan));
            let desc_width = width.saturating_sub(14) as usize;
            buf.set_stringn(x + 14, y, *desc, desc_width, Style::default().fg(Color::Gray));
        }
        HelpLine::Empty => {}
    }
}

fn split_sections_for_columns(sections: Vec<Section>) -> (Vec<Section>, Vec<Section>) {
    let total_lines: usize = sections.iter().map(|(_, b)| 1 + b.len() + 1).sum();
    let target = total_lines / 2;

    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut current_lines = 0;

    for section in sections {
        let section_lines = 1 + section.1.len() + 1;
        if current_lines < target {
            left.push(section);
        } else {
            right.push(section);
        }
        current_lines += section_lines;
    }

    (left, right)
}

fn help_sections() -> Vec<Section> {
    vec![
        (
            "Navigation",
            vec![
                ("j / ↓", "Move down"),
                ("k / ↑", "Move up"),
                ("gg", "Go to top"),
                ("G", "Go to bottom"),
                ("Ctrl-d", "Half page down"),
                ("Ctrl-u", "Half page up"),
            ],
        ),
        (
            "Entries",
            vec![
                ("n", "New entry"),
                ("e / Enter", "Change password"),
                ("dd / x", "Delete entry"),
                ("s", "Show/hide passwords"),
                ("Ctrl-r", "Reload from disk"),
            ],
        ),
        (
            "Clipboard",
            vec![
                ("yy / c", "Copy password"),
                ("u", "Copy username"),
            ],
        ),
        (
            "Entry form",
            vec![
                ("Tab", "Next field"),
                ("Ctrl-g", "Generate password"),
                ("Alt-1..4", "Toggle a-z A-Z 0-9 !@#"),
                ("Ctrl-←/→", "Shorter/longer"),
                ("Ctrl-s", "Show password"),
            ],
        ),
        (
            "Commands",
            vec![
                (":", "Command mode"),
                (":q", "Quit"),
                (":new", "New entry"),
                (":edit", "Change password"),
                (":delete", "Delete entry"),
                (":gen", "Generate and copy"),
                (":reload", "Reload from disk"),
                (":clear", "Clear message"),
            ],
        ),
        (
            "Other",
            vec![
                ("?", "Show this help"),
                ("Ctrl-l", "Clear message"),
                ("q", "Quit"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_bounds() {
        let mut state = HelpState::new();
        let max = HelpScreen::max_scroll(10);
        assert!(max > 0);

        state.scroll_down(1000, max);
        assert_eq!(state.scroll, max);

        state.scroll_up(1000);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_two_column_split_keeps_every_section() {
        let (left, right) = split_sections_for_columns(help_sections());
        assert!(!left.is_empty());
        assert!(!right.is_empty());
        assert_eq!(left.len() + right.len(), help_sections().len());
    }

    #[test]
    fn test_render_lists_bindings() {
        let area = Rect::new(0, 0, 120, 60);
        let mut buf = Buffer::empty(area);
        HelpScreen::new(&HelpState::new()).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Generate password"));
    }
}
