//! Status Line Component
//!
//! Two bottom rows. The status line carries the mode badge, the command line
//! or last message, and what the next action will act on: the open dialog,
//! the generator settings, whether passwords are revealed, and the cursor
//! position in the store. The hint bar lists the keys that work right now.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::dialog::{DialogMode, DialogRequest, EMPTY_VALUE_MESSAGE};
use crate::generator::GeneratorOptions;
use crate::input::InputMode;
use crate::ui::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

impl MessageType {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::White,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

fn mode_color(mode: InputMode) -> Color {
    match mode {
        InputMode::Normal => Color::Blue,
        InputMode::Insert => Color::Green,
        InputMode::Command => Color::Red,
        InputMode::Confirm => Color::Red,
        InputMode::Notice => Color::Cyan,
        InputMode::Help => Color::Yellow,
    }
}

pub struct StatusLine<'a> {
    mode: InputMode,
    command_line: Option<&'a str>,
    message: Option<(&'a str, MessageType)>,
    dialog: Option<&'a DialogRequest>,
    generator: Option<&'a GeneratorOptions>,
    reveal: bool,
    position: Option<(usize, usize)>,
    store_name: Option<&'a str>,
}

impl<'a> StatusLine<'a> {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            command_line: None,
            message: None,
            dialog: None,
            generator: None,
            reveal: false,
            position: None,
            store_name: None,
        }
    }

    /// Text typed after `:`. Shown instead of any message.
    pub fn command_line(mut self, line: &'a str) -> Self {
        self.command_line = Some(line);
        self
    }

    pub fn message(mut self, msg: &'a str, msg_type: MessageType) -> Self {
        self.message = Some((msg, msg_type));
        self
    }

    pub fn dialog(mut self, request: &'a DialogRequest) -> Self {
        self.dialog = Some(request);
        self
    }

    pub fn generator(mut self, options: &'a GeneratorOptions) -> Self {
        self.generator = Some(options);
        self
    }

    pub fn reveal(mut self, reveal: bool) -> Self {
        self.reveal = reveal;
        self
    }

    /// `selected` is zero-based.
    pub fn position(mut self, selected: usize, total: usize) -> Self {
        self.position = Some((selected, total));
        self
    }

    pub fn store_name(mut self, name: &'a str) -> Self {
        self.store_name = Some(name);
        self
    }

    fn left_spans(&self) -> Vec<Span<'a>> {
        let badge = Style::default()
            .fg(Color::Black)
            .bg(mode_color(self.mode))
            .add_modifier(Modifier::BOLD);
        let mut spans = vec![
            Span::styled(format!(" {} ", self.mode.indicator()), badge),
            Span::raw(" "),
        ];

        if let Some(line) = self.command_line {
            spans.push(Span::styled(format!(":{}", line), Style::default().fg(Color::White)));
        } else if let Some((msg, msg_type)) = self.message {
            spans.push(Span::styled(msg, Style::default().fg(msg_type.color())));
        }
        spans
    }

    fn right_spans(&self) -> Vec<Span<'a>> {
        let dim = Style::default().fg(Color::Gray);
        let mut segments: Vec<Span<'a>> = Vec::new();

        if let Some(request) = self.dialog {
            segments.push(dialog_segment(request));
        }
        if let Some(options) = self.generator {
            segments.push(Span::styled(generator_summary(options), dim));
        }
        segments.push(if self.reveal {
            Span::styled("shown", Style::default().fg(Color::Yellow))
        } else {
            Span::styled("masked", dim)
        });
        if let Some((selected, total)) = self.position {
            segments.push(Span::styled(format!("{}/{}", selected + 1, total), dim));
        }
        if let Some(name) = self.store_name {
            segments.push(Span::styled(name, dim));
        }

        let mut spans = Vec::with_capacity(segments.len() * 2);
        for (i, segment) in segments.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::Black)));
            }
            spans.push(segment);
        }
        spans
    }
}

/// What the open dialog is waiting for
fn dialog_segment(request: &DialogRequest) -> Span<'static> {
    let (text, color) = match request.mode {
        DialogMode::Edit if request.message == EMPTY_VALUE_MESSAGE => ("value required", Color::Red),
        DialogMode::Edit => ("awaiting value", Color::Green),
        DialogMode::Confirm if request.has_cancel => ("awaiting y/n", Color::Red),
        DialogMode::Confirm => ("awaiting y", Color::Red),
        DialogMode::Info => ("awaiting ok", Color::Cyan),
    };
    Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Length plus one sample character per class that will be drawn from,
/// e.g. `len 20 aA0!`.
fn generator_summary(options: &GeneratorOptions) -> String {
    let classes: String = options
        .classes
        .effective()
        .iter()
        .filter_map(|class| class.chars().chars().next())
        .collect();
    format!("len {} {}", options.length(), classes)
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(Color::DarkGray));

        let right = Line::from(self.right_spans());
        let right_width = (right.width() as u16).min(area.width);
        let right_x = area.x + area.width - right_width;

        // The right side wins when the row is too narrow for both
        let left = Line::from(self.left_spans());
        let left_width = area.width.saturating_sub(right_width + 1);
        buf.set_line(area.x, area.y, &left, left_width);
        buf.set_line(right_x, area.y, &right, right_width);
    }
}

type Hints = &'static [(&'static str, &'static str)];

const LIST_HINTS: Hints = &[
    ("j/k", "navigate"),
    ("n", "new"),
    ("e", "edit"),
    ("yy", "copy"),
    ("dd", "delete"),
    ("s", "show"),
    (":", "command"),
    ("?", "help"),
];
const FORM_HINTS: Hints = &[
    ("Tab", "next"),
    ("Enter", "save"),
    ("Esc", "cancel"),
    ("^g", "generate"),
    ("M-1..4", "classes"),
    ("^←/→", "length"),
    ("^s", "show"),
];
const EDIT_HINTS: Hints = &[("Enter", "save"), ("Esc", "cancel"), ("C-u", "clear")];
const COMMAND_HINTS: Hints = &[("Enter", "run"), ("Esc", "cancel")];
const CONFIRM_HINTS: Hints = &[("y", "yes"), ("n", "no")];
const NOTICE_HINTS: Hints = &[("Enter", "ok")];
const HELP_HINTS: Hints = &[("j/k", "scroll"), ("q", "close")];

/// Key hints for whatever owns the keyboard
pub struct HelpBar {
    hints: Hints,
}

impl HelpBar {
    /// Dialogs and the command line take the keyboard from either view.
    pub fn for_mode(mode: InputMode, view: View) -> Self {
        let hints = match (mode, view) {
            (InputMode::Insert, _) => EDIT_HINTS,
            (InputMode::Confirm, _) => CONFIRM_HINTS,
            (InputMode::Notice, _) => NOTICE_HINTS,
            (InputMode::Command, _) => COMMAND_HINTS,
            (InputMode::Help, _) => HELP_HINTS,
            (InputMode::Normal, View::Form) => FORM_HINTS,
            (InputMode::Normal, View::List) => LIST_HINTS,
        };
        Self { hints }
    }
}

impl Widget for HelpBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
        let desc = Style::default().fg(Color::Gray);

        let spans: Vec<Span> = self
            .hints
            .iter()
            .enumerate()
            .flat_map(|(i, (k, d))| {
                let sep = (i > 0).then(|| Span::styled("  ", desc));
                sep.into_iter()
                    .chain([Span::styled(*k, key), Span::styled(format!(" {}", d), desc)])
            })
            .collect();
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
