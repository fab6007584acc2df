//! Renderer
//!
//! Main rendering logic for the application.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
    Frame,
};

use super::components::{
    ConfirmDialog, CredentialList, EditDialog, EmptyState, EntryForm, EntryFormWidget, HelpBar,
    HelpScreen, HelpState, ListViewState, MessagePopup, MessageType, StatusLine,
};
use crate::dialog::{DialogMode, DialogRequest, EMPTY_VALUE_MESSAGE};
use crate::generator::GeneratorOptions;
use crate::input::InputMode;
use crate::store::CredentialEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Form,
}

pub struct UiState<'a> {
    pub view: View,
    pub mode: InputMode,
    pub entries: &'a [CredentialEntry],
    pub list_state: &'a mut ListViewState,
    pub reveal_passwords: bool,
    pub command_buffer: Option<&'a str>,
    pub message: Option<(&'a str, MessageType)>,
    pub store_name: Option<&'a str>,
    pub entry_form: Option<&'a EntryForm>,
    /// Options `:gen` and the form's generator use
    pub generator: &'a GeneratorOptions,
    pub dialog: Option<DialogView<'a>>,
    pub help_state: &'a HelpState,
}

/// The dialog on screen plus the edit buffer typed into it
pub struct DialogView<'a> {
    pub request: &'a DialogRequest,
    pub value: &'a str,
    pub cursor: usize,
    pub masked: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn hex_color(rgb: u32) -> Color {
        Color::Rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    pub fn render(frame: &mut Frame, state: &mut UiState) {
        let size = frame.area();
        let chunks = create_main_layout(size);

        render_list(frame, chunks[0], state);
        if state.view == View::Form {
            if let Some(form) = state.entry_form {
                frame.render_widget(EntryFormWidget::new(form), chunks[0]);
            }
        }
        render_status_line(frame, chunks[1], state);
        frame.render_widget(HelpBar::for_mode(state.mode, state.view), chunks[2]);
        render_overlays(frame, size, state);
    }
}

fn create_main_layout(size: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size)
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &UiState) {
    let mut status = StatusLine::new(state.mode)
        .generator(state.generator)
        .reveal(state.reveal_passwords);

    if let Some(line) = state.command_buffer {
        status = status.command_line(line);
    } else if let Some((msg, msg_type)) = state.message {
        status = status.message(msg, msg_type);
    }

    if let Some(dialog) = &state.dialog {
        status = status.dialog(dialog.request);
    }
    if let Some(selected) = state.list_state.selected() {
        status = status.position(selected, state.list_state.total);
    }
    if let Some(name) = state.store_name {
        status = status.store_name(name);
    }

    frame.render_widget(status, area);
}

fn render_list(frame: &mut Frame, area: Rect, state: &mut UiState) {
    if state.entries.is_empty() {
        let empty = EmptyState::new("No entries").hint("Press 'n' to add one");
        frame.render_widget(empty, area);
        return;
    }

    let border = if state.view == View::List { Color::Magenta } else { Color::DarkGray };
    let block = Block::default()
        .title(" Passwords ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));

    let list = CredentialList::new(state.entries)
        .block(block)
        .reveal(state.reveal_passwords);
    frame.render_stateful_widget(list, area, state.list_state);
}

fn render_overlays(frame: &mut Frame, area: Rect, state: &UiState) {
    if state.mode == InputMode::Help {
        frame.render_widget(HelpScreen::new(state.help_state), area);
        return;
    }

    if let Some(dialog) = &state.dialog {
        render_dialog(frame, area, dialog);
    }
}

fn render_dialog(frame: &mut Frame, area: Rect, dialog: &DialogView) {
    let request = dialog.request;
    match request.mode {
        DialogMode::Info => {
            frame.render_widget(MessagePopup::info(" Notice ", &request.message), area);
        }
        DialogMode::Confirm => {
            let confirm = ConfirmDialog::new(" Confirm ", &request.message).has_cancel(request.has_cancel);
            frame.render_widget(confirm, area);
        }
        DialogMode::Edit => {
            let edit = EditDialog::new(" Edit ", &request.message, dialog.value, dialog.cursor)
                .masked(dialog.masked)
                .warning(request.message == EMPTY_VALUE_MESSAGE);
            frame.render_widget(edit, area);
        }
    }
}
