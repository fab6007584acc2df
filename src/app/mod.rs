//! Application State
//!
//! Ties the credential store, dialog controller, UI, and input together.
//!
//! Store workflows run as local tasks next to the event loop. They talk to
//! the user only through the shared [`DialogController`] and report back
//! over a channel the app drains once per tick.

mod actions;
mod clipboard;
mod config;
mod credentials;
mod input;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::db::KeyValueStore;
use crate::dialog::{DialogController, DialogMode, DialogRequest, EMPTY_VALUE_MESSAGE};
use crate::generator::GeneratorOptions;
use crate::input::{InputMode, ModeState};
use crate::store::{CredentialStore, ValidationFailure};
use crate::ui::components::HelpState;
use crate::ui::{DialogView, EntryForm, ListViewState, MessageType, Renderer, UiState, View};

pub use config::AppConfig;

pub type SharedStore = Rc<RefCell<CredentialStore<Box<dyn KeyValueStore>>>>;

/// How a spawned workflow ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowReport {
    Added,
    Deleted,
    Updated,
    Acknowledged,
    Cancelled,
    Rejected(ValidationFailure),
    Failed(String),
}

pub struct App {
    pub config: AppConfig,
    pub store: SharedStore,
    pub dialog: DialogController,
    pub mode_state: ModeState,
    pub view: View,
    pub terminal_size: Rect,
    pub list_state: ListViewState,
    pub passwords_visible: bool,
    pub message: Option<(String, MessageType, Instant)>,
    pub should_quit: bool,
    pub entry_form: Option<EntryForm>,
    pub generator: GeneratorOptions,
    pub help_state: HelpState,
    /// The request last synced into `mode_state`
    dialog_request: Option<DialogRequest>,
    reports_tx: mpsc::UnboundedSender<WorkflowReport>,
    reports_rx: mpsc::UnboundedReceiver<WorkflowReport>,
}

impl App {
    pub fn new(config: AppConfig, backend: Box<dyn KeyValueStore>) -> Self {
        let store = CredentialStore::open(backend);
        let mut list_state = ListViewState::new();
        list_state.set_total(store.len());
        tracing::info!(entries = store.len(), ephemeral = config.ephemeral, "store opened");

        let (reports_tx, reports_rx) = mpsc::unbounded_channel();

        Self {
            generator: config.generator,
            config,
            store: Rc::new(RefCell::new(store)),
            dialog: DialogController::new(),
            mode_state: ModeState::new(),
            view: View::List,
            terminal_size: Rect::default(),
            list_state,
            passwords_visible: false,
            message: None,
            should_quit: false,
            entry_form: None,
            help_state: HelpState::new(),
            dialog_request: None,
            reports_tx,
            reports_rx,
        }
    }

    /// Apply finished workflows and follow the dialog controller.
    pub fn tick(&mut self) {
        while let Ok(report) = self.reports_rx.try_recv() {
            self.apply_report(report);
        }

        let len = self.store.borrow().len();
        if self.list_state.total != len {
            self.list_state.set_total(len);
        }

        self.sync_dialog_mode();
        self.check_message_expiry();
    }

    /// Switch input mode to match whatever the controller is showing.
    pub(crate) fn sync_dialog_mode(&mut self) {
        let request = self.dialog.request();
        if request == self.dialog_request {
            return;
        }

        match &request {
            Some(next) => {
                let reprompt = next.mode == DialogMode::Edit
                    && next.message == EMPTY_VALUE_MESSAGE
                    && self.mode_state.mode == InputMode::Insert;
                if !reprompt {
                    self.mode_state.to_dialog(next.mode, next.seed_value.as_deref());
                }
            }
            None if self.mode_state.mode.is_dialog() => self.mode_state.to_normal(),
            None => {}
        }

        self.dialog_request = request;
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.terminal_size = frame.area();

        let store = self.store.borrow();
        let store_name = self.config.store_name();
        let message = self.message.as_ref().map(|(m, t, _)| (m.as_str(), *t));
        let command_buffer =
            (self.mode_state.mode == InputMode::Command).then(|| self.mode_state.line.as_str());
        let dialog = self.dialog_request.as_ref().map(|request| DialogView {
            request,
            value: self.mode_state.line.as_str(),
            cursor: self.mode_state.line.cursor(),
            masked: !self.passwords_visible,
        });

        let mut state = UiState {
            view: self.view,
            mode: self.mode_state.mode,
            entries: store.entries(),
            list_state: &mut self.list_state,
            reveal_passwords: self.passwords_visible,
            command_buffer,
            message,
            store_name: Some(&store_name),
            entry_form: self.entry_form.as_ref(),
            generator: self.entry_form.as_ref().map_or(&self.generator, |form| &form.options),
            dialog,
            help_state: &self.help_state,
        };

        Renderer::render(frame, &mut state);
    }

    fn check_message_expiry(&mut self) {
        let timeout = self.config.message_timeout;
        let expired = self
            .message
            .as_ref()
            .is_some_and(|(_, _, time)| time.elapsed() > timeout);

        if expired {
            self.message = None;
        }
    }

    pub fn set_message(&mut self, msg: &str, msg_type: MessageType) {
        self.message = Some((msg.to_string(), msg_type, Instant::now()));
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
