use crossterm::event::{KeyEvent, KeyEventKind};

use crate::dialog::DialogError;
use crate::input::keymap::{
    confirm_action, form_action, help_action, normal_mode_action, notice_action, text_input_action, Action,
};
use crate::input::InputMode;
use crate::ui::{MessageType, View};

use super::App;

impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // An open dialog owns the keyboard
        match self.mode_state.mode {
            InputMode::Notice => return self.dialog_key(notice_action(key)),
            InputMode::Confirm => return self.dialog_key(confirm_action(key)),
            InputMode::Insert => return self.edit_dialog_key(text_input_action(key)),
            _ => {}
        }

        if self.view == View::Form && self.entry_form.is_some() {
            return self.form_key(form_action(key));
        }

        let action = match self.mode_state.mode {
            InputMode::Normal => self.resolve_normal_action(key),
            InputMode::Command => self.resolve_command_action(key),
            InputMode::Help => self.resolve_help_action(key),
            _ => Action::None,
        };
        self.execute_action(action);
    }

    fn resolve_normal_action(&mut self, key: KeyEvent) -> Action {
        let (action, pending) = normal_mode_action(key, self.mode_state.pending);
        self.mode_state.pending = pending;
        action
    }

    fn resolve_command_action(&mut self, key: KeyEvent) -> Action {
        match text_input_action(key) {
            Action::Submit => {
                let command = self.mode_state.line.as_str().to_string();
                self.mode_state.to_normal();
                Action::ExecuteCommand(command)
            }
            Action::Cancel => {
                self.mode_state.to_normal();
                Action::None
            }
            action => {
                self.mode_state.line.apply(&action);
                Action::None
            }
        }
    }

    fn resolve_help_action(&mut self, key: KeyEvent) -> Action {
        match help_action(key) {
            Action::MoveDown => self.help_scroll(true),
            Action::MoveUp => self.help_scroll(false),
            action => return action,
        }
        Action::None
    }

    fn dialog_key(&mut self, action: Action) {
        let result = match action {
            Action::Confirm => self.dialog.confirm(),
            Action::Cancel => self.dialog.cancel(),
            _ => return,
        };
        self.after_dialog_control(result.map(drop));
    }

    fn edit_dialog_key(&mut self, action: Action) {
        let result = match action {
            Action::Submit => {
                let value = self.mode_state.line.as_str().to_string();
                self.dialog.submit(&value)
            }
            Action::Cancel => self.dialog.cancel(),
            action => {
                self.mode_state.line.apply(&action);
                return;
            }
        };
        self.after_dialog_control(result.map(drop));
    }

    fn after_dialog_control(&mut self, result: Result<(), DialogError>) {
        match result {
            Ok(()) => {}
            // Dialogs without a cancel control just ignore Esc
            Err(DialogError::CancelUnavailable) => {}
            Err(e) => {
                tracing::warn!(error = %e, "dialog control rejected");
                self.set_message(&e.to_string(), MessageType::Error);
            }
        }
        self.sync_dialog_mode();
    }

    fn form_key(&mut self, action: Action) {
        let Some(form) = self.entry_form.as_mut() else { return };

        match action {
            Action::Cancel => self.close_form(),
            Action::Submit => self.submit_form(),
            Action::NextField => form.next_field(),
            Action::PrevField => form.prev_field(),
            Action::TogglePasswordVisibility => form.toggle_password_visibility(),
            Action::ToggleClass(class) => form.toggle_class(class),
            Action::AdjustLength(delta) => form.adjust_length(delta),
            Action::GeneratePassword => {
                if let Err(e) = form.generate_password() {
                    self.set_message(&e.to_string(), MessageType::Error);
                }
            }
            action => {
                form.edit(&action);
            }
        }
    }
}
