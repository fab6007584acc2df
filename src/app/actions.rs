use crate::input::keymap::{parse_command, Action};
use crate::ui::components::HelpScreen;
use crate::ui::{ListViewState, MessageType};

use super::App;

impl App {
    pub fn execute_action(&mut self, action: Action) {
        match action {
            Action::MoveUp => self.list_state.move_up(),
            Action::MoveDown => self.list_state.move_down(),
            Action::MoveToTop => self.list_state.move_to_top(),
            Action::MoveToBottom => self.list_state.move_to_bottom(),
            Action::PageUp => self.page_move(|ls, h| ls.page_up(h.saturating_sub(1))),
            Action::PageDown => self.page_move(|ls, h| ls.page_down(h.saturating_sub(1))),
            Action::HalfPageUp => self.page_move(|ls, h| ls.page_up(h / 2)),
            Action::HalfPageDown => self.page_move(|ls, h| ls.page_down(h / 2)),

            Action::ShowHelp => self.show_help(),
            Action::Back => self.mode_state.to_normal(),

            Action::CopyPassword => self.copy_password(),
            Action::CopyUsername => self.copy_username(),
            Action::TogglePasswordVisibility => self.passwords_visible = !self.passwords_visible,

            Action::Delete => self.delete_selected(),
            Action::New => self.new_entry(),
            Action::Edit => self.edit_selected(),

            Action::EnterCommand => self.mode_state.to_command(),
            Action::ExecuteCommand(cmd) => self.execute_action(parse_command(&cmd)),

            Action::GeneratePassword => self.generate_and_copy_password(),
            Action::Reload => self.reload(),

            Action::Clear => self.clear_message(),
            Action::Quit => self.quit(),
            Action::Invalid(cmd) => self.set_message(&format!("Unknown command: {}", cmd), MessageType::Error),

            _ => {}
        }
    }

    fn page_move(&mut self, f: impl FnOnce(&mut ListViewState, usize)) {
        let visible = self.list_visible_height();
        f(&mut self.list_state, visible);
    }

    pub fn list_visible_height(&self) -> usize {
        (self.terminal_size.height as usize).saturating_sub(4)
    }

    fn show_help(&mut self) {
        self.help_state.home();
        self.mode_state.to_help();
    }

    pub(super) fn help_scroll(&mut self, down: bool) {
        let visible = HelpScreen::visible_height(self.terminal_size);
        let max = HelpScreen::max_scroll(visible);
        if down {
            self.help_state.scroll_down(1, max);
        } else {
            self.help_state.scroll_up(1);
        }
    }

    fn quit(&mut self) {
        tracing::info!("quit requested");
        self.should_quit = true;
    }
}
