use std::future::Future;

use crate::dialog::{self, WorkflowError, WorkflowOutcome};
use crate::generator;
use crate::ui::{EntryForm, MessageType, View};

use super::clipboard::{self, ClipboardError};
use super::{App, WorkflowReport};

impl App {
    /// Run `workflow` next to the event loop; its report arrives on a later tick.
    fn spawn_workflow<F>(&self, workflow: F)
    where
        F: Future<Output = WorkflowReport> + 'static,
    {
        let tx = self.reports_tx.clone();
        tokio::task::spawn_local(async move {
            let _ = tx.send(workflow.await);
        });
    }

    fn selected_index(&mut self) -> Option<usize> {
        let index = self.list_state.selected().filter(|&i| i < self.store.borrow().len());
        if index.is_none() {
            self.set_message("No entry selected", MessageType::Warning);
        }
        index
    }

    pub fn delete_selected(&mut self) {
        let Some(index) = self.selected_index() else { return };
        let (controller, store) = (self.dialog.clone(), self.store.clone());

        self.spawn_workflow(async move {
            let outcome = dialog::confirm_delete(&controller, &*store, index).await;
            report(outcome, WorkflowReport::Deleted)
        });
    }

    pub fn edit_selected(&mut self) {
        let Some(index) = self.selected_index() else { return };
        let (controller, store) = (self.dialog.clone(), self.store.clone());

        self.spawn_workflow(async move {
            let outcome = dialog::edit_password(&controller, &*store, index).await;
            report(outcome, WorkflowReport::Updated)
        });
    }

    pub fn new_entry(&mut self) {
        self.entry_form = Some(EntryForm::new(self.generator));
        self.view = View::Form;
    }

    pub(super) fn close_form(&mut self) {
        if let Some(form) = self.entry_form.take() {
            self.generator = form.options;
        }
        self.view = View::List;
    }

    pub(super) fn submit_form(&mut self) {
        let Some(form) = &self.entry_form else { return };
        let entry = form.to_entry();
        let (controller, store) = (self.dialog.clone(), self.store.clone());

        self.spawn_workflow(async move {
            let outcome = dialog::add_entry(&controller, &*store, entry).await;
            report(outcome, WorkflowReport::Added)
        });
    }

    /// Tell the user something and wait for the acknowledgement in the background.
    fn notify(&self, message: String) {
        let controller = self.dialog.clone();
        self.spawn_workflow(async move {
            match dialog::notify(&controller, message).await {
                Ok(()) => WorkflowReport::Acknowledged,
                Err(e) => WorkflowReport::Failed(e.to_string()),
            }
        });
    }

    pub fn copy_password(&mut self) {
        let Some(index) = self.selected_index() else { return };
        let password = self.store.borrow().entry_at(index).password.clone();
        self.copy_to_clipboard(&password, "copied to clipboard".to_string());
    }

    pub fn copy_username(&mut self) {
        let Some(index) = self.selected_index() else { return };
        let username = self.store.borrow().entry_at(index).username.clone();
        if username.is_empty() {
            self.set_message("Entry has no username", MessageType::Warning);
            return;
        }
        self.copy_to_clipboard(&username, "copied to clipboard".to_string());
    }

    pub fn generate_and_copy_password(&mut self) {
        let password = match generator::generate(self.generator.length(), self.generator.classes) {
            Ok(password) => password,
            Err(e) => {
                self.set_message(&e.to_string(), MessageType::Error);
                return;
            }
        };

        let strength = generator::strength_label(generator::password_strength(&password));
        let notice = format!(
            "Generated a {} character password ({}), copied to clipboard",
            password.chars().count(),
            strength
        );
        self.copy_to_clipboard(&password, notice);
    }

    fn copy_to_clipboard(&mut self, value: &str, notice: String) {
        let copied = clipboard::copy_with_timeout(value, self.config.clipboard_timeout);
        self.finish_copy(copied, notice);
    }

    /// Acknowledge a copy with a notice, or report why nothing was copied.
    pub(super) fn finish_copy(&mut self, copied: Result<(), ClipboardError>, notice: String) {
        match copied {
            Ok(()) => self.notify(notice),
            Err(e) => {
                tracing::warn!(error = %e, "copy failed");
                self.set_message(&e.to_string(), MessageType::Error);
            }
        }
    }

    pub fn reload(&mut self) {
        let count = self.store.borrow_mut().load().len();
        self.list_state.set_total(count);
        self.set_message(&format!("Loaded {} entries", count), MessageType::Info);
    }

    pub(super) fn apply_report(&mut self, report: WorkflowReport) {
        tracing::debug!(?report, "workflow finished");
        let count = self.store.borrow().len();

        match report {
            WorkflowReport::Added => {
                self.close_form();
                self.list_state.set_total(count);
                self.list_state.move_to_bottom();
                self.set_message("Entry added", MessageType::Success);
            }
            WorkflowReport::Deleted => {
                self.list_state.set_total(count);
                self.set_message("Entry deleted", MessageType::Success);
            }
            WorkflowReport::Updated => self.set_message("Password updated", MessageType::Success),
            WorkflowReport::Cancelled => self.set_message("Cancelled", MessageType::Info),
            WorkflowReport::Acknowledged => {}
            WorkflowReport::Rejected(failure) => self.set_message(&failure.to_string(), MessageType::Error),
            WorkflowReport::Failed(e) => {
                tracing::error!(error = %e, "workflow failed");
                self.set_message(&e, MessageType::Error);
            }
        }
    }
}

fn report(outcome: Result<WorkflowOutcome, WorkflowError>, done: WorkflowReport) -> WorkflowReport {
    match outcome {
        Ok(WorkflowOutcome::Completed) => done,
        Ok(WorkflowOutcome::Cancelled) => WorkflowReport::Cancelled,
        Ok(WorkflowOutcome::Rejected(failure)) => WorkflowReport::Rejected(failure),
        Err(e) => WorkflowReport::Failed(e.to_string()),
    }
}
