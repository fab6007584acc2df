//! Dialog Controller
//!
//! State machine: `Idle -> Showing(request) -> Resolving -> Idle`.
//!
//! `open` is only legal from `Idle` and hands back a [`PendingDialog`] that
//! completes once, when the user's answer has brought the controller back
//! to `Idle`. Submitting an empty value to an `Edit` dialog is a self-loop:
//! the request stays `Showing` with an updated message.
//!
//! The controller is shared by handle (`Clone`) within one cooperative
//! thread; it is deliberately `!Send`.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use super::request::{DialogMode, DialogRequest, DialogResult, EMPTY_VALUE_MESSAGE};
use super::DialogError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Idle,
    Showing(DialogRequest),
    /// Held only inside `resolve`; never visible from outside the controller
    Resolving,
}

/// Effect of a user control on the open dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The waiting caller received its result
    Resolved,
    /// The dialog is still showing with an updated message
    Reprompted,
}

#[derive(Default)]
struct Inner {
    state: DialogState,
    responder: Option<oneshot::Sender<DialogResult>>,
}

#[derive(Clone, Default)]
pub struct DialogController {
    inner: Rc<RefCell<Inner>>,
}

impl DialogController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `request`. Fails with `DialogBusy` unless the controller is idle.
    pub fn open(&self, request: DialogRequest) -> Result<PendingDialog, DialogError> {
        let mut inner = self.inner.borrow_mut();
        if inner.state != DialogState::Idle {
            tracing::debug!(mode = %request.mode, "dialog rejected, another is open");
            return Err(DialogError::DialogBusy);
        }

        let (tx, rx) = oneshot::channel();
        tracing::debug!(mode = %request.mode, "dialog opened");
        inner.state = DialogState::Showing(request);
        inner.responder = Some(tx);

        Ok(PendingDialog { rx })
    }

    /// OK on an `Info` or `Confirm` dialog.
    pub fn confirm(&self) -> Result<Transition, DialogError> {
        let result = match self.showing_mode()? {
            DialogMode::Info => DialogResult::Acknowledged,
            DialogMode::Confirm => DialogResult::Confirmed,
            mode @ DialogMode::Edit => return Err(DialogError::ModeMismatch(mode)),
        };
        Ok(self.resolve(result))
    }

    /// OK on an `Edit` dialog. An empty value re-prompts instead of resolving.
    pub fn submit(&self, value: &str) -> Result<Transition, DialogError> {
        let mode = self.showing_mode()?;
        if mode != DialogMode::Edit {
            return Err(DialogError::ModeMismatch(mode));
        }

        if value.is_empty() {
            if let DialogState::Showing(request) = &mut self.inner.borrow_mut().state {
                request.message = EMPTY_VALUE_MESSAGE.to_string();
            }
            tracing::debug!("empty edit submission, re-prompting");
            return Ok(Transition::Reprompted);
        }

        Ok(self.resolve(DialogResult::Submitted(value.to_string())))
    }

    /// Cancel, if the open dialog offers it.
    pub fn cancel(&self) -> Result<Transition, DialogError> {
        let has_cancel = match &self.inner.borrow().state {
            DialogState::Showing(request) => request.has_cancel,
            _ => return Err(DialogError::NotShowing),
        };
        if !has_cancel {
            return Err(DialogError::CancelUnavailable);
        }
        Ok(self.resolve(DialogResult::Cancelled))
    }

    pub fn state(&self) -> DialogState {
        self.inner.borrow().state.clone()
    }

    /// The request currently on screen.
    pub fn request(&self) -> Option<DialogRequest> {
        match &self.inner.borrow().state {
            DialogState::Showing(request) => Some(request.clone()),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.inner.borrow().state == DialogState::Idle
    }

    pub fn is_showing(&self) -> bool {
        matches!(self.inner.borrow().state, DialogState::Showing(_))
    }

    fn showing_mode(&self) -> Result<DialogMode, DialogError> {
        match &self.inner.borrow().state {
            DialogState::Showing(request) => Ok(request.mode),
            _ => Err(DialogError::NotShowing),
        }
    }

    /// `Resolving` only lasts while this call holds the borrow: the
    /// responder is taken under it and the state is back to `Idle` before
    /// the caller is woken, so a woken caller may open its next dialog.
    fn resolve(&self, result: DialogResult) -> Transition {
        let responder = {
            let mut inner = self.inner.borrow_mut();
            inner.state = DialogState::Resolving;
            let responder = inner.responder.take();
            inner.state = DialogState::Idle;
            responder
        };

        tracing::debug!(cancelled = result.is_cancelled(), "dialog resolved");
        if let Some(tx) = responder {
            // The caller may have stopped waiting; nothing to deliver then.
            let _ = tx.send(result);
        }
        Transition::Resolved
    }
}

/// The answer to one `open` call.
pub struct PendingDialog {
    rx: oneshot::Receiver<DialogResult>,
}

impl PendingDialog {
    /// The result if the dialog has already resolved.
    pub fn try_result(&mut self) -> Option<Result<DialogResult, DialogError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(Ok(result)),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(DialogError::Abandoned)),
        }
    }
}

impl Future for PendingDialog {
    type Output = Result<DialogResult, DialogError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|r| r.map_err(|_| DialogError::Abandoned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_from_idle() {
        let dialog = DialogController::new();
        assert_eq!(dialog.state(), DialogState::Idle);

        let _pending = dialog.open(DialogRequest::info("hello")).unwrap();
        assert_eq!(dialog.state(), DialogState::Showing(DialogRequest::info("hello")));
    }

    #[tokio::test]
    async fn test_second_open_is_busy() {
        let dialog = DialogController::new();
        let _pending = dialog.open(DialogRequest::confirm("first")).unwrap();

        assert_eq!(
            dialog.open(DialogRequest::info("second")).err(),
            Some(DialogError::DialogBusy)
        );
        assert_eq!(dialog.request().unwrap().message, "first");
    }

    #[tokio::test]
    async fn test_info_acknowledged() {
        let dialog = DialogController::new();
        let pending = dialog.open(DialogRequest::info("copied to clipboard")).unwrap();

        assert_eq!(dialog.confirm(), Ok(Transition::Resolved));
        assert!(dialog.is_idle());
        assert_eq!(pending.await, Ok(DialogResult::Acknowledged));
    }

    #[tokio::test]
    async fn test_confirm_then_cancel() {
        let dialog = DialogController::new();
        let pending = dialog.open(DialogRequest::confirm("Delete?")).unwrap();

        dialog.cancel().unwrap();
        assert_eq!(pending.await, Ok(DialogResult::Cancelled));
        assert!(dialog.is_idle());
    }

    #[tokio::test]
    async fn test_confirm_confirmed() {
        let dialog = DialogController::new();
        let pending = dialog.open(DialogRequest::confirm("Delete?")).unwrap();

        dialog.confirm().unwrap();
        assert!(pending.await.unwrap().is_confirmed());
    }

    #[tokio::test]
    async fn test_cancel_unavailable_keeps_showing() {
        let dialog = DialogController::new();
        let mut pending = dialog.open(DialogRequest::info("notice")).unwrap();

        assert_eq!(dialog.cancel(), Err(DialogError::CancelUnavailable));
        assert!(dialog.is_showing());
        assert!(pending.try_result().is_none());

        dialog.confirm().unwrap();
        assert_eq!(pending.await, Ok(DialogResult::Acknowledged));
    }

    #[tokio::test]
    async fn test_empty_edit_self_loops() {
        let dialog = DialogController::new();
        let mut pending = dialog.open(DialogRequest::edit("New password", "old")).unwrap();

        assert_eq!(dialog.submit(""), Ok(Transition::Reprompted));
        let request = dialog.request().unwrap();
        assert_eq!(request.message, EMPTY_VALUE_MESSAGE);
        assert_eq!(request.mode, DialogMode::Edit);
        assert!(pending.try_result().is_none());

        assert_eq!(dialog.submit("new"), Ok(Transition::Resolved));
        assert!(dialog.is_idle());
        assert_eq!(pending.await, Ok(DialogResult::Submitted("new".into())));
    }

    #[tokio::test]
    async fn test_mode_mismatch() {
        let dialog = DialogController::new();
        let _edit = dialog.open(DialogRequest::edit("New password", "old")).unwrap();
        assert_eq!(dialog.confirm(), Err(DialogError::ModeMismatch(DialogMode::Edit)));
        dialog.cancel().unwrap();

        let _confirm = dialog.open(DialogRequest::confirm("Delete?")).unwrap();
        assert_eq!(dialog.submit("x"), Err(DialogError::ModeMismatch(DialogMode::Confirm)));
        assert!(dialog.is_showing());
    }

    #[tokio::test]
    async fn test_controls_while_idle() {
        let dialog = DialogController::new();
        assert_eq!(dialog.confirm(), Err(DialogError::NotShowing));
        assert_eq!(dialog.submit("x"), Err(DialogError::NotShowing));
        assert_eq!(dialog.cancel(), Err(DialogError::NotShowing));
    }

    #[tokio::test]
    async fn test_resolving_is_never_observed() {
        let dialog = DialogController::new();
        let watcher = dialog.clone();
        let pending = dialog.open(DialogRequest::confirm("Delete?")).unwrap();

        let (result, ()) = tokio::join!(
            async {
                let result = pending.await;
                // Woken only after the controller is idle again
                assert_eq!(watcher.state(), DialogState::Idle);
                result
            },
            async {
                tokio::task::yield_now().await;
                dialog.confirm().unwrap();
                assert_eq!(dialog.state(), DialogState::Idle);
            }
        );

        assert_eq!(result, Ok(DialogResult::Confirmed));
    }

    #[tokio::test]
    async fn test_reopen_after_resolution() {
        let dialog = DialogController::new();
        let first = dialog.open(DialogRequest::info("one")).unwrap();
        dialog.confirm().unwrap();
        first.await.unwrap();

        assert!(dialog.open(DialogRequest::info("two")).is_ok());
    }

    #[tokio::test]
    async fn test_dropped_controller_abandons() {
        let dialog = DialogController::new();
        let pending = dialog.open(DialogRequest::confirm("Delete?")).unwrap();
        drop(dialog);

        assert_eq!(pending.await, Err(DialogError::Abandoned));
    }

    #[tokio::test]
    async fn test_dropped_pending_still_resolves() {
        let dialog = DialogController::new();
        drop(dialog.open(DialogRequest::confirm("Delete?")).unwrap());

        assert_eq!(dialog.confirm(), Ok(Transition::Resolved));
        assert!(dialog.is_idle());
    }
}
