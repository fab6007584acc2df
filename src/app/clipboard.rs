//! Clipboard
//!
//! Copies a value and clears it again after a timeout, unless something
//! newer was copied in the meantime. The local copy is zeroized either way.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, SyncSender};
use std::time::Duration;

use thiserror::Error;
use zeroize::Zeroize;

static CLIPBOARD_COPY_ID: AtomicU64 = AtomicU64::new(0);

/// How long the caller waits to learn whether the copy landed
const COPY_WAIT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("No clipboard available")]
    Unavailable,
}

/// Copy `text` and clear it after `timeout`. Returns once the copy is in
/// place; the clear happens in the background.
pub fn copy_with_timeout(text: &str, timeout: Duration) -> Result<(), ClipboardError> {
    let copy_id = CLIPBOARD_COPY_ID.fetch_add(1, Ordering::SeqCst) + 1;
    let mut text = text.to_string();
    let (copied_tx, copied_rx) = mpsc::sync_channel(1);

    std::thread::spawn(move || copy_thread(&mut text, timeout, copy_id, copied_tx));

    match copied_rx.recv_timeout(COPY_WAIT) {
        Ok(true) => Ok(()),
        _ => Err(ClipboardError::Unavailable),
    }
}

fn is_latest(copy_id: u64) -> bool {
    CLIPBOARD_COPY_ID.load(Ordering::SeqCst) == copy_id
}

#[cfg(target_os = "linux")]
fn copy_thread(text: &mut String, timeout: Duration, copy_id: u64, copied: SyncSender<bool>) {
    let is_wayland = std::env::var("WAYLAND_DISPLAY").is_ok();

    let ok = if is_wayland { set_wayland(text) } else { set_x11(text) };
    if !ok {
        tracing::warn!(wayland = is_wayland, "clipboard tool unavailable, trying arboard");
        arboard_copy_thread(text, timeout, copy_id, copied);
        return;
    }
    let _ = copied.send(true);

    std::thread::sleep(timeout);
    text.zeroize();

    if is_latest(copy_id) {
        clear_clipboard(is_wayland);
        tracing::debug!("clipboard cleared");
    }
}

#[cfg(target_os = "linux")]
fn pipe_to(program: &str, args: &[&str], text: &str) -> bool {
    use std::io::Write;
    use std::process::{Command, Stdio};

    Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .ok()
        .and_then(|mut c| c.stdin.take()?.write_all(text.as_bytes()).ok())
        .is_some()
}

#[cfg(target_os = "linux")]
fn set_wayland(text: &str) -> bool {
    pipe_to("wl-copy", &[], text)
}

#[cfg(target_os = "linux")]
fn set_x11(text: &str) -> bool {
    pipe_to("xclip", &["-selection", "clipboard"], text)
}

#[cfg(target_os = "linux")]
fn clear_clipboard(is_wayland: bool) {
    use std::process::{Command, Stdio};

    if is_wayland {
        let _ = Command::new("wl-copy").arg("--clear").output();
    } else {
        let _ = Command::new("xclip")
            .args(["-selection", "clipboard"])
            .stdin(Stdio::piped())
            .output();
    }
}

#[cfg(not(target_os = "linux"))]
fn copy_thread(text: &mut String, timeout: Duration, copy_id: u64, copied: SyncSender<bool>) {
    arboard_copy_thread(text, timeout, copy_id, copied);
}

fn arboard_copy_thread(text: &mut String, timeout: Duration, copy_id: u64, copied: SyncSender<bool>) {
    let mut clipboard = match arboard::Clipboard::new() {
        Ok(clipboard) => clipboard,
        Err(e) => {
            tracing::warn!(error = %e, "no clipboard available");
            text.zeroize();
            let _ = copied.send(false);
            return;
        }
    };

    if let Err(e) = clipboard.set_text(text.as_str()) {
        tracing::warn!(error = %e, "clipboard copy failed");
        text.zeroize();
        let _ = copied.send(false);
        return;
    }
    let _ = copied.send(true);

    std::thread::sleep(timeout);
    text.zeroize();

    if is_latest(copy_id) {
        let _ = clipboard.clear();
    }
}
