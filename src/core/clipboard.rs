//! Clipboard module
//!
//! System clipboard access. Whether an integration exists is probed once at
//! startup with [`detect`]; callers hold an `Option` of the result instead of
//! checking again later.
//!
//! On Linux an X11 or Wayland selection is served by the process that owns
//! it, so a copy made through `cli-clipboard` vanishes when `translate`
//! exits. Copies are therefore piped to `wl-copy`, `xclip` or `xsel` when one
//! of them is installed, since those keep serving the selection on their own.

use cli_clipboard::{ClipboardContext, ClipboardProvider};
use std::io::Write;
use std::process::{Command, Stdio};

use crate::shared::error::{AppError, AppResult};

/// Remediation shown when no clipboard integration can be reached.
pub const CLIPBOARD_UNAVAILABLE_MESSAGE: &str = "\
This error should only appear on Linux (not Windows or Mac).
No X11 or Wayland display could be reached. Run translate inside a desktop
session (DISPLAY or WAYLAND_DISPLAY must be set), or forward a display with `ssh -X`.

Copied results only outlive translate through a clipboard tool:

    sudo apt-get install xclip          to install the xclip utility.
    sudo apt-get install xsel           to install the xsel utility.
    sudo apt-get install wl-clipboard   to install wl-copy for Wayland.";

pub const CLIPBOARD_AVAILABLE_HELP: &str = "Use clipboard data as input.";

const NO_COPY_HELPER_WARNING: &str =
    "no xclip, xsel or wl-copy found; the copied result is lost when translate exits";

pub trait Clipboard {
    fn paste(&mut self) -> AppResult<String>;
    fn copy(&mut self, text: &str) -> AppResult<()>;
}

/// External program that takes clipboard text on stdin and keeps serving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyHelper {
    WlCopy,
    Xclip,
    Xsel,
}

impl CopyHelper {
    pub fn program(self) -> &'static str {
        match self {
            CopyHelper::WlCopy => "wl-copy",
            CopyHelper::Xclip => "xclip",
            CopyHelper::Xsel => "xsel",
        }
    }

    pub fn args(self) -> &'static [&'static str] {
        match self {
            CopyHelper::WlCopy => &[],
            CopyHelper::Xclip => &["-selection", "clipboard"],
            CopyHelper::Xsel => &["--clipboard", "--input"],
        }
    }
}

/// First installed helper, preferring `wl-copy` on a Wayland session.
pub fn find_copy_helper<F>(wayland: bool, installed: F) -> Option<CopyHelper>
where
    F: Fn(&str) -> bool,
{
    let candidates: &[CopyHelper] = if wayland {
        &[CopyHelper::WlCopy, CopyHelper::Xclip, CopyHelper::Xsel]
    } else {
        &[CopyHelper::Xclip, CopyHelper::Xsel]
    };
    candidates
        .iter()
        .copied()
        .find(|helper| installed(helper.program()))
}

fn linux_copy_helper() -> Option<CopyHelper> {
    if !cfg!(target_os = "linux") {
        return None;
    }
    let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
    find_copy_helper(wayland, |program| which::which(program).is_ok())
}

/// Write `text` to the stdin of `program` and wait for it to exit.
fn pipe_to(program: &str, args: &[&str], text: &str) -> AppResult<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| AppError::Clipboard(format!("Failed to run {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| AppError::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| AppError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;
    if !status.success() {
        return Err(AppError::Clipboard(format!("{} exited with {}", program, status)));
    }
    Ok(())
}

pub struct SystemClipboard {
    ctx: ClipboardContext,
    helper: Option<CopyHelper>,
}

impl SystemClipboard {
    pub fn new() -> AppResult<Self> {
        let ctx = ClipboardContext::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
        let helper = linux_copy_helper();
        if let Some(helper) = helper {
            tracing::debug!(helper = helper.program(), "copying through external helper");
        }
        Ok(Self { ctx, helper })
    }
}

impl Clipboard for SystemClipboard {
    fn paste(&mut self) -> AppResult<String> {
        self.ctx
            .get_contents()
            .map_err(|e| AppError::Clipboard(format!("Failed to read from clipboard: {}", e)))
    }

    fn copy(&mut self, text: &str) -> AppResult<()> {
        if let Some(helper) = self.helper {
            return pipe_to(helper.program(), helper.args(), text);
        }
        if cfg!(target_os = "linux") {
            tracing::warn!("{}", NO_COPY_HELPER_WARNING);
        }
        self.ctx
            .set_contents(text.to_string())
            .map_err(|e| AppError::Clipboard(format!("Failed to write to clipboard: {}", e)))
    }
}

/// Probe the system clipboard.
///
/// Availability depends on reaching the clipboard only; a later read that
/// fails (undecodable contents, a timeout) surfaces as [`AppError::Clipboard`].
pub fn detect() -> Option<Box<dyn Clipboard>> {
    available(SystemClipboard::new())
}

fn available<C: Clipboard + 'static>(connected: AppResult<C>) -> Option<Box<dyn Clipboard>> {
    match connected {
        Ok(clipboard) => Some(Box::new(clipboard)),
        Err(e) => {
            tracing::debug!("clipboard unavailable: {}", e);
            None
        }
    }
}

/// Help text for `--clipboard`, depending on whether the integration exists.
pub fn help_text(available: bool) -> &'static str {
    if available {
        CLIPBOARD_AVAILABLE_HELP
    } else {
        CLIPBOARD_UNAVAILABLE_MESSAGE
    }
}
