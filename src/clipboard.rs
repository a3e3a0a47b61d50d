//! Clipboard sinks used by the copy and cut commands.
//!
//! The buffer only ever writes to a clipboard, so a sink is a single
//! `set_text` call. Failures stay on this side of the boundary: the buffer
//! has already read its text when the sink is called.

use std::io::{Write, stdout};

use base64::Engine;
use thiserror::Error;

use crate::config::ClipboardMode;

/// Clipboard write failure.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is disabled")]
    Unavailable,

    #[error("clipboard write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Something text can be copied to.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform clipboard cannot be reached.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Build the clipboard selected by `mode`.
pub fn for_mode(mode: ClipboardMode) -> Box<dyn Clipboard> {
    match mode {
        ClipboardMode::Auto => Box::new(SystemClipboard),
        ClipboardMode::Osc52 => Box::new(Osc52Clipboard::new(stdout())),
        ClipboardMode::Off => Box::new(NoClipboard),
    }
}

/// Native clipboard where one is reachable, OSC 52 otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        #[cfg(target_os = "macos")]
        {
            if copy_to_pbcopy(text).is_ok() {
                return Ok(());
            }
        }
        Osc52Clipboard::new(stdout()).set_text(text)
    }
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

/// Writes an OSC 52 escape sequence, which most terminals turn into a
/// clipboard update.
#[derive(Debug)]
pub struct Osc52Clipboard<W> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

/// In-process clipboard, for headless hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// The last text written, if any.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// A clipboard that refuses every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}
