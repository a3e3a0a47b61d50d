//! Session host for one note.
//!
//! [`App`] owns the buffer and the clipboard for the lifetime of a session
//! and turns argument lists into commands:
//! - [`App::run_args`]: interpret one argument list
//! - [`App::run_repl`]: interpret stdin line by line, echoing the note
//! - [`App::render`]: the note as shown to the user

mod repl;

use crate::clipboard::{Clipboard, SystemClipboard};
use crate::command::{Outcome, run_command};
use crate::editor::NoteBuffer;

/// Glyph drawn at the caret when the caret is shown.
pub const DEFAULT_CARET_MARKER: char = '|';

/// Owns one note and everything needed to edit it.
pub struct App {
    buffer: NoteBuffer,
    clipboard: Box<dyn Clipboard>,
    show_caret: bool,
    caret_marker: char,
}

impl App {
    /// Create a session with an empty note.
    pub fn new() -> Self {
        Self {
            buffer: NoteBuffer::new(),
            clipboard: Box::new(SystemClipboard),
            show_caret: false,
            caret_marker: DEFAULT_CARET_MARKER,
        }
    }

    /// Keep at most `capacity` versions. Starts the note over.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.buffer = NoteBuffer::with_capacity(capacity);
        self
    }

    /// Show or hide the caret marker in rendered output.
    pub const fn with_show_caret(mut self, show: bool) -> Self {
        self.show_caret = show;
        self
    }

    /// Set the glyph drawn at the caret.
    pub const fn with_caret_marker(mut self, marker: char) -> Self {
        self.caret_marker = marker;
        self
    }

    /// Replace the clipboard used by copy and cut.
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub const fn buffer(&self) -> &NoteBuffer {
        &self.buffer
    }

    /// Interpret one argument list against the note.
    pub fn run_args<S: AsRef<str>>(&mut self, args: &[S]) -> Outcome {
        let outcome = run_command(&mut self.buffer, self.clipboard.as_mut(), args);
        tracing::debug!(
            applied = outcome.applied,
            dropped = outcome.dropped,
            version = self.buffer.version(),
            "command finished"
        );
        outcome
    }

    /// The note as displayed, with the caret marker when enabled.
    pub fn render(&self) -> String {
        if self.show_caret {
            self.buffer.text_with_caret(self.caret_marker)
        } else {
            self.buffer.text()
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
