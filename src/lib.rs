// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::NoteBuffer)
    clippy::module_name_repetitions
)]

//! # Lanote
//!
//! A versioned note buffer edited through a compact command language.
//!
//! A note keeps:
//! - A bounded, linear undo/redo history of snapshots
//! - A caret addressed by character, word, or line
//! - Edit primitives that each commit exactly one new version
//!
//! ## Command language
//!
//! Commands arrive as a flat argument list, e.g. from a chat line split on
//! whitespace. Plain words replace the note; arguments starting with `.`
//! are operators with an optional numeric suffix:
//!
//! ```text
//! hello world .a1 !      ->  "hello! world"
//! .r world there         ->  replace first "world" with "there"
//! .d1,3  .z2  .Z         ->  delete words 1 and 3, undo twice, redo
//! ```
//!
//! ## Modules
//!
//! - [`editor`]: History, word/line addressing, and edit primitives
//! - [`command`]: Tokenizer and interpreter
//! - [`clipboard`]: Copy/cut sinks
//! - [`app`]: Session host used by the binary
//! - [`config`]: Saved defaults

pub mod app;
pub mod clipboard;
pub mod command;
pub mod config;
pub mod editor;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::App;
    pub use crate::clipboard::{Clipboard, MemoryClipboard};
    pub use crate::command::{Interpreter, Outcome, run_command};
    pub use crate::editor::NoteBuffer;
}
