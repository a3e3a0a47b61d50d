//! Mnemonic command language.
//!
//! A command is a flat argument list such as `["note", ".a1", "!"]`.
//! [`token`] turns it into literals and operators; [`Interpreter`] runs
//! them against a [`crate::editor::NoteBuffer`].

mod interpreter;
pub mod token;

pub use interpreter::{Interpreter, Outcome, run_command};
pub use token::{NumParam, Op, Token, tokenize};
