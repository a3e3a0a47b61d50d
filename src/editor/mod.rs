//! Versioned note buffer.
//!
//! Provides a bounded linear undo history of rope snapshots, pure
//! word/line addressing, and the edit primitives that commit through it.

mod buffer;
pub mod cursor;
mod history;

pub use buffer::NoteBuffer;
pub use cursor::Segments;
pub use history::{DEFAULT_CAPACITY, History};
