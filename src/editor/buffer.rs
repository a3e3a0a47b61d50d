use ropey::Rope;

use crate::clipboard::{Clipboard, ClipboardError};
use crate::editor::cursor::{Segments, char_index_at_caret};
use crate::editor::history::{DEFAULT_CAPACITY, History};

/// A versioned note: bounded undo history plus a caret.
///
/// Text only ever changes through [`NoteBuffer::commit`], so one primitive
/// call is one undo step. Offsets and counts are in `char`s and are clamped
/// to the current text; out-of-range input never fails.
#[derive(Clone)]
pub struct NoteBuffer {
    history: History,
    caret: usize,
    anchor: Option<Anchor>,
}

/// Segment the caret was last moved to by number.
///
/// A caret at the start of segment `n > 1` sits on the tie with segment
/// `n - 1`, so the number is kept until the caret or the text changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Word(usize),
    Line(usize),
}

impl NoteBuffer {
    /// Create an empty buffer with the default history depth.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer keeping at most `capacity` versions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: History::new(capacity),
            caret: 0,
            anchor: None,
        }
    }

    /// Create a buffer whose first version is `text`.
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.renew(text);
        buf
    }

    // --- Queries ---

    /// The current snapshot.
    pub fn rope(&self) -> Rope {
        self.history.current()
    }

    /// The current text.
    pub fn text(&self) -> String {
        self.history.current().to_string()
    }

    /// Length of the current text in chars.
    pub fn len_chars(&self) -> usize {
        self.history.current().len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Caret offset, clamped to the current text.
    pub fn caret(&self) -> usize {
        self.caret.min(self.len_chars())
    }

    /// Index of the current version (0 = newest).
    pub const fn version(&self) -> usize {
        self.history.version()
    }

    /// Number of versions held.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Maximum number of versions held.
    pub const fn capacity(&self) -> usize {
        self.history.capacity()
    }

    /// The current text split on spaces.
    pub fn words(&self) -> Vec<String> {
        self.text().split(' ').map(ToOwned::to_owned).collect()
    }

    /// The current text split on newlines.
    pub fn lines(&self) -> Vec<String> {
        self.text().split('\n').map(ToOwned::to_owned).collect()
    }

    pub fn word_segments(&self) -> Segments {
        Segments::words(&self.text())
    }

    pub fn line_segments(&self) -> Segments {
        Segments::lines(&self.text())
    }

    /// 1-based number of the word under the caret.
    pub fn word_at_caret(&self) -> usize {
        let words = self.word_segments();
        match self.anchor {
            Some(Anchor::Word(n)) => words.clamp_index(n),
            _ => words.index_at(self.caret()),
        }
    }

    /// 1-based number of the line under the caret.
    pub fn line_at_caret(&self) -> usize {
        let lines = self.line_segments();
        match self.anchor {
            Some(Anchor::Line(n)) => lines.clamp_index(n),
            _ => lines.index_at(self.caret()),
        }
    }

    /// The current text with `marker` inserted at the caret.
    pub fn text_with_caret(&self, marker: char) -> String {
        let mut rope = self.history.current();
        rope.insert_char(self.caret.min(rope.len_chars()), marker);
        rope.to_string()
    }

    // --- Caret movement (never commits) ---

    pub fn move_caret_to(&mut self, offset: usize) {
        self.caret = offset.min(self.len_chars());
        self.anchor = None;
    }

    pub fn move_caret_by(&mut self, delta: isize) {
        let caret = self.caret().saturating_add_signed(delta);
        self.move_caret_to(caret);
    }

    /// Put the caret at the start of word `n`; it stays the current word
    /// until the caret moves again.
    pub fn move_to_word(&mut self, n: usize) {
        let words = self.word_segments();
        let n = words.clamp_index(n);
        self.caret = words.start_offset(n);
        self.anchor = Some(Anchor::Word(n));
    }

    /// Put the caret at the start of line `n`; it stays the current line
    /// until the caret moves again.
    pub fn move_to_line(&mut self, n: usize) {
        let lines = self.line_segments();
        let n = lines.clamp_index(n);
        self.caret = lines.start_offset(n);
        self.anchor = Some(Anchor::Line(n));
    }

    // --- History ---

    /// Make `text` the newest version with the caret at its end.
    fn commit(&mut self, text: Rope) {
        self.caret = text.len_chars();
        self.anchor = None;
        self.history.commit(text);
    }

    /// Step back `step` versions. The caret is left where it was.
    pub fn undo(&mut self, step: usize) -> bool {
        if !self.history.undo(step) {
            return false;
        }
        self.anchor = None;
        true
    }

    /// Step forward `step` versions and move the caret to the end.
    pub fn redo(&mut self, step: usize) -> bool {
        if !self.history.redo(step) {
            return false;
        }
        self.caret = self.len_chars();
        self.anchor = None;
        true
    }

    // --- Edit primitives ---

    /// Replace the whole text with `text`.
    pub fn renew(&mut self, text: &str) {
        self.commit(Rope::from_str(text));
    }

    /// Insert `text` at `offset`; the caret ends after it.
    pub fn insert_at(&mut self, offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut rope = self.history.current();
        let offset = offset.min(rope.len_chars());
        rope.insert(offset, text);
        self.commit(rope);
        self.caret = offset + text.chars().count();
    }

    /// Remove `count` chars starting at `offset`; the caret ends at `offset`.
    pub fn remove_range(&mut self, offset: usize, count: usize) {
        let mut rope = self.history.current();
        let len = rope.len_chars();
        let start = offset.min(len);
        let end = start.saturating_add(count).min(len);
        if start == end {
            return;
        }
        rope.remove(start..end);
        self.commit(rope);
        self.caret = start;
    }

    /// Insert `text` before the char under the caret.
    pub fn insert_char(&mut self, text: &str) {
        let at = char_index_at_caret(self.len_chars(), self.caret());
        self.insert_at(at, text);
    }

    /// Delete the `n`th char (1-based, clamped to the last one).
    pub fn delete_char(&mut self, n: usize) {
        let at = char_index_at_caret(self.len_chars(), n.saturating_sub(1));
        self.remove_range(at, 1);
    }

    pub fn insert_at_word(&mut self, n: usize, text: &str) {
        let words = self.word_segments();
        self.insert_at(words.start_offset(words.clamp_index(n)), text);
    }

    pub fn append_after_word(&mut self, n: usize, text: &str) {
        let words = self.word_segments();
        self.insert_at(words.end_offset(words.clamp_index(n)), text);
    }

    pub fn insert_at_line(&mut self, n: usize, text: &str) {
        let lines = self.line_segments();
        self.insert_at(lines.start_offset(lines.clamp_index(n)), text);
    }

    pub fn append_after_line(&mut self, n: usize, text: &str) {
        let lines = self.line_segments();
        self.insert_at(lines.end_offset(lines.clamp_index(n)), text);
    }

    /// Open a new line holding `text` below line `n`.
    pub fn new_line_below(&mut self, n: usize, text: &str) {
        let lines = self.line_segments();
        let at = lines.end_offset(lines.clamp_index(n));
        self.insert_at(at, &format!("\n{text}"));
    }

    /// Open a new line holding `text` above line `n`.
    ///
    /// The caret ends on the new line, after `text`.
    pub fn new_line_above(&mut self, n: usize, text: &str) {
        let lines = self.line_segments();
        let at = lines.start_offset(lines.clamp_index(n));
        self.insert_at(at, &format!("{text}\n"));
        self.caret = at + text.chars().count();
    }

    /// Replace the first occurrence of `find` with `replace`.
    ///
    /// Returns `false` when `find` is empty or absent.
    pub fn replace_first(&mut self, find: &str, replace: &str) -> bool {
        if find.is_empty() {
            return false;
        }
        let text = self.text();
        let Some(byte_idx) = text.find(find) else {
            return false;
        };
        let start = text[..byte_idx].chars().count();
        let mut rope = Rope::from_str(&text);
        rope.remove(start..start + find.chars().count());
        rope.insert(start, replace);
        self.commit(rope);
        self.caret = start + replace.chars().count();
        true
    }

    /// Replace every occurrence of `find` with `replace` in one version.
    ///
    /// When `replace` is shorter than `find` the text is scanned again until
    /// no occurrence remains, so matches formed by a replacement are caught
    /// too. Otherwise a single left-to-right pass is made, which keeps a
    /// replacement that reintroduces `find` from looping. Returns the number
    /// of replacements.
    pub fn replace_all(&mut self, find: &str, replace: &str) -> usize {
        if find.is_empty() || find == replace {
            return 0;
        }
        let shrinks = replace.chars().count() < find.chars().count();
        let mut text = self.text();
        let mut caret = 0;
        let mut count = 0;
        while let Some((next, last_end, replaced)) = replace_pass(&text, find, replace) {
            text = next;
            caret = last_end;
            count += replaced;
            if !shrinks {
                break;
            }
        }
        if count == 0 {
            return 0;
        }
        self.commit(Rope::from_str(&text));
        self.caret = caret;
        count
    }

    /// Delete word `n` along with one adjacent space.
    pub fn delete_word(&mut self, n: usize) {
        let range = self.word_segments().removal_range(n);
        self.remove_range(range.start, range.len());
    }

    /// Delete line `n` along with one adjacent newline.
    pub fn delete_line(&mut self, n: usize) {
        let range = self.line_segments().removal_range(n);
        self.remove_range(range.start, range.len());
    }

    /// Commit an empty version.
    pub fn clear(&mut self) {
        self.commit(Rope::new());
    }

    /// Forget every version, as if the buffer had just been created.
    pub fn clear_all(&mut self) {
        self.history.clear();
        self.caret = 0;
        self.anchor = None;
    }

    // --- Clipboard ---

    /// Write the current text to `clipboard`.
    ///
    /// # Errors
    ///
    /// Returns the clipboard's error; the buffer is untouched either way.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> Result<(), ClipboardError> {
        let text = self.text();
        clipboard.set_text(&text)
    }

    /// Copy, then clear. Nothing is cleared if the copy failed.
    ///
    /// # Errors
    ///
    /// Returns the clipboard's error.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> Result<(), ClipboardError> {
        self.copy(clipboard)?;
        self.clear();
        Ok(())
    }
}

/// One non-overlapping left-to-right pass. Returns the new text, the char
/// offset just past the last replacement, and how many were made.
fn replace_pass(text: &str, find: &str, replace: &str) -> Option<(String, usize, usize)> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut caret = 0;
    let mut count = 0;
    for (byte_idx, _) in text.match_indices(find) {
        out.push_str(&text[last..byte_idx]);
        out.push_str(replace);
        caret = out.chars().count();
        last = byte_idx + find.len();
        count += 1;
    }
    if count == 0 {
        return None;
    }
    out.push_str(&text[last..]);
    Some((out, caret, count))
}

impl Default for NoteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NoteBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteBuffer")
            .field("chars", &self.len_chars())
            .field("caret", &self.caret())
            .field("history", &self.history)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{MemoryClipboard, NoClipboard};

    // --- Construction and queries ---

    #[test]
    fn test_new_buffer_is_empty() {
        let buf = NoteBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.text(), "");
        assert_eq!(buf.caret(), 0);
        assert_eq!(buf.version(), 0);
        assert_eq!(buf.history_len(), 0);
        assert_eq!(buf.word_at_caret(), 1);
        assert_eq!(buf.line_at_caret(), 1);
    }

    #[test]
    fn test_from_text_puts_caret_at_end() {
        let buf = NoteBuffer::from_text("hello world");
        assert_eq!(buf.text(), "hello world");
        assert_eq!(buf.caret(), 11);
        assert_eq!(buf.history_len(), 1);
    }

    #[test]
    fn test_words_and_lines_are_derived() {
        let buf = NoteBuffer::from_text("a b\nc d");
        assert_eq!(buf.words(), vec!["a", "b\nc", "d"]);
        assert_eq!(buf.lines(), vec!["a b", "c d"]);
    }

    #[test]
    fn test_text_with_caret_does_not_mutate() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.move_caret_to(2);
        assert_eq!(buf.text_with_caret('|'), "he|llo");
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.history_len(), 1);
    }

    #[test]
    fn test_text_with_caret_on_empty_buffer() {
        assert_eq!(NoteBuffer::new().text_with_caret('|'), "|");
    }

    // --- Caret movement ---

    #[test]
    fn test_move_caret_clamps() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.move_caret_to(100);
        assert_eq!(buf.caret(), 5);
        buf.move_caret_by(-100);
        assert_eq!(buf.caret(), 0);
        buf.move_caret_by(3);
        assert_eq!(buf.caret(), 3);
    }

    #[test]
    fn test_moved_to_word_stays_current() {
        let mut buf = NoteBuffer::from_text("a b c d");
        buf.move_to_word(3);
        assert_eq!(buf.caret(), 4);
        assert_eq!(buf.word_at_caret(), 3);
        buf.move_caret_by(0);
        assert_eq!(buf.word_at_caret(), 2);
    }

    #[test]
    fn test_moved_to_empty_line_stays_current() {
        let mut buf = NoteBuffer::from_text("one\n\nthree");
        buf.move_to_line(2);
        assert_eq!(buf.caret(), 4);
        assert_eq!(buf.line_at_caret(), 2);
        buf.move_to_line(3);
        assert_eq!(buf.line_at_caret(), 3);
        buf.renew("x");
        assert_eq!(buf.line_at_caret(), 1);
    }

    #[test]
    fn test_move_to_word_and_line() {
        let mut buf = NoteBuffer::from_text("one two\nthree four");
        buf.move_to_word(2);
        assert_eq!(buf.caret(), 4);
        buf.move_to_line(2);
        assert_eq!(buf.caret(), 8);
        buf.move_to_line(1);
        assert_eq!(buf.caret(), 0);
        buf.move_to_word(99);
        assert_eq!(buf.caret(), 14);
    }

    // --- insert / remove ---

    #[test]
    fn test_insert_at_moves_caret_past_text() {
        let mut buf = NoteBuffer::from_text("hd");
        buf.insert_at(1, "ello worl");
        assert_eq!(buf.text(), "hello world");
        assert_eq!(buf.caret(), 10);
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.insert_at(0, "");
        assert_eq!(buf.history_len(), 1);
    }

    #[test]
    fn test_insert_at_clamps_offset() {
        let mut buf = NoteBuffer::from_text("hi");
        buf.insert_at(50, "!");
        assert_eq!(buf.text(), "hi!");
    }

    #[test]
    fn test_remove_range_clamps_and_sets_caret() {
        let mut buf = NoteBuffer::from_text("hello world");
        buf.remove_range(5, 100);
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.caret(), 5);
    }

    #[test]
    fn test_remove_empty_range_is_noop() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.remove_range(5, 3);
        assert_eq!(buf.history_len(), 1);
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        let mut buf = NoteBuffer::from_text("café");
        buf.insert_at(4, "!");
        assert_eq!(buf.text(), "café!");
        buf.remove_range(3, 1);
        assert_eq!(buf.text(), "caf!");
    }

    // --- char primitives ---

    #[test]
    fn test_insert_char_goes_before_char_under_caret() {
        let mut buf = NoteBuffer::from_text("helo");
        buf.move_caret_to(3);
        buf.insert_char("l");
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_insert_char_at_end_goes_before_last_char() {
        let mut buf = NoteBuffer::from_text("ab");
        buf.insert_char("x");
        assert_eq!(buf.text(), "axb");
    }

    #[test]
    fn test_delete_char() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.delete_char(1);
        assert_eq!(buf.text(), "ello");
        buf.delete_char(99);
        assert_eq!(buf.text(), "ell");
    }

    #[test]
    fn test_delete_char_on_empty_is_noop() {
        let mut buf = NoteBuffer::new();
        buf.delete_char(1);
        assert_eq!(buf.history_len(), 0);
    }

    // --- word and line primitives ---

    #[test]
    fn test_insert_at_word() {
        let mut buf = NoteBuffer::from_text("hello world");
        buf.insert_at_word(2, "big ");
        assert_eq!(buf.text(), "hello big world");
        assert_eq!(buf.caret(), 10);
    }

    #[test]
    fn test_append_after_word_excludes_delimiter() {
        let mut buf = NoteBuffer::from_text("hello world");
        buf.append_after_word(1, "!");
        assert_eq!(buf.text(), "hello! world");
        buf.append_after_word(2, "?");
        assert_eq!(buf.text(), "hello! world?");
    }

    #[test]
    fn test_insert_and_append_line() {
        let mut buf = NoteBuffer::from_text("one\ntwo");
        buf.insert_at_line(2, "- ");
        assert_eq!(buf.text(), "one\n- two");
        buf.append_after_line(1, ":");
        assert_eq!(buf.text(), "one:\n- two");
    }

    #[test]
    fn test_new_line_below() {
        let mut buf = NoteBuffer::from_text("one\nthree");
        buf.new_line_below(1, "two");
        assert_eq!(buf.text(), "one\ntwo\nthree");
        assert_eq!(buf.caret(), 7);
    }

    #[test]
    fn test_new_line_below_last_line() {
        let mut buf = NoteBuffer::from_text("one");
        buf.new_line_below(1, "two");
        assert_eq!(buf.text(), "one\ntwo");
    }

    #[test]
    fn test_new_line_above() {
        let mut buf = NoteBuffer::from_text("two\nthree");
        buf.new_line_above(1, "one");
        assert_eq!(buf.text(), "one\ntwo\nthree");
        assert_eq!(buf.caret(), 3);
    }

    #[test]
    fn test_delete_word() {
        let mut buf = NoteBuffer::from_text("hello big world");
        buf.delete_word(2);
        assert_eq!(buf.text(), "hello world");
        buf.delete_word(2);
        assert_eq!(buf.text(), "hello");
        buf.delete_word(1);
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_delete_line() {
        let mut buf = NoteBuffer::from_text("one\ntwo\nthree");
        buf.delete_line(1);
        assert_eq!(buf.text(), "two\nthree");
        buf.delete_line(5);
        assert_eq!(buf.text(), "two");
    }

    // --- replace ---

    #[test]
    fn test_replace_first() {
        let mut buf = NoteBuffer::from_text("hello world world");
        assert!(buf.replace_first("world", "there"));
        assert_eq!(buf.text(), "hello there world");
        assert_eq!(buf.caret(), 11);
        assert_eq!(buf.history_len(), 2);
    }

    #[test]
    fn test_replace_first_with_itself_still_commits() {
        let mut buf = NoteBuffer::from_text("a b a");
        buf.move_caret_to(0);
        assert!(buf.replace_first("a", "a"));
        assert_eq!(buf.text(), "a b a");
        assert_eq!(buf.caret(), 1);
        assert_eq!(buf.history_len(), 2);
    }

    #[test]
    fn test_replace_first_absent_is_noop() {
        let mut buf = NoteBuffer::from_text("hello");
        assert!(!buf.replace_first("xyz", "abc"));
        assert_eq!(buf.history_len(), 1);
    }

    #[test]
    fn test_replace_all_is_one_version() {
        let mut buf = NoteBuffer::from_text("a-b-c");
        assert_eq!(buf.replace_all("-", "+"), 2);
        assert_eq!(buf.text(), "a+b+c");
        assert_eq!(buf.caret(), 4);
        assert_eq!(buf.history_len(), 2);
    }

    #[test]
    fn test_replace_all_with_itself_is_noop() {
        let mut buf = NoteBuffer::from_text("aaa");
        assert_eq!(buf.replace_all("a", "a"), 0);
        assert_eq!(buf.history_len(), 1);
    }

    #[test]
    fn test_replace_all_terminates_when_replacement_contains_find() {
        let mut buf = NoteBuffer::from_text("a b a");
        assert_eq!(buf.replace_all("a", "aa"), 2);
        assert_eq!(buf.text(), "aa b aa");
    }

    #[test]
    fn test_replace_all_catches_matches_formed_by_replacement() {
        let mut buf = NoteBuffer::from_text("aab");
        assert_eq!(buf.replace_all("ab", "b"), 2);
        assert_eq!(buf.text(), "b");
        assert_eq!(buf.caret(), 1);
        assert_eq!(buf.history_len(), 2);
    }

    #[test]
    fn test_replace_all_deletes_until_gone() {
        let mut buf = NoteBuffer::from_text("x((()))y");
        assert_eq!(buf.replace_all("()", ""), 3);
        assert_eq!(buf.text(), "xy");
    }

    // --- clear ---

    #[test]
    fn test_clear_is_undoable() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.clear();
        assert_eq!(buf.text(), "");
        assert!(buf.undo(1));
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_clear_all_forgets_history() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.renew("world");
        buf.clear_all();
        assert_eq!(buf.text(), "");
        assert_eq!(buf.history_len(), 0);
        assert!(!buf.undo(1));
    }

    // --- undo / redo ---

    #[test]
    fn test_undo_keeps_caret_redo_moves_it_to_end() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.renew("hello world");
        buf.move_caret_to(3);
        assert!(buf.undo(1));
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.caret(), 3);
        assert!(buf.redo(1));
        assert_eq!(buf.text(), "hello world");
        assert_eq!(buf.caret(), 11);
    }

    #[test]
    fn test_caret_is_clamped_after_undo_to_shorter_text() {
        let mut buf = NoteBuffer::from_text("hi");
        buf.renew("hello world");
        buf.undo(1);
        assert_eq!(buf.caret(), 2);
    }

    #[test]
    fn test_oldest_version_unreachable_after_overflow() {
        let mut buf = NoteBuffer::new();
        for i in 0..=buf.capacity() {
            buf.renew(&format!("v{i}"));
        }
        assert!(!buf.undo(buf.capacity()));
        assert!(buf.undo(buf.capacity() - 1));
        assert_eq!(buf.text(), "v1");
    }

    // --- clipboard ---

    #[test]
    fn test_copy_writes_text() {
        let buf = NoteBuffer::from_text("hello");
        let mut clipboard = MemoryClipboard::default();
        buf.copy(&mut clipboard).unwrap();
        assert_eq!(clipboard.contents(), Some("hello"));
    }

    #[test]
    fn test_cut_clears_after_copy() {
        let mut buf = NoteBuffer::from_text("hello");
        let mut clipboard = MemoryClipboard::default();
        buf.cut(&mut clipboard).unwrap();
        assert_eq!(clipboard.contents(), Some("hello"));
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_failed_cut_keeps_text() {
        let mut buf = NoteBuffer::from_text("hello");
        assert!(buf.cut(&mut NoClipboard).is_err());
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.history_len(), 1);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn insert_then_remove_restores_text(
                base in "[a-z \n]{0,30}",
                insert in "[a-z]{1,10}",
                offset in 0..40usize,
            ) {
                let mut buf = NoteBuffer::from_text(&base);
                let offset = offset.min(base.chars().count());
                buf.insert_at(offset, &insert);
                buf.remove_range(offset, insert.chars().count());
                prop_assert_eq!(buf.text(), base);
            }

            #[test]
            fn undo_then_redo_restores_text_and_caret(
                texts in proptest::collection::vec("[a-z ]{0,12}", 1..12),
                step in 1..9usize,
            ) {
                let mut buf = NoteBuffer::new();
                for text in &texts {
                    buf.renew(text);
                }
                let before = buf.text();
                if buf.undo(step) {
                    prop_assert!(buf.redo(step));
                }
                prop_assert_eq!(buf.text(), before.clone());
                prop_assert_eq!(buf.caret(), before.chars().count());
            }

            #[test]
            fn caret_and_version_stay_in_bounds(
                ops in proptest::collection::vec((0..8u8, 0..12usize), 0..40),
            ) {
                let mut buf = NoteBuffer::with_capacity(4);
                for (op, n) in ops {
                    match op {
                        0 => buf.renew("alpha beta\ngamma"),
                        1 => buf.insert_at_word(n, "x "),
                        2 => buf.delete_word(n),
                        3 => buf.delete_line(n),
                        4 => { buf.undo(n); }
                        5 => { buf.redo(n); }
                        6 => buf.new_line_below(n, "y"),
                        _ => buf.move_caret_by(n as isize - 6),
                    }
                    prop_assert!(buf.caret() <= buf.len_chars());
                    prop_assert!(buf.version() < buf.capacity());
                    prop_assert!(buf.version() <= buf.history_len().saturating_sub(1));
                    prop_assert!(buf.word_at_caret() >= 1);
                    prop_assert!(buf.line_at_caret() >= 1);
                }
            }
        }
    }
}
