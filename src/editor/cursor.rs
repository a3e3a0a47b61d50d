//! Word and line addressing over a text snapshot.
//!
//! Everything here is pure: a [`Segments`] value is built from a text and
//! answers offset questions about it. Offsets count `char`s. Word and line
//! numbers are 1-based; number 0 addresses the position before the first
//! segment.

/// Delimiter between words.
pub const WORD_DELIMITER: char = ' ';
/// Delimiter between lines.
pub const LINE_DELIMITER: char = '\n';

/// Char lengths of the pieces of a text split on one delimiter.
///
/// Splitting never produces an empty list: `""` is one empty segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments {
    lens: Vec<usize>,
    total: usize,
}

impl Segments {
    /// Split `text` on `delimiter`.
    pub fn new(text: &str, delimiter: char) -> Self {
        let lens: Vec<usize> = text.split(delimiter).map(|s| s.chars().count()).collect();
        let total = lens.iter().sum::<usize>() + lens.len().saturating_sub(1);
        Self { lens, total }
    }

    /// Segments of `text` split on spaces.
    pub fn words(text: &str) -> Self {
        Self::new(text, WORD_DELIMITER)
    }

    /// Segments of `text` split on newlines.
    pub fn lines(text: &str) -> Self {
        Self::new(text, LINE_DELIMITER)
    }

    /// Number of segments (always at least 1).
    pub fn count(&self) -> usize {
        self.lens.len()
    }

    /// Char length of the text these segments were built from.
    pub const fn text_len(&self) -> usize {
        self.total
    }

    /// Char length of segment `n`, or 0 when `n` is out of range.
    pub fn len_of(&self, n: usize) -> usize {
        n.checked_sub(1)
            .and_then(|i| self.lens.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Offset just past the delimiter that follows the first `n` segments.
    ///
    /// `n` is clamped to `[0, count]`. For `n == count` this is one past the
    /// end of the text, since the last segment has no delimiter.
    pub fn prefix_len(&self, n: usize) -> usize {
        let n = n.min(self.lens.len());
        self.lens[..n].iter().map(|len| len + 1).sum()
    }

    /// The segment containing `caret`.
    ///
    /// A caret sitting right after a segment (on its delimiter) belongs to
    /// that segment, not to the next one.
    pub fn index_at(&self, caret: usize) -> usize {
        let mut reach = 0;
        for (i, len) in self.lens.iter().enumerate() {
            reach += len + 1;
            if reach >= caret {
                return i + 1;
            }
        }
        self.lens.len()
    }

    /// Clamp a segment number into `[1, count]`.
    pub fn clamp_index(&self, n: usize) -> usize {
        n.clamp(1, self.lens.len())
    }

    /// Offset of the first char of segment `n`.
    pub fn start_offset(&self, n: usize) -> usize {
        self.prefix_len(n.saturating_sub(1)).min(self.total)
    }

    /// Offset just past the last char of segment `n`, delimiter excluded.
    pub fn end_offset(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let n = n.min(self.lens.len());
        self.start_offset(n) + self.len_of(n)
    }

    /// Range to remove when deleting segment `n` together with one of its
    /// delimiters: the trailing one when there is one, else the leading one.
    pub fn removal_range(&self, n: usize) -> std::ops::Range<usize> {
        let n = self.clamp_index(n);
        let start = self.start_offset(n);
        let end = self.end_offset(n);
        if n < self.lens.len() {
            start..end + 1
        } else if n > 1 {
            start - 1..end
        } else {
            start..end
        }
    }
}

/// Index of the char the caret sits on: `min(caret, max(len - 1, 0))`.
pub const fn char_index_at_caret(len: usize, caret: usize) -> usize {
    let last = len.saturating_sub(1);
    if caret < last { caret } else { last }
}
