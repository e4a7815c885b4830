//! TextBuffer: the document as an ordered sequence of lines
//!
//! Text is held in a ropey `Rope` built without CR or Unicode line-break
//! support, so rope lines correspond exactly to splitting the text on `'\n'`.
//! An empty document is one empty line; the buffer never has zero lines.
//!
//! All coordinates are `(row, col)` in characters. Out-of-range coordinates are
//! a caller bug: they trip a debug assertion and are not reported as errors.

use ropey::Rope;

use crate::core::position::LineLengths;

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    /// Text content stored in a Rope (O(log n) line lookups)
    rope: Rope,
}

impl TextBuffer {
    /// Create a buffer holding a single empty line
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a buffer from text, splitting lines on `'\n'`
    pub fn from_text(text: impl AsRef<str>) -> Self {
        Self {
            rope: Rope::from_str(text.as_ref()),
        }
    }

    /// Replace the whole document
    pub fn load_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Whole document with lines joined by `'\n'`
    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    // ==================== Line Access ====================

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Length of `row` in characters, excluding the line break
    pub fn line_len(&self, row: usize) -> usize {
        debug_assert!(row < self.line_count(), "row {row} out of range");
        let line = self.rope.line(row);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Content of `row` without its line break
    pub fn line(&self, row: usize) -> String {
        let start = self.rope.line_to_char(row);
        self.rope.slice(start..start + self.line_len(row)).to_string()
    }

    /// Iterate over all lines without their line breaks
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.line_count()).map(|row| self.line(row))
    }

    fn char_index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.line_count(), "row {row} out of range");
        debug_assert!(
            col <= self.line_len(row),
            "col {col} out of range on row {row}"
        );
        self.rope.line_to_char(row) + col
    }

    // ==================== Editing Operations ====================

    /// Insert `text` (no line breaks) at `(row, col)`
    pub fn insert(&mut self, row: usize, col: usize, text: &str) {
        debug_assert!(!text.contains('\n'), "inserted text must not span lines");
        if text.is_empty() {
            return;
        }
        let idx = self.char_index(row, col);
        self.rope.insert(idx, text);
    }

    /// Delete columns `[col_start, col_end)` on `row`
    pub fn delete_range(&mut self, row: usize, col_start: usize, col_end: usize) {
        debug_assert!(col_start <= col_end, "inverted range {col_start}..{col_end}");
        if col_start >= col_end {
            return;
        }
        let start = self.char_index(row, col_start);
        let end = self.char_index(row, col_end);
        self.rope.remove(start..end);
    }

    /// Break `row` at `col`; the tail becomes line `row + 1`
    pub fn split_line(&mut self, row: usize, col: usize) {
        let idx = self.char_index(row, col);
        self.rope.insert_char(idx, '\n');
    }

    /// Append line `row_b` to `row_a` and remove `row_b`
    pub fn join_line(&mut self, row_a: usize, row_b: usize) {
        debug_assert_eq!(row_b, row_a + 1, "only adjacent lines can be joined");
        let idx = self.char_index(row_a, self.line_len(row_a));
        self.rope.remove(idx..idx + 1);
    }

    /// Remove `row` entirely and return its content
    ///
    /// Popping the only line leaves one empty line behind.
    pub fn pop_line(&mut self, row: usize) -> String {
        debug_assert!(row < self.line_count(), "row {row} out of range");
        let removed = self.line(row);
        let count = self.line_count();
        let range = if row + 1 < count {
            self.rope.line_to_char(row)..self.rope.line_to_char(row + 1)
        } else if row > 0 {
            // last line: take the break that precedes it
            self.rope.line_to_char(row) - 1..self.rope.len_chars()
        } else {
            0..self.rope.len_chars()
        };
        self.rope.remove(range);
        removed
    }

    /// Insert a new line so that it becomes line `row`
    ///
    /// `row` may equal `line_count()` to append after the last line.
    pub fn insert_line(&mut self, row: usize, text: &str) {
        debug_assert!(row <= self.line_count(), "row {row} out of range");
        debug_assert!(!text.contains('\n'), "inserted line must not span lines");
        if row < self.line_count() {
            let idx = self.rope.line_to_char(row);
            self.rope.insert(idx, &format!("{text}\n"));
        } else {
            let idx = self.rope.len_chars();
            self.rope.insert(idx, &format!("\n{text}"));
        }
    }
}

impl LineLengths for TextBuffer {
    fn line_count(&self) -> usize {
        TextBuffer::line_count(self)
    }

    fn line_len(&self, row: usize) -> usize {
        TextBuffer::line_len(self, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(buf: &TextBuffer) -> Vec<String> {
        buf.lines().collect()
    }

    #[test]
    fn test_new_buffer_has_one_empty_line() {
        let buf = TextBuffer::new();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_len(0), 0);
        assert_eq!(buf.content(), "");
    }

    #[test]
    fn test_lines_split_only_on_newline() {
        let buf = TextBuffer::from_text("a\r\nb\u{2028}c\n");
        assert_eq!(lines(&buf), vec!["a\r", "b\u{2028}c", ""]);
        assert_eq!(buf.line_len(0), 2);
    }

    #[test]
    fn test_insert_and_delete_range() {
        let mut buf = TextBuffer::from_text("hello\nworld");
        buf.insert(1, 5, "!!");
        buf.insert(0, 0, ">");
        assert_eq!(buf.content(), ">hello\nworld!!");

        buf.delete_range(0, 1, 3);
        assert_eq!(buf.content(), ">llo\nworld!!");
        buf.delete_range(1, 2, 2);
        assert_eq!(buf.line(1), "world!!");
    }

    #[test]
    fn test_columns_count_characters_not_bytes() {
        let mut buf = TextBuffer::from_text("héllo");
        assert_eq!(buf.line_len(0), 5);
        buf.delete_range(0, 1, 2);
        assert_eq!(buf.content(), "hllo");
    }

    #[test]
    fn test_split_and_join_are_inverse() {
        let mut buf = TextBuffer::from_text("abcdef\nxyz");
        buf.split_line(0, 2);
        assert_eq!(lines(&buf), vec!["ab", "cdef", "xyz"]);
        buf.join_line(0, 1);
        assert_eq!(buf.content(), "abcdef\nxyz");
    }

    #[test]
    fn test_split_at_line_end_appends_blank_line() {
        let mut buf = TextBuffer::from_text("abc");
        buf.split_line(0, 3);
        assert_eq!(lines(&buf), vec!["abc", ""]);
    }

    #[test]
    fn test_pop_line_positions() {
        let mut buf = TextBuffer::from_text("one\ntwo\nthree");
        assert_eq!(buf.pop_line(1), "two");
        assert_eq!(buf.content(), "one\nthree");
        assert_eq!(buf.pop_line(1), "three");
        assert_eq!(buf.content(), "one");
        assert_eq!(buf.pop_line(0), "one");
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.content(), "");
    }

    #[test]
    fn test_insert_line_inside_and_at_end() {
        let mut buf = TextBuffer::from_text("a\nc");
        buf.insert_line(1, "b");
        buf.insert_line(3, "d");
        buf.insert_line(0, "");
        assert_eq!(buf.content(), "\na\nb\nc\nd");
    }

    #[test]
    fn test_load_text_replaces_document() {
        let mut buf = TextBuffer::from_text("old");
        buf.load_text("new\ntext\n");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.content(), "new\ntext\n");
    }
}
