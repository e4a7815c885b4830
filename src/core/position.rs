//! Caret coordinates and wrap-aware motion.
//!
//! A [`Position`] addresses a character cell as `(row, col)`. The column may
//! equal the line length, meaning "after the last character". Horizontal motion
//! wraps across line breaks, crediting each crossed line with `max(1, len)`
//! columns, so a single step crosses exactly one break and an empty line costs
//! one column. Vertical motion never wraps, it only re-clamps the column to the
//! new line.
//!
//! There is no sentinel value: an unset position is an `Option<Position>`.

use std::fmt;

/// Read-only line geometry needed by motion arithmetic.
///
/// Implemented by [`TextBuffer`](crate::core::buffer::TextBuffer) and by plain
/// slices of strings, so motion can be exercised without a full buffer.
pub trait LineLengths {
    /// Number of lines, always at least one.
    fn line_count(&self) -> usize;
    /// Length of `row` in characters, excluding the line break.
    fn line_len(&self, row: usize) -> usize;
}

impl<S: AsRef<str>> LineLengths for [S] {
    fn line_count(&self) -> usize {
        self.len().max(1)
    }

    fn line_len(&self, row: usize) -> usize {
        self.get(row).map_or(0, |line| line.as_ref().chars().count())
    }
}

/// A `(row, col)` cursor coordinate, ordered row first then column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Strictly before `other`.
    pub fn is_before(&self, other: &Position) -> bool {
        self < other
    }

    /// Strictly after `other`.
    pub fn is_after(&self, other: &Position) -> bool {
        self > other
    }

    /// `first <= self <= second`, inclusive at both ends.
    pub fn is_between(&self, first: &Position, second: &Position) -> bool {
        first <= self && self <= second
    }

    /// Pull the position back inside `lines`.
    pub fn clamp_to(&mut self, lines: &(impl LineLengths + ?Sized)) {
        let last = lines.line_count().saturating_sub(1);
        self.row = self.row.min(last);
        self.col = self.col.min(lines.line_len(self.row));
    }

    /// End of the last line.
    pub fn end_of(lines: &(impl LineLengths + ?Sized)) -> Self {
        let row = lines.line_count().saturating_sub(1);
        Self::new(row, lines.line_len(row))
    }

    /// Move `n` columns toward the start of the document, crossing line breaks.
    ///
    /// Each line crossed credits `max(1, len)` columns; the column landed on is
    /// then shifted by `min(1, len)` so it sits past the line-start boundary.
    /// Overrunning the start clamps to `(0, 0)`.
    pub fn move_left(&mut self, lines: &(impl LineLengths + ?Sized), n: usize) {
        self.clamp_to(lines);
        if n <= self.col {
            self.col -= n;
            return;
        }

        let mut deficit = n - self.col;
        while self.row > 0 {
            self.row -= 1;
            let len = lines.line_len(self.row);
            let credit = len.max(1);
            if credit >= deficit {
                self.col = credit - deficit + len.min(1);
                return;
            }
            deficit -= credit;
        }
        *self = Self::ORIGIN;
    }

    /// Move `n` columns toward the end of the document, crossing line breaks.
    ///
    /// Mirror of [`move_left`](Self::move_left): each line entered credits
    /// `max(1, len)` columns. Overrunning the end clamps to the end of the last
    /// line.
    pub fn move_right(&mut self, lines: &(impl LineLengths + ?Sized), n: usize) {
        self.clamp_to(lines);
        let len = lines.line_len(self.row);
        let target = self.col.saturating_add(n);
        if target <= len {
            self.col = target;
            return;
        }

        let last = lines.line_count().saturating_sub(1);
        let mut excess = target - len;
        while self.row < last {
            self.row += 1;
            let len = lines.line_len(self.row);
            let credit = len.max(1);
            if credit >= excess {
                self.col = len + excess - credit - len.min(1);
                return;
            }
            excess -= credit;
        }
        *self = Self::end_of(lines);
    }

    pub fn move_up(&mut self, lines: &(impl LineLengths + ?Sized), n: usize) {
        self.row = self.row.saturating_sub(n);
        self.clamp_to(lines);
    }

    pub fn move_down(&mut self, lines: &(impl LineLengths + ?Sized), n: usize) {
        self.row = self.row.saturating_add(n);
        self.clamp_to(lines);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
