//! The window of the document visible below the header.
//!
//! Both corners are document positions. `top` is the first visible row and
//! column; `bottom_right` is one past the last row the caret may occupy and the
//! column the caret may not reach. Scrolling moves both corners together so the
//! window size only changes on resize.

use std::ops::Range;

use crate::core::position::Position;

/// Screen rows taken by the header line and the rule under it
pub const HEADER_ROWS: usize = 2;

/// Screen columns left of the first text column
pub const LEFT_MARGIN: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    top: Position,
    bottom_right: Position,
}

impl Viewport {
    /// A viewport at the document origin for a `height` x `width` screen
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            top: Position::ORIGIN,
            bottom_right: Position::new(
                height.saturating_sub(HEADER_ROWS).max(1),
                width.saturating_sub(LEFT_MARGIN).max(1),
            ),
        }
    }

    /// Reset to the origin with a new screen size; the next scroll re-centers
    pub fn resize(&mut self, height: usize, width: usize) {
        *self = Self::new(height, width);
    }

    pub fn top(&self) -> Position {
        self.top
    }

    pub fn bottom_right(&self) -> Position {
        self.bottom_right
    }

    /// Shift the window the minimum amount that brings `caret` into view
    pub fn scroll_to(&mut self, caret: Position) {
        if caret.row < self.top.row {
            let by = self.top.row - caret.row;
            self.top.row -= by;
            self.bottom_right.row -= by;
        } else if caret.row >= self.bottom_right.row {
            let by = caret.row - self.bottom_right.row + 1;
            self.top.row += by;
            self.bottom_right.row += by;
        }

        if caret.col < self.top.col {
            let by = self.top.col - caret.col;
            self.top.col -= by;
            self.bottom_right.col -= by;
        } else if caret.col >= self.bottom_right.col {
            let by = caret.col - self.bottom_right.col + 1;
            self.top.col += by;
            self.bottom_right.col += by;
        }
    }

    /// Document rows to draw, given the document's line count
    pub fn rows(&self, line_count: usize) -> Range<usize> {
        let end = line_count.min(self.bottom_right.row);
        self.top.row.min(end)..end
    }

    /// Character columns of a line to draw, given its length
    ///
    /// The rightmost screen column is kept free for a caret past the line end.
    pub fn cols(&self, line_len: usize) -> Range<usize> {
        let end = line_len.min(self.bottom_right.col.saturating_sub(1));
        self.top.col.min(end)..end
    }

    /// Screen cell `(row, col)` of a document position inside the window
    pub fn to_screen(&self, pos: Position) -> (usize, usize) {
        (
            pos.row.saturating_sub(self.top.row) + HEADER_ROWS,
            pos.col.saturating_sub(self.top.col) + LEFT_MARGIN,
        )
    }
}
