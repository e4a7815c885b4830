//! Selection Model
//!
//! A selection is an inclusive `[start, end]` range of positions that grows or
//! shrinks as the caret moves. Which edge follows the caret is decided by
//! `growing_from_start`: the side the caret last left the range through.
//!
//! The same module classifies each visible line slice against the selection for
//! highlighting, and deletes the selected text from a buffer.

use std::ops::Range;

use crate::core::buffer::TextBuffer;
use crate::core::position::Position;

// =============================================================================
// SELECTION RANGE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    start: Position,
    end: Position,
    /// True while the start edge is the one tracking the caret
    growing_from_start: bool,
}

impl SelectionRange {
    /// A one-point selection at `caret`
    pub fn anchored_at(caret: Position) -> Self {
        Self {
            start: caret,
            end: caret,
            growing_from_start: true,
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn growing_from_start(&self) -> bool {
        self.growing_from_start
    }

    /// Inclusive membership test
    pub fn contains(&self, pos: &Position) -> bool {
        pos.is_between(&self.start, &self.end)
    }

    /// Update the range after the caret moved to `caret`
    pub fn on_caret_moved(&mut self, caret: Position) {
        if caret.is_before(&self.start) {
            // expand left
            self.start = caret;
            self.growing_from_start = true;
        } else if caret.is_after(&self.end) {
            // expand right
            self.end = caret;
            self.growing_from_start = false;
        } else if self.growing_from_start {
            // caret re-entered through the left edge
            self.start = caret;
        } else {
            self.end = caret;
        }
    }

    /// Classify the visible slice `[line_start, line_end]` of one line
    ///
    /// Both bounds are inclusive and on the same row. Offsets in the result are
    /// relative to `line_start.col`.
    pub fn highlight_segment(&self, line_start: Position, line_end: Position) -> LineHighlight {
        let start_inside = self.contains(&line_start);
        let end_inside = self.contains(&line_end);
        let selection_starts_here = self.start.is_between(&line_start, &line_end);
        let selection_ends_here = self.end.is_between(&line_start, &line_end);

        let offset = |pos: Position| pos.col.saturating_sub(line_start.col);
        match (start_inside, end_inside) {
            (true, true) => LineHighlight::Full,
            (true, false) => LineHighlight::Head {
                end: offset(self.end) + 1,
            },
            (false, true) => LineHighlight::Tail {
                start: offset(self.start),
            },
            (false, false) if selection_starts_here && selection_ends_here => {
                LineHighlight::Inner {
                    start: offset(self.start),
                    end: offset(self.end) + 1,
                }
            }
            (false, false) => LineHighlight::None,
        }
    }

    /// Remove the selected text from `buffer` and return the new caret
    ///
    /// A single-line selection removes `[start.col, end.col]`. A multi-line one
    /// truncates the start line, drops every line strictly between, trims the
    /// end line through `end.col`, and drops that remainder if it became empty.
    pub fn delete_from(&self, buffer: &mut TextBuffer) -> Position {
        let Self { start, end, .. } = *self;
        let last_row = buffer.line_count() - 1;
        if start.row > last_row {
            return Position::end_of(buffer);
        }

        if start.row == end.row {
            let len = buffer.line_len(start.row);
            let from = start.col.min(len);
            let to = (end.col + 1).min(len);
            if from < to {
                buffer.delete_range(start.row, from, to);
            }
        } else {
            let next = start.row + 1;
            let interior = end.row.min(last_row + 1).saturating_sub(next);
            for _ in 0..interior {
                buffer.pop_line(next);
            }

            let len = buffer.line_len(start.row);
            buffer.delete_range(start.row, start.col.min(len), len);

            if next < buffer.line_count() {
                let len = buffer.line_len(next);
                buffer.delete_range(next, 0, (end.col + 1).min(len));
                if buffer.line_len(next) == 0 {
                    buffer.pop_line(next);
                }
            }
        }

        let mut caret = start;
        caret.clamp_to(buffer);
        caret
    }
}

// =============================================================================
// LINE HIGHLIGHT
// =============================================================================

/// How one visible line slice intersects the selection
///
/// `end` offsets are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineHighlight {
    /// Not selected at all
    None,
    /// Entirely inside the selection
    Full,
    /// Selected from the slice start up to `end`; the selection ends on this line
    Head { end: usize },
    /// Selected from `start` to the slice end; the selection starts on this line
    Tail { start: usize },
    /// The whole selection sits inside this slice
    Inner { start: usize, end: usize },
}

impl LineHighlight {
    /// The highlighted character range within a slice of `len` characters
    pub fn range(&self, len: usize) -> Option<Range<usize>> {
        let range = match *self {
            LineHighlight::None => return None,
            LineHighlight::Full => 0..len,
            LineHighlight::Head { end } => 0..end.min(len),
            LineHighlight::Tail { start } => start.min(len)..len,
            LineHighlight::Inner { start, end } => start.min(len)..end.min(len),
        };
        (!range.is_empty()).then_some(range)
    }
}
