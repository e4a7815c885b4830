//! Terminal implementation of the editor's [`Display`].
//!
//! Every screen (editor frame, message, prompt, chooser) is drawn into a back
//! buffer of cells, then diffed against the front buffer and flushed by
//! [`render_to_terminal`]. The drawing functions are pure over a
//! [`ScreenBuffer`], which keeps them testable without a terminal.

use std::io::{self, Stdout, Write};

use crate::core::buffer::TextBuffer;
use crate::core::editor::{Display, Frame};
use crate::core::header::HeaderStyle;
use crate::core::key::{KeyEvent, is_printable};
use crate::core::position::Position;
use crate::core::viewport::{HEADER_ROWS, LEFT_MARGIN};
use crate::error::Result;
use crate::terminal::color::{Color, ColorDepth, ColorPair, Theme};
use crate::terminal::events::EventHandler;
use crate::terminal::render::render_to_terminal;

/// Represents a single cell on the terminal screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }

    pub fn empty() -> Self {
        Self::new(' ', Color::Reset, Color::Reset)
    }

    fn blank(pair: ColorPair) -> Self {
        Self::new(' ', pair.fg, pair.bg)
    }
}

/// Represents the state of the entire screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenBuffer {
    pub cells: Vec<Cell>,
    pub width: u16,
    pub height: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::empty(); (width as usize) * (height as usize)];
        Self {
            cells,
            width,
            height,
        }
    }

    fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = (y as usize) * (self.width as usize) + (x as usize);
            self.cells[idx] = cell;
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            let idx = (y as usize) * (self.width as usize) + (x as usize);
            Some(&self.cells[idx])
        } else {
            None
        }
    }

    /// Characters of row `y`, trailing blanks included
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|cell| cell.ch)
            .collect()
    }

    /// Write `text` from `(x, y)` and return the column after it; clipped at the edge
    fn put_str(&mut self, x: usize, y: usize, text: &str, pair: ColorPair) -> usize {
        let mut x = x;
        for ch in text.chars() {
            if x >= self.width as usize {
                break;
            }
            self.set(x as u16, y as u16, Cell::new(screen_char(ch), pair.fg, pair.bg));
            x += 1;
        }
        x
    }
}

/// One cell per character: tabs show as a space, anything else that is not a
/// single-column glyph as '?'
fn screen_char(ch: char) -> char {
    match ch {
        '\t' => ' ',
        c if is_printable(c) => c,
        _ => '?',
    }
}

fn clamp_cell(col: usize, row: usize) -> (u16, u16) {
    (
        col.min(u16::MAX as usize) as u16,
        row.min(u16::MAX as usize) as u16,
    )
}

// =============================================================================
// DRAWING
// =============================================================================

/// Draw header, visible text with selection highlight, and return the caret cell
pub fn draw_frame(screen: &mut ScreenBuffer, buffer: &TextBuffer, frame: &Frame<'_>, theme: &Theme) -> (u16, u16) {
    screen.fill(Cell::blank(theme.text));
    let width = screen.width as usize;

    let mut x = 0;
    for segment in frame.header {
        let pair = theme.header_style(segment.style);
        if segment.style == HeaderStyle::Rule {
            screen.put_str(0, 1, &segment.text, pair);
        } else {
            x = screen.put_str(x, 0, &segment.text, pair);
        }
    }

    let view = &frame.viewport;
    let top = view.top();
    for (i, row) in view.rows(buffer.line_count()).enumerate() {
        let y = HEADER_ROWS + i;
        let chars: Vec<char> = buffer.line(row).chars().collect();
        if chars.len() < top.col {
            continue;
        }
        let visible = &chars[view.cols(chars.len())];

        // classify against the drawn slice, whose last column is two short of
        // the viewport edge
        let highlight = frame.selection.and_then(|sel| {
            let line_start = Position::new(row, top.col);
            let line_end = Position::new(row, view.bottom_right().col.saturating_sub(2).max(top.col));
            sel.highlight_segment(line_start, line_end).range(visible.len())
        });

        for (offset, &ch) in visible.iter().enumerate() {
            let selected = highlight.as_ref().is_some_and(|range| range.contains(&offset));
            let pair = if selected { theme.highlight } else { theme.text };
            let col = LEFT_MARGIN + offset;
            if col >= width {
                break;
            }
            screen.set(col as u16, y as u16, Cell::new(screen_char(ch), pair.fg, pair.bg));
        }
    }

    let (row, col) = view.to_screen(frame.caret);
    clamp_cell(col, row)
}

/// Draw `lines` one per row, each indented by one column
pub fn draw_message(screen: &mut ScreenBuffer, lines: &[&str], theme: &Theme) {
    screen.fill(Cell::blank(theme.text));
    for (y, line) in lines.iter().enumerate() {
        screen.put_str(1, y, line, theme.text);
    }
}

/// Draw a one-line prompt and the input typed so far; returns the cursor cell
pub fn draw_prompt(screen: &mut ScreenBuffer, text: &str, input: &str, theme: &Theme) -> (u16, u16) {
    screen.fill(Cell::blank(theme.text));
    let x = screen.put_str(1, 0, text, theme.text);
    let x = screen.put_str(x, 0, input, theme.text);
    clamp_cell(x, 0)
}

/// Draw `lines`, a blank row, then `choices` with `selected` highlighted
pub fn draw_choices(screen: &mut ScreenBuffer, lines: &[&str], choices: &[&str], selected: usize, theme: &Theme) {
    draw_message(screen, lines, theme);
    let first = lines.len() + 2;
    for (i, choice) in choices.iter().enumerate() {
        let pair = if i == selected { theme.highlight } else { theme.text };
        screen.put_str(1, first + i, choice, pair);
    }
}

// =============================================================================
// TERMINAL DISPLAY
// =============================================================================

/// crossterm-backed display writing to `W` (stdout in the real editor)
pub struct TerminalDisplay<W: Write> {
    out: W,
    events: EventHandler,
    /// Terminal dimensions (cols, rows)
    terminal_size: (u16, u16),
    front_buffer: ScreenBuffer,
    back_buffer: ScreenBuffer,
    needs_full_redraw: bool,
    theme: Theme,
    depth: ColorDepth,
}

impl TerminalDisplay<Stdout> {
    /// Display on stdout sized to the current terminal
    pub fn new_terminal() -> Result<Self> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok(Self::new(io::stdout(), cols, rows, ColorDepth::detect()))
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, cols: u16, rows: u16, depth: ColorDepth) -> Self {
        Self {
            out,
            events: EventHandler::new(),
            terminal_size: (cols, rows),
            front_buffer: ScreenBuffer::new(cols, rows),
            back_buffer: ScreenBuffer::new(cols, rows),
            needs_full_redraw: true,
            theme: Theme::default(),
            depth,
        }
    }

    /// Update terminal size; the next flush repaints everything
    pub fn update_size(&mut self, cols: u16, rows: u16) {
        if cols == 0 || rows == 0 || (cols, rows) == self.terminal_size {
            return;
        }
        self.terminal_size = (cols, rows);
        self.front_buffer = ScreenBuffer::new(cols, rows);
        self.back_buffer = ScreenBuffer::new(cols, rows);
        self.needs_full_redraw = true;
    }

    /// What the terminal currently shows
    pub fn screen(&self) -> &ScreenBuffer {
        &self.front_buffer
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    fn flush(&mut self, cursor: Option<(u16, u16)>) -> Result<()> {
        render_to_terminal(
            &self.front_buffer,
            &self.back_buffer,
            self.needs_full_redraw,
            cursor,
            self.depth,
            &mut self.out,
        )?;
        std::mem::swap(&mut self.front_buffer, &mut self.back_buffer);
        self.needs_full_redraw = false;
        Ok(())
    }

    /// Next key that is not a resize; resizes are applied and `redraw` is
    /// called so the current screen is repainted at the new size
    fn next_key(&mut self, mut redraw: impl FnMut(&mut Self) -> Result<()>) -> Result<KeyEvent> {
        loop {
            let (key, size) = self.events.read()?;
            if let Some((cols, rows)) = size {
                self.update_size(cols, rows);
            }
            if key != KeyEvent::Resize {
                return Ok(key);
            }
            redraw(self)?;
        }
    }

    fn show_prompt(&mut self, text: &str, input: &str) -> Result<()> {
        let cursor = draw_prompt(&mut self.back_buffer, text, input, &self.theme);
        self.flush(Some(cursor))
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn size(&self) -> (usize, usize) {
        (self.terminal_size.1 as usize, self.terminal_size.0 as usize)
    }

    fn render_frame(&mut self, buffer: &TextBuffer, frame: &Frame<'_>) -> Result<()> {
        let cursor = draw_frame(&mut self.back_buffer, buffer, frame, &self.theme);
        self.flush(Some(cursor))
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        let (key, size) = self.events.read()?;
        if let Some((cols, rows)) = size {
            self.update_size(cols, rows);
        }
        Ok(key)
    }

    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let draw = |display: &mut Self| {
            draw_message(&mut display.back_buffer, lines, &display.theme);
            display.flush(None)
        };
        draw(self)?;
        self.next_key(draw)?;
        Ok(())
    }

    fn prompt_line(&mut self, text: &str) -> Result<String> {
        let mut input = String::new();
        loop {
            self.show_prompt(text, &input)?;
            let key = self.next_key(|display| display.show_prompt(text, &input))?;
            match key {
                KeyEvent::Newline => return Ok(input),
                KeyEvent::Escape => return Ok(String::new()),
                KeyEvent::Backspace => {
                    input.pop();
                }
                KeyEvent::Char(c) => input.push(c),
                _ => {}
            }
        }
    }

    fn prompt_confirm(&mut self, text: &str, expected: &str) -> Result<bool> {
        let mut typed = String::new();
        for wanted in expected.chars() {
            self.show_prompt(text, &typed)?;
            let key = self.next_key(|display| display.show_prompt(text, &typed))?;
            if let Some(c) = key.as_char() {
                typed.push(c);
            }
            if key != KeyEvent::Char(wanted) {
                self.show_prompt(text, &typed)?;
                return Ok(false);
            }
        }
        self.show_prompt(text, &typed)?;
        Ok(true)
    }

    fn prompt_choose(&mut self, lines: &[&str], choices: &[&str]) -> Result<usize> {
        let Some(last) = choices.len().checked_sub(1) else {
            return Ok(0);
        };
        let mut selected = 0;
        loop {
            let draw = |display: &mut Self| {
                draw_choices(&mut display.back_buffer, lines, choices, selected, &display.theme);
                display.flush(None)
            };
            draw(self)?;
            match self.next_key(draw)? {
                KeyEvent::Newline => return Ok(selected),
                KeyEvent::Up => selected = selected.saturating_sub(1),
                KeyEvent::Down => selected = (selected + 1).min(last),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::header;
    use crate::core::selection::SelectionRange;
    use crate::core::viewport::Viewport;

    fn frame_screen(
        text: &str,
        size: (u16, u16),
        caret: Position,
        selection: Option<&SelectionRange>,
    ) -> (ScreenBuffer, (u16, u16)) {
        let buffer = TextBuffer::from_text(text);
        let (cols, rows) = size;
        let mut viewport = Viewport::new(rows as usize, cols as usize);
        viewport.scroll_to(caret);
        let header = header::compose(cols as usize, Some("t.txt"), "COMMAND", "");
        let frame = Frame {
            header: &header,
            caret,
            selection,
            viewport,
        };
        let mut screen = ScreenBuffer::new(cols, rows);
        let cursor = draw_frame(&mut screen, &buffer, &frame, &Theme::default());
        (screen, cursor)
    }

    #[test]
    fn test_frame_layout() {
        let (screen, cursor) = frame_screen("hello\nworld", (70, 6), Position::new(1, 2), None);
        assert!(screen.row_text(0).starts_with(" Dim v1     Editing t.txt"));
        assert!(screen.row_text(1).chars().all(|c| c == '─'));
        assert!(screen.row_text(2).starts_with(" hello"));
        assert!(screen.row_text(3).starts_with(" world"));
        assert_eq!(cursor, (3, 3));
    }

    #[test]
    fn test_selection_is_highlighted() {
        let mut sel = SelectionRange::anchored_at(Position::new(0, 1));
        sel.on_caret_moved(Position::new(0, 3));
        let (screen, _) = frame_screen("abcdef", (70, 5), Position::new(0, 3), Some(&sel));
        let theme = Theme::default();
        let bg = |x| screen.get(x, 2).map(|cell| cell.bg);
        // text starts at column 1; selection covers b..=d
        assert_eq!(bg(1), Some(theme.text.bg));
        assert_eq!(bg(2), Some(theme.highlight.bg));
        assert_eq!(bg(4), Some(theme.highlight.bg));
        assert_eq!(bg(5), Some(theme.text.bg));
    }

    #[test]
    fn test_selection_past_the_window_edge_fills_the_drawn_slice() {
        let line = "0123456789abcdefghij";
        let mut sel = SelectionRange::anchored_at(Position::new(0, 7));
        sel.on_caret_moved(Position::new(0, 19));
        let (screen, _) = frame_screen(line, (12, 5), Position::new(0, 15), Some(&sel));
        let theme = Theme::default();
        let bg = |x| screen.get(x, 2).map(|cell| cell.bg);
        // columns 5..15 are drawn at cells 1..11; the selection starts at '7'
        assert!(screen.row_text(2).starts_with(" 56789abcde"));
        assert_eq!(bg(2), Some(theme.text.bg));
        assert_eq!(bg(3), Some(theme.highlight.bg));
        assert_eq!(bg(10), Some(theme.highlight.bg));
        assert_eq!(bg(11), Some(theme.text.bg));
    }

    #[test]
    fn test_horizontal_scroll_hides_prefix() {
        let line = "0123456789abcdefghij";
        let (screen, cursor) = frame_screen(line, (12, 5), Position::new(0, 15), None);
        // window is 11 columns wide; the caret column forces a scroll of 5
        assert!(screen.row_text(2).starts_with(" 56789abcde"));
        assert_eq!(cursor, (11, 2));
    }

    #[test]
    fn test_tabs_render_as_spaces() {
        let (screen, _) = frame_screen("\tx", (70, 5), Position::ORIGIN, None);
        assert!(screen.row_text(2).starts_with("  x"));
    }

    #[test]
    fn test_choices_layout() {
        let mut screen = ScreenBuffer::new(30, 8);
        let theme = Theme::default();
        draw_choices(&mut screen, &["pick", ""], &["NONE", "a.txt"], 1, &theme);
        assert!(screen.row_text(0).starts_with(" pick"));
        assert!(screen.row_text(4).starts_with(" NONE"));
        assert!(screen.row_text(5).starts_with(" a.txt"));
        assert_eq!(screen.get(1, 5).map(|c| c.bg), Some(theme.highlight.bg));
        assert_eq!(screen.get(1, 4).map(|c| c.bg), Some(theme.text.bg));
    }

    #[test]
    fn test_prompt_cursor_follows_input() {
        let mut screen = ScreenBuffer::new(40, 3);
        let cursor = draw_prompt(&mut screen, "Name: ", "ab", &Theme::default());
        assert!(screen.row_text(0).starts_with(" Name: ab"));
        assert_eq!(cursor, (9, 0));
    }

    #[test]
    fn test_render_frame_flushes_to_output() {
        let mut display = TerminalDisplay::new(Vec::new(), 60, 5, ColorDepth::Extended);
        let buffer = TextBuffer::from_text("hi");
        let header = header::compose(60, None, "INSERT", "");
        let frame = Frame {
            header: &header,
            caret: Position::ORIGIN,
            selection: None,
            viewport: Viewport::new(5, 60),
        };
        display.render_frame(&buffer, &frame).unwrap();
        assert!(display.screen().row_text(2).starts_with(" hi"));
        let written = String::from_utf8_lossy(display.output()).into_owned();
        assert!(written.contains("Mode: INSERT"));
        assert_eq!(display.size(), (5, 60));
    }

    #[test]
    fn test_update_size_ignores_zero() {
        let mut display = TerminalDisplay::new(Vec::new(), 20, 5, ColorDepth::Basic);
        display.update_size(0, 10);
        assert_eq!(display.size(), (5, 20));
        display.update_size(30, 10);
        assert_eq!(display.size(), (10, 30));
    }
}
