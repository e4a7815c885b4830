//! Terminal rendering module
//!
//! This module handles the low-level rendering of the screen buffer to the
//! terminal, using ANSI escape codes and crossterm for cursor control.

use std::io::{self, Write};

use crossterm::{QueueableCommand, cursor};

use crate::terminal::color::ColorDepth;
use crate::terminal::display::ScreenBuffer;

/// Write the cells of `back` that differ from `front`
///
/// `front` is what the terminal currently shows. With `full_redraw` the screen
/// is cleared and every cell is written. The cursor is shown at `cursor_pos`, or
/// hidden when it is `None`.
pub fn render_to_terminal<W: Write>(
    front: &ScreenBuffer,
    back: &ScreenBuffer,
    full_redraw: bool,
    cursor_pos: Option<(u16, u16)>,
    depth: ColorDepth,
    out: &mut W,
) -> io::Result<()> {
    // Hide cursor during update to prevent flickering
    write!(out, "\x1b[?25l")?;

    let full_redraw = full_redraw || front.width != back.width || front.height != back.height;
    if full_redraw {
        write!(out, "\x1b[2J\x1b[H")?;
    }

    let mut last_fg = String::new();
    let mut last_bg = String::new();
    let mut wrote_cells = false;
    // cell the terminal cursor sits on after the last write
    let mut next_col: Option<(u16, u16)> = None;

    for y in 0..back.height {
        for x in 0..back.width {
            let Some(new_cell) = back.get(x, y) else {
                continue;
            };
            if !full_redraw && front.get(x, y) == Some(new_cell) {
                continue;
            }

            if next_col != Some((x, y)) {
                write!(out, "\x1b[{};{}H", y + 1, x + 1)?;
            }

            let fg_code = depth.adapt(new_cell.fg).to_ansi_fg_code();
            let bg_code = depth.adapt(new_cell.bg).to_ansi_bg_code();
            if fg_code != last_fg || bg_code != last_bg {
                write!(out, "\x1b[{fg_code}m\x1b[{bg_code}m")?;
                last_fg = fg_code;
                last_bg = bg_code;
            }

            write!(out, "{}", new_cell.ch)?;
            wrote_cells = true;
            next_col = Some((x + 1, y));
        }
    }

    if wrote_cells {
        write!(out, "\x1b[0m")?;
    }

    match cursor_pos {
        Some((cx, cy)) => {
            out.queue(cursor::MoveTo(cx, cy))?;
            out.queue(cursor::Show)?;
        }
        None => {
            out.queue(cursor::Hide)?;
        }
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::color::Color;
    use crate::terminal::display::Cell;

    fn rendered(front: &ScreenBuffer, back: &ScreenBuffer, full: bool) -> String {
        let mut out = Vec::new();
        render_to_terminal(front, back, full, None, ColorDepth::Extended, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_unchanged_frame_writes_no_cells() {
        let front = ScreenBuffer::new(4, 2);
        let back = front.clone();
        let out = rendered(&front, &back, false);
        assert!(!out.contains("\x1b[0m"));
    }

    #[test]
    fn test_only_changed_cell_is_written() {
        let front = ScreenBuffer::new(4, 2);
        let mut back = front.clone();
        back.set(2, 1, Cell::new('z', Color::Red, Color::Reset));
        let out = rendered(&front, &back, false);
        assert!(out.contains("\x1b[2;3H"));
        assert!(out.contains("\x1b[31m\x1b[49mz"));
        assert_eq!(out.matches('z').count(), 1);
    }

    #[test]
    fn test_full_redraw_clears_and_writes_everything() {
        let front = ScreenBuffer::new(3, 1);
        let back = front.clone();
        let out = rendered(&front, &back, true);
        assert!(out.starts_with("\x1b[?25l\x1b[2J\x1b[H"));
        // one cursor move for a contiguous row
        assert_eq!(out.matches("\x1b[1;1H").count(), 1);
        assert!(out.contains("   "));
    }

    #[test]
    fn test_basic_depth_falls_back_to_16_colors() {
        let front = ScreenBuffer::new(1, 1);
        let mut back = front.clone();
        back.set(0, 0, Cell::new('a', Color::Ansi256(196), Color::Ansi256(233)));
        let mut out = Vec::new();
        render_to_terminal(&front, &back, false, None, ColorDepth::Basic, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("\x1b[31m\x1b[40ma"));
    }
}
