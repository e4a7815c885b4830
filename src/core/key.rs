use std::fmt;

use unicode_width::UnicodeWidthChar;

/// Normalized key event consumed by the mode handlers
///
/// Terminal backends collapse their raw events into this closed set before the
/// editor sees them. Anything that is not a named key and not a printable
/// single-column character arrives as `Null` and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    Escape,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Newline,
    Tab,
    /// One printable, single-column character
    Char(char),
    /// The terminal changed size
    Resize,
    Null,
}

impl KeyEvent {
    /// Classify a raw character the way terminals deliver them
    pub fn from_char(c: char) -> Self {
        match c {
            '\u{1b}' => KeyEvent::Escape,
            '\u{8}' | '\u{7f}' => KeyEvent::Backspace,
            '\n' | '\r' => KeyEvent::Newline,
            '\t' => KeyEvent::Tab,
            c if is_printable(c) => KeyEvent::Char(c),
            _ => KeyEvent::Null,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            KeyEvent::Char(c) => Some(*c),
            _ => None,
        }
    }
}

/// Renderable and exactly one terminal column wide
pub fn is_printable(c: char) -> bool {
    !c.is_control() && c.width() == Some(1)
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEvent::Escape => write!(f, "ESCAPE"),
            KeyEvent::Backspace => write!(f, "BACKSPACE"),
            KeyEvent::Left => write!(f, "LEFT"),
            KeyEvent::Right => write!(f, "RIGHT"),
            KeyEvent::Up => write!(f, "UP"),
            KeyEvent::Down => write!(f, "DOWN"),
            KeyEvent::PageUp => write!(f, "PAGE_UP"),
            KeyEvent::PageDown => write!(f, "PAGE_DOWN"),
            KeyEvent::Home => write!(f, "HOME"),
            KeyEvent::End => write!(f, "END"),
            KeyEvent::Newline => write!(f, "NEWLINE"),
            KeyEvent::Tab => write!(f, "TAB"),
            KeyEvent::Char(c) => write!(f, "{c}"),
            KeyEvent::Resize => write!(f, "RESIZE"),
            KeyEvent::Null => write!(f, "NULL"),
        }
    }
}
