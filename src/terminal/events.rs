//! crossterm event normalization
//!
//! Maps raw crossterm events onto the editor's closed [`KeyEvent`] set. Only key
//! presses count; releases and repeats reported by enhanced keyboard protocols
//! are dropped, as are mouse, focus and paste events.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::core::key::{KeyEvent, is_printable};
use crate::error::Result;

/// Blocking source of normalized keys
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Block until an event maps to a key, and return it
    ///
    /// Resize events are returned as `KeyEvent::Resize` together with the new
    /// `(cols, rows)`.
    pub fn read(&mut self) -> Result<(KeyEvent, Option<(u16, u16)>)> {
        loop {
            let event = event::read()?;
            if let Event::Resize(cols, rows) = event {
                return Ok((KeyEvent::Resize, Some((cols, rows))));
            }
            if let Some(key) = normalize_event(&event) {
                return Ok((key, None));
            }
        }
    }
}

/// Normalize one crossterm event; `None` for events the editor ignores
pub fn normalize_event(event: &Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            Some(normalize_key(key_event))
        }
        Event::Resize(..) => Some(KeyEvent::Resize),
        _ => None,
    }
}

fn normalize_key(key_event: &event::KeyEvent) -> KeyEvent {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key_event.modifiers.contains(KeyModifiers::ALT);

    match key_event.code {
        // terminals send C-h for backspace and C-j / C-m for return
        KeyCode::Char('h') if ctrl => KeyEvent::Backspace,
        KeyCode::Char('j' | 'm') if ctrl => KeyEvent::Newline,
        KeyCode::Char('i') if ctrl => KeyEvent::Tab,
        KeyCode::Char('[') if ctrl => KeyEvent::Escape,
        KeyCode::Char(_) if ctrl || alt => KeyEvent::Null,
        KeyCode::Char(c) if is_printable(c) => KeyEvent::Char(c),
        KeyCode::Char(c) => KeyEvent::from_char(c),
        KeyCode::Backspace => KeyEvent::Backspace,
        KeyCode::Enter => KeyEvent::Newline,
        KeyCode::Left => KeyEvent::Left,
        KeyCode::Right => KeyEvent::Right,
        KeyCode::Up => KeyEvent::Up,
        KeyCode::Down => KeyEvent::Down,
        KeyCode::Home => KeyEvent::Home,
        KeyCode::End => KeyEvent::End,
        KeyCode::PageUp => KeyEvent::PageUp,
        KeyCode::PageDown => KeyEvent::PageDown,
        KeyCode::Tab => KeyEvent::Tab,
        KeyCode::Esc => KeyEvent::Escape,
        _ => KeyEvent::Null,
    }
}
