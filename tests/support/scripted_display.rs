use std::collections::VecDeque;

use dim::core::buffer::TextBuffer;
use dim::core::editor::{Display, Frame};
use dim::core::key::KeyEvent;
use dim::core::position::Position;
use dim::error::Result;

/// What one rendered frame showed, without the borrowed parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    pub lines: Vec<String>,
    pub header: String,
    pub caret: Position,
    pub selection: Option<(Position, Position)>,
}

/// A `Display` fed from queues: keys to read and answers to prompts
///
/// Running out of keys ends the session with Escape so a missing script entry
/// shows up as an early exit rather than a hang.
#[derive(Debug, Default)]
pub struct ScriptedDisplay {
    pub size: (usize, usize),
    pub keys: VecDeque<KeyEvent>,
    pub lines: VecDeque<String>,
    pub confirms: VecDeque<bool>,
    pub choices: VecDeque<usize>,
    /// Sizes applied, in order, each time a `Resize` key is read
    pub resizes: VecDeque<(usize, usize)>,
    pub frames: Vec<RenderedFrame>,
    pub messages: Vec<Vec<String>>,
    pub prompts: Vec<String>,
}

impl ScriptedDisplay {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            size: (height, width),
            ..Self::default()
        }
    }

    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = KeyEvent>) {
        self.keys.extend(keys);
    }

    /// Queue every character of `text` as a key
    pub fn push_text(&mut self, text: &str) {
        self.keys.extend(text.chars().map(KeyEvent::from_char));
    }

    pub fn last_frame(&self) -> Option<&RenderedFrame> {
        self.frames.last()
    }
}

impl Display for ScriptedDisplay {
    fn size(&self) -> (usize, usize) {
        self.size
    }

    fn render_frame(&mut self, buffer: &TextBuffer, frame: &Frame<'_>) -> Result<()> {
        let header = frame
            .header
            .iter()
            .filter(|seg| seg.style != dim::core::header::HeaderStyle::Rule)
            .map(|seg| seg.text.as_str())
            .collect();
        self.frames.push(RenderedFrame {
            lines: buffer.lines().collect(),
            header,
            caret: frame.caret,
            selection: frame.selection.map(|sel| (sel.start(), sel.end())),
        });
        Ok(())
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        let key = self.keys.pop_front().unwrap_or(KeyEvent::Escape);
        if key == KeyEvent::Resize {
            if let Some(size) = self.resizes.pop_front() {
                self.size = size;
            }
        }
        Ok(key)
    }

    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        self.messages.push(lines.iter().map(|line| line.to_string()).collect());
        Ok(())
    }

    fn prompt_line(&mut self, text: &str) -> Result<String> {
        self.prompts.push(text.to_string());
        Ok(self.lines.pop_front().unwrap_or_default())
    }

    fn prompt_confirm(&mut self, text: &str, _expected: &str) -> Result<bool> {
        self.prompts.push(text.to_string());
        Ok(self.confirms.pop_front().unwrap_or(true))
    }

    fn prompt_choose(&mut self, lines: &[&str], _choices: &[&str]) -> Result<usize> {
        self.messages.push(lines.iter().map(|line| line.to_string()).collect());
        Ok(self.choices.pop_front().unwrap_or(0))
    }
}
