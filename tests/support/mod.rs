#![allow(dead_code)]

pub mod scripted_display;

use dim::config::Config;
use dim::core::editor::{Document, Editor};
use dim::store::MemoryStore;

use scripted_display::ScriptedDisplay;

pub type TestEditor = Editor<ScriptedDisplay, MemoryStore>;

/// Editor over `text` with no bound file
pub fn editor_with_text(text: &str, config: Config) -> TestEditor {
    let doc = Document::new(text, None, None).unwrap();
    Editor::new(config, ScriptedDisplay::new(24, 80), MemoryStore::new(), doc)
}

/// Editor that loaded `path` from a store holding `text`
pub fn editor_with_file(path: &str, text: &str, mut config: Config) -> TestEditor {
    let mut store = MemoryStore::new();
    store.insert(path, text);
    config.file = Some(path.into());
    let doc = Document::load(&config, &store).unwrap();
    Editor::new(config, ScriptedDisplay::new(24, 80), store, doc)
}

/// Type `line` and press Enter
pub fn run_command(editor: &mut TestEditor, line: &str) -> Option<u8> {
    for c in line.chars() {
        assert_eq!(editor.handle_key(dim::core::key::KeyEvent::Char(c)).unwrap(), None);
    }
    editor.handle_key(dim::core::key::KeyEvent::Newline).unwrap()
}

pub fn type_text(editor: &mut TestEditor, text: &str) {
    use dim::core::key::KeyEvent;
    for c in text.chars() {
        let key = KeyEvent::from_char(c);
        assert_eq!(editor.handle_key(key).unwrap(), None);
    }
}

pub fn lines(editor: &TestEditor) -> Vec<String> {
    editor.document().buffer.lines().collect()
}
