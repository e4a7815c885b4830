//! Editor orchestrator
//!
//! The editor owns the one open [`Document`], the active [`Mode`] and the
//! viewport. Each key is handed to the mode together with exclusive access to
//! the document; the mode returns the next mode or asks to exit. Screen output
//! and file access go through the [`Display`] and [`FileStore`] traits so the
//! same loop runs against a real terminal or a scripted test double.

use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};

use crate::config::Config;
use crate::core::buffer::TextBuffer;
use crate::core::documents;
use crate::core::header::{self, HeaderSegment};
use crate::core::key::KeyEvent;
use crate::core::mode::{Mode, ModeContext, Transition};
use crate::core::position::Position;
use crate::core::selection::SelectionRange;
use crate::core::undo::{Snapshot, UndoManager};
use crate::core::viewport::Viewport;
use crate::error::{DimError, Result};

pub const DEBUG_SPLASH: [&str; 3] = [
    "You have launched the editor in debug mode...",
    "",
    "Press any key to continue.",
];

pub const DEBUG_CHOOSER: [&str; 3] = [
    "You have launched the editor in debug mode...",
    "",
    "Test documents:",
];

pub const READ_ONLY_SPLASH: &str =
    "The editor has been opened in read only mode. Press any key to continue.";

/// Key that quits immediately in debug mode
pub const DEBUG_EXIT_KEY: KeyEvent = KeyEvent::Char('`');

// ==================== Collaborators ====================

/// Everything the renderer needs besides the text itself
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub header: &'a [HeaderSegment],
    pub caret: Position,
    pub selection: Option<&'a SelectionRange>,
    pub viewport: Viewport,
}

/// Screen output and keyboard input
pub trait Display {
    /// Screen size as `(height, width)` in cells
    fn size(&self) -> (usize, usize);

    fn render_frame(&mut self, buffer: &TextBuffer, frame: &Frame<'_>) -> Result<()>;

    /// Block until the next normalized key
    fn read_key(&mut self) -> Result<KeyEvent>;

    /// Show `lines` and wait for any key
    fn show_message(&mut self, lines: &[&str]) -> Result<()>;

    /// Read one line of text after `text`
    fn prompt_line(&mut self, text: &str) -> Result<String>;

    /// True once the user has typed `expected` exactly; false on the first mismatch
    fn prompt_confirm(&mut self, text: &str, expected: &str) -> Result<bool>;

    /// Index into `choices` picked by the user
    fn prompt_choose(&mut self, lines: &[&str], choices: &[&str]) -> Result<usize>;
}

/// Plain-text file access
pub trait FileStore {
    fn exists(&self, path: &Path) -> bool;

    fn read_text(&self, path: &Path) -> Result<String>;

    fn write_text(&mut self, path: &Path, text: &str) -> Result<()>;

    /// Create an empty file, and any missing parent directories
    fn create(&mut self, path: &Path) -> Result<()>;

    /// File name shown in the header
    fn basename(&self, path: &Path) -> String;
}

// ==================== Document ====================

/// The open document: text, caret, history and where it is saved
#[derive(Debug)]
pub struct Document {
    pub buffer: TextBuffer,
    pub caret: Position,
    pub history: UndoManager,
    /// Bound file; set on first save when the editor started without one
    pub path: Option<PathBuf>,
    pub name: Option<String>,
}

impl Document {
    /// A document holding `text`, with its initial history record in place
    pub fn new(text: &str, path: Option<PathBuf>, name: Option<String>) -> Result<Self> {
        let mut doc = Self {
            buffer: TextBuffer::from_text(text),
            caret: Position::ORIGIN,
            history: UndoManager::new(),
            path,
            name,
        };
        doc.commit()?;
        doc.history.mark_saved();
        Ok(doc)
    }

    /// Open whatever `config` names: a tutorial, a file, or nothing
    pub fn load(config: &Config, store: &dyn FileStore) -> Result<Self> {
        if let Some(index) = config.tutorial {
            let tutorial = documents::tutorial(index).ok_or(DimError::TutorialNotFound(index))?;
            info!(tutorial = tutorial.name, "opening tutorial");
            return Self::new(tutorial.text, None, Some(tutorial.name.to_string()));
        }

        match &config.file {
            Some(path) => {
                let text = store.read_text(path)?;
                info!(path = %path.display(), lines = text.lines().count(), "loaded file");
                Self::new(&text, Some(path.clone()), Some(store.basename(path)))
            }
            None => Self::new("", None, None),
        }
    }

    /// Replace the text and start a fresh history
    pub fn reset_text(&mut self, text: &str) -> Result<()> {
        self.buffer.load_text(text);
        self.caret = Position::ORIGIN;
        self.history.clear();
        self.commit()?;
        self.history.mark_saved();
        Ok(())
    }

    /// Record the current state after an edit
    pub fn commit(&mut self) -> Result<()> {
        self.history.push_state(self.caret, &self.buffer.content())
    }

    /// Load a history snapshot back into the buffer
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.buffer.load_text(&snapshot.text);
        self.caret = snapshot.caret;
        self.caret.clamp_to(&self.buffer);
    }

    pub fn is_saved(&self) -> bool {
        self.history.is_saved()
    }
}

// ==================== Editor ====================

pub struct Editor<D: Display, S: FileStore> {
    config: Config,
    display: D,
    store: S,
    doc: Document,
    mode: Mode,
    viewport: Viewport,
}

impl<D: Display, S: FileStore> Editor<D, S> {
    pub fn new(config: Config, display: D, store: S, doc: Document) -> Self {
        let (height, width) = display.size();
        Self {
            config,
            display,
            store,
            doc,
            mode: Mode::command(),
            viewport: Viewport::new(height, width),
        }
    }

    /// Run startup screens, then the key loop until the user quits
    ///
    /// Returns the process exit code.
    pub fn launch(&mut self) -> Result<u8> {
        self.startup()?;
        self.render()?;
        loop {
            let key = self.display.read_key()?;
            if self.config.debug && key == DEBUG_EXIT_KEY {
                info!("debug exit key pressed");
                return Ok(0);
            }
            if key == KeyEvent::Resize {
                let (height, width) = self.display.size();
                debug!(height, width, "terminal resized");
                self.viewport.resize(height, width);
            } else if let Some(code) = self.handle_key(key)? {
                info!(code, "editor exiting");
                return Ok(code);
            }
            self.render()?;
        }
    }

    fn startup(&mut self) -> Result<()> {
        if self.config.debug {
            if self.config.file.is_none() && self.config.tutorial.is_none() {
                self.choose_debug_document()?;
            } else {
                self.display.show_message(&DEBUG_SPLASH)?;
            }
        }
        if self.config.read_only {
            self.display.show_message(&[READ_ONLY_SPLASH])?;
        }
        Ok(())
    }

    fn choose_debug_document(&mut self) -> Result<()> {
        let samples = documents::samples();
        let choices: Vec<&str> = std::iter::once("NONE")
            .chain(samples.iter().map(|doc| doc.name))
            .collect();
        let choice = self.display.prompt_choose(&DEBUG_CHOOSER, &choices)?;
        let text = choice
            .checked_sub(1)
            .and_then(|i| samples.get(i))
            .map_or("", |doc| doc.text);
        debug!(choice = choices.get(choice).copied().unwrap_or("NONE"), "debug document chosen");
        self.doc.reset_text(text)
    }

    /// Dispatch one key to the active mode
    ///
    /// Returns `Some(code)` when the mode asked to exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Option<u8>> {
        let mode = std::mem::take(&mut self.mode);
        let from = mode.name();
        trace!(%key, mode = from, "key");
        let mut ctx = ModeContext {
            doc: &mut self.doc,
            config: &self.config,
            display: &mut self.display,
            store: &mut self.store,
        };
        match mode.handle_key(key, &mut ctx)? {
            Transition::Continue(next) => {
                if next.name() != from {
                    debug!(from, to = next.name(), "mode transition");
                }
                self.mode = next;
                Ok(None)
            }
            Transition::Exit(code) => Ok(Some(code)),
        }
    }

    /// Scroll the caret into view and draw the current state
    pub fn render(&mut self) -> Result<()> {
        let (_, width) = self.display.size();
        self.viewport.scroll_to(self.doc.caret);
        let header = header::compose(
            width,
            self.doc.name.as_deref(),
            self.mode.name(),
            self.mode.pending_command(),
        );
        let frame = Frame {
            header: &header,
            caret: self.doc.caret,
            selection: self.mode.selection(),
            viewport: self.viewport,
        };
        self.display.render_frame(&self.doc.buffer, &frame)
    }

    // ==================== Accessors ====================

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
