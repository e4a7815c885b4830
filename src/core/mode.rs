//! Mode state machine
//!
//! Three modes share one document. Each key is dispatched to the active mode,
//! which edits the document through [`ModeContext`] and returns the mode that
//! handles the next key, or asks the editor to exit.
//!
//! Command and Select mode collect a pending command line and run it on Enter.
//! The general commands (`i`, `v`, `s`, `z`, `y`) are handled by one shared
//! function first; each mode then handles its own commands and decides where
//! the general outcome leads.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::command::{self, ParsedCommand};
use crate::core::editor::{Display, Document, FileStore};
use crate::core::key::KeyEvent;
use crate::core::position::Position;
use crate::core::selection::SelectionRange;
use crate::error::{DimError, Result};

pub const QUIT_CONFIRM: &str = "Do you want to quit without saving? (y/n): ";
pub const SAVE_CONFIRM: &str = "Confirm that you want to save the file (type 'save'): ";
pub const FILE_NAME_PROMPT: &str = "Enter the name of the file: ";
pub const READ_ONLY_SAVE: &str =
    "This file cannot be written to. The editor may have been launched in read only mode.";

/// Exclusive access to the editor state for the duration of one key
pub struct ModeContext<'a> {
    pub doc: &'a mut Document,
    pub config: &'a Config,
    pub display: &'a mut dyn Display,
    pub store: &'a mut dyn FileStore,
}

/// What the editor does after a key has been handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Continue(Mode),
    Exit(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Command(CommandState),
    Insert,
    Select(SelectState),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandState {
    pending: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectState {
    pending: String,
    selection: SelectionRange,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::command()
    }
}

impl Mode {
    pub fn command() -> Self {
        Mode::Command(CommandState::default())
    }

    /// Select mode with a one-point selection at `caret`
    pub fn select_at(caret: Position) -> Self {
        Mode::Select(SelectState {
            pending: String::new(),
            selection: SelectionRange::anchored_at(caret),
        })
    }

    /// Upper-case name shown in the header
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Command(_) => "COMMAND",
            Mode::Insert => "INSERT",
            Mode::Select(_) => "SELECT",
        }
    }

    /// The command line typed so far; empty in Insert mode
    pub fn pending_command(&self) -> &str {
        match self {
            Mode::Command(state) => &state.pending,
            Mode::Insert => "",
            Mode::Select(state) => &state.pending,
        }
    }

    pub fn selection(&self) -> Option<&SelectionRange> {
        match self {
            Mode::Select(state) => Some(&state.selection),
            _ => None,
        }
    }

    /// Handle one key and return the next mode
    pub fn handle_key(self, key: KeyEvent, ctx: &mut ModeContext<'_>) -> Result<Transition> {
        match self {
            Mode::Command(state) => command_key(state, key, ctx),
            Mode::Insert => insert_key(key, ctx).map(Transition::Continue),
            Mode::Select(state) => select_key(state, key, ctx).map(Transition::Continue),
        }
    }
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

fn is_motion(key: KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent::Left
            | KeyEvent::Right
            | KeyEvent::Up
            | KeyEvent::Down
            | KeyEvent::PageUp
            | KeyEvent::PageDown
            | KeyEvent::Home
            | KeyEvent::End
    )
}

/// Move the caret for a motion key; other keys are ignored
fn apply_motion(key: KeyEvent, doc: &mut Document) {
    let Document { buffer, caret, .. } = doc;
    match key {
        KeyEvent::Left => caret.move_left(buffer, 1),
        KeyEvent::Right => caret.move_right(buffer, 1),
        KeyEvent::Up => caret.move_up(buffer, 1),
        KeyEvent::Down => caret.move_down(buffer, 1),
        KeyEvent::PageUp => *caret = Position::ORIGIN,
        KeyEvent::PageDown => *caret = Position::end_of(buffer),
        KeyEvent::Home => caret.col = 0,
        KeyEvent::End => caret.col = buffer.line_len(caret.row),
        _ => {}
    }
}

fn push_pending(pending: &mut String, c: char, max_len: usize) {
    if pending.chars().count() < max_len {
        pending.push(c);
    }
}

/// Result of a command every mode understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum General {
    EnterInsert,
    EnterSelect,
    /// Saved, or the save was refused or cancelled
    Stay,
    /// Undo ran (possibly as a no-op), or redo restored a record
    History,
}

fn run_general_command(cmd: &ParsedCommand, ctx: &mut ModeContext<'_>) -> Result<Option<General>> {
    let outcome = match cmd.keyword.as_str() {
        "i" => General::EnterInsert,
        "v" => General::EnterSelect,
        "s" => {
            save(ctx)?;
            General::Stay
        }
        "z" => {
            undo(ctx)?;
            General::History
        }
        "y" => {
            if redo(ctx)? {
                General::History
            } else {
                General::Stay
            }
        }
        _ => return Ok(None),
    };
    debug!(command = %cmd.keyword, ?outcome, "general command");
    Ok(Some(outcome))
}

fn undo(ctx: &mut ModeContext<'_>) -> Result<()> {
    if !ctx.config.allow_undo {
        debug!("undo disabled by configuration");
        return Ok(());
    }
    if let Some(snapshot) = ctx.doc.history.undo()? {
        ctx.doc.restore(snapshot);
    }
    Ok(())
}

/// Returns whether a newer record was restored
fn redo(ctx: &mut ModeContext<'_>) -> Result<bool> {
    if !ctx.config.allow_undo {
        debug!("redo disabled by configuration");
        return Ok(false);
    }
    match ctx.doc.history.redo()? {
        Some(snapshot) => {
            ctx.doc.restore(snapshot);
            Ok(true)
        }
        None => {
            debug!("nothing to redo");
            Ok(false)
        }
    }
}

/// Write the document, binding a file first if there is none
///
/// Refusals and cancellations leave the document untouched. I/O failures are
/// returned and end the session.
fn save(ctx: &mut ModeContext<'_>) -> Result<()> {
    if ctx.config.read_only {
        ctx.display.show_message(&[READ_ONLY_SAVE])?;
        return Ok(());
    }
    if ctx.config.debug && !ctx.display.prompt_confirm(SAVE_CONFIRM, "save")? {
        debug!("save not confirmed");
        return Ok(());
    }

    let path = match &ctx.doc.path {
        Some(path) => path.clone(),
        None => {
            let entered = ctx.display.prompt_line(FILE_NAME_PROMPT)?;
            let entered = entered.trim();
            if entered.is_empty() {
                info!("save cancelled: no file name");
                return Ok(());
            }
            let path = PathBuf::from(entered);
            if !ctx.store.exists(&path) {
                ctx.store.create(&path)?;
            }
            ctx.doc.name = Some(ctx.store.basename(&path));
            ctx.doc.path = Some(path.clone());
            path
        }
    };

    if !ctx.store.exists(&path) {
        return Err(DimError::FileMissing { path });
    }
    ctx.store.write_text(&path, &ctx.doc.buffer.content())?;
    ctx.doc.history.mark_saved();
    info!(path = %path.display(), "saved");
    Ok(())
}

// =============================================================================
// COMMAND MODE
// =============================================================================

fn command_key(mut state: CommandState, key: KeyEvent, ctx: &mut ModeContext<'_>) -> Result<Transition> {
    match key {
        KeyEvent::Escape => {
            let unsaved = !(ctx.doc.is_saved() || ctx.config.read_only);
            if unsaved && !ctx.display.prompt_confirm(QUIT_CONFIRM, "y")? {
                return Ok(Transition::Continue(Mode::Command(state)));
            }
            return Ok(Transition::Exit(0));
        }
        KeyEvent::Backspace => {
            state.pending.pop();
        }
        KeyEvent::Newline => {
            let line = std::mem::take(&mut state.pending);
            let cmd = command::parse_or_empty(&line);
            return command_line(state, &cmd, ctx).map(Transition::Continue);
        }
        key if is_motion(key) => apply_motion(key, ctx.doc),
        KeyEvent::Char(c) => push_pending(&mut state.pending, c, ctx.config.max_command_len),
        _ => {}
    }
    Ok(Transition::Continue(Mode::Command(state)))
}

fn command_line(state: CommandState, cmd: &ParsedCommand, ctx: &mut ModeContext<'_>) -> Result<Mode> {
    if let Some(outcome) = run_general_command(cmd, ctx)? {
        return Ok(match outcome {
            General::EnterInsert => Mode::Insert,
            General::EnterSelect => Mode::select_at(ctx.doc.caret),
            General::Stay | General::History => Mode::Command(state),
        });
    }

    match cmd.keyword.as_str() {
        "x" => delete_at_caret(ctx.doc, cmd.count_arg(1))?,
        "" => {}
        other => warn!(command = other, "unknown command"),
    }
    Ok(Mode::Command(state))
}

/// Delete up to `count` characters at the caret, within the current line
fn delete_at_caret(doc: &mut Document, count: usize) -> Result<()> {
    let Position { row, col } = doc.caret;
    let end = col.saturating_add(count).min(doc.buffer.line_len(row));
    if col >= end {
        return Ok(());
    }
    doc.buffer.delete_range(row, col, end);
    doc.commit()
}

// =============================================================================
// INSERT MODE
// =============================================================================

fn insert_key(key: KeyEvent, ctx: &mut ModeContext<'_>) -> Result<Mode> {
    let doc = &mut *ctx.doc;
    match key {
        KeyEvent::Escape => return Ok(Mode::command()),
        KeyEvent::Backspace => {
            let Position { row, col } = doc.caret;
            if col > 0 {
                doc.buffer.delete_range(row, col - 1, col);
                doc.caret.col -= 1;
                doc.commit()?;
            } else if row > 0 {
                // join onto the previous line; caret lands on the seam
                doc.caret = Position::new(row - 1, doc.buffer.line_len(row - 1));
                doc.buffer.join_line(row - 1, row);
                doc.commit()?;
            }
        }
        KeyEvent::Tab => {
            let width = ctx.config.tab_width;
            doc.buffer.insert(doc.caret.row, doc.caret.col, &" ".repeat(width));
            doc.caret.col += width;
            doc.commit()?;
        }
        KeyEvent::Newline => {
            doc.buffer.split_line(doc.caret.row, doc.caret.col);
            doc.caret = Position::new(doc.caret.row + 1, 0);
            doc.commit()?;
        }
        key if is_motion(key) => apply_motion(key, doc),
        KeyEvent::Char(c) => {
            let mut utf8 = [0; 4];
            doc.buffer.insert(doc.caret.row, doc.caret.col, c.encode_utf8(&mut utf8));
            doc.caret.col += 1;
            doc.commit()?;
        }
        _ => {}
    }
    Ok(Mode::Insert)
}

// =============================================================================
// SELECT MODE
// =============================================================================

fn select_key(mut state: SelectState, key: KeyEvent, ctx: &mut ModeContext<'_>) -> Result<Mode> {
    match key {
        KeyEvent::Escape => return Ok(Mode::command()),
        KeyEvent::Backspace => {
            state.pending.pop();
        }
        KeyEvent::Newline => {
            let line = std::mem::take(&mut state.pending);
            let cmd = command::parse_or_empty(&line);
            return select_command(state, &cmd, ctx);
        }
        // space steps right so a selection can be grown without arrow keys
        KeyEvent::Char(' ') => {
            apply_motion(KeyEvent::Right, ctx.doc);
            state.selection.on_caret_moved(ctx.doc.caret);
        }
        key if is_motion(key) => {
            apply_motion(key, ctx.doc);
            state.selection.on_caret_moved(ctx.doc.caret);
        }
        KeyEvent::Char(c) => push_pending(&mut state.pending, c, ctx.config.max_command_len),
        _ => {}
    }
    Ok(Mode::Select(state))
}

fn select_command(state: SelectState, cmd: &ParsedCommand, ctx: &mut ModeContext<'_>) -> Result<Mode> {
    if cmd.keyword == "x" {
        ctx.doc.caret = state.selection.delete_from(&mut ctx.doc.buffer);
        ctx.doc.commit()?;
        debug!(start = %state.selection.start(), end = %state.selection.end(), "deleted selection");
        return Ok(Mode::command());
    }

    Ok(match run_general_command(cmd, ctx)? {
        Some(General::EnterInsert) => Mode::Insert,
        Some(General::History) => Mode::command(),
        Some(General::EnterSelect | General::Stay) => Mode::Select(state),
        None => {
            if !cmd.is_empty() {
                warn!(command = %cmd.keyword, "unknown command");
            }
            Mode::Select(state)
        }
    })
}
