//! Snapshot undo/redo history
//!
//! Every committed edit pushes the full document text, zlib-compressed, together
//! with the caret. The history is a vector plus a pointer to the current record;
//! pushing while the pointer is not at the newest record discards the redo branch.
//! The manager also owns the dirty flag, since every push, undo and redo changes
//! the document relative to what was last saved.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::core::position::Position;
use crate::error::{DimError, Result};

/// One history entry: caret plus compressed document text
#[derive(Debug, Clone)]
pub struct UndoRecord {
    pub caret: Position,
    compressed: Vec<u8>,
}

impl UndoRecord {
    fn capture(caret: Position, text: &str) -> Result<Self> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(text.as_bytes()).map_err(DimError::Snapshot)?;
        let compressed = encoder.finish().map_err(DimError::Snapshot)?;
        Ok(Self { caret, compressed })
    }

    fn restore(&self) -> Result<Snapshot> {
        let mut text = String::new();
        ZlibDecoder::new(self.compressed.as_slice())
            .read_to_string(&mut text)
            .map_err(DimError::Snapshot)?;
        Ok(Snapshot {
            caret: self.caret,
            text,
        })
    }

    /// Size of the stored snapshot in bytes
    pub fn compressed_len(&self) -> usize {
        self.compressed.len()
    }
}

/// A decompressed history entry handed back by undo/redo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub caret: Position,
    pub text: String,
}

#[derive(Debug)]
pub struct UndoManager {
    history: Vec<UndoRecord>,
    /// Index of the current record; meaningless while `history` is empty
    pointer: usize,
    saved: bool,
}

impl UndoManager {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            pointer: 0,
            saved: true,
        }
    }

    /// Record the document state after a committed edit
    pub fn push_state(&mut self, caret: Position, text: &str) -> Result<()> {
        let record = UndoRecord::capture(caret, text)?;
        if !self.history.is_empty() {
            self.history.truncate(self.pointer + 1);
        }
        self.history.push(record);
        self.pointer = self.history.len() - 1;
        self.saved = false;
        Ok(())
    }

    /// Step back one record
    ///
    /// At the oldest record this returns that record again without moving.
    /// Returns `None` only when nothing has ever been pushed.
    pub fn undo(&mut self) -> Result<Option<Snapshot>> {
        if self.history.is_empty() {
            return Ok(None);
        }
        if self.pointer > 0 {
            self.pointer -= 1;
            self.saved = false;
        }
        self.history[self.pointer].restore().map(Some)
    }

    /// Step forward one record; `None` means there is nothing to redo
    pub fn redo(&mut self) -> Result<Option<Snapshot>> {
        if self.pointer + 1 >= self.history.len() {
            return Ok(None);
        }
        self.pointer += 1;
        self.saved = false;
        self.history[self.pointer].restore().map(Some)
    }

    /// Drop all history, e.g. when a different document is loaded
    pub fn clear(&mut self) {
        self.history.clear();
        self.pointer = 0;
        self.saved = true;
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.history.len()
    }

    /// Number of records in the history
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn current(&self) -> Option<&UndoRecord> {
        self.history.get(self.pointer)
    }

    /// True when the document matches what was last written (or loaded)
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn mark_saved(&mut self) {
        self.saved = true;
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with(states: &[&str]) -> UndoManager {
        let mut undo = UndoManager::new();
        for (i, text) in states.iter().enumerate() {
            undo.push_state(Position::new(0, i), text).unwrap();
        }
        undo
    }

    #[test]
    fn test_push_advances_pointer_and_dirties() {
        let undo = manager_with(&["", "a", "ab"]);
        assert_eq!(undo.len(), 3);
        assert_eq!(undo.pointer(), 2);
        assert!(!undo.is_saved());
        assert!(undo.can_undo());
        assert!(!undo.can_redo());
    }

    #[test]
    fn test_undo_then_redo_restores_text_and_caret() {
        let mut undo = manager_with(&["", "a", "ab"]);
        let back = undo.undo().unwrap().unwrap();
        assert_eq!(back.text, "a");
        assert_eq!(back.caret, Position::new(0, 1));

        let forward = undo.redo().unwrap().unwrap();
        assert_eq!(forward.text, "ab");
        assert_eq!(forward.caret, Position::new(0, 2));
    }

    #[test]
    fn test_undo_at_oldest_record_is_stable() {
        let mut undo = manager_with(&["start"]);
        undo.mark_saved();
        let snap = undo.undo().unwrap().unwrap();
        assert_eq!(snap.text, "start");
        assert_eq!(undo.pointer(), 0);
        assert!(undo.is_saved());
    }

    #[test]
    fn test_redo_at_newest_record_is_noop() {
        let mut undo = manager_with(&["", "x"]);
        assert!(undo.redo().unwrap().is_none());
        assert_eq!(undo.pointer(), 1);
    }

    #[test]
    fn test_push_after_undo_discards_redo_branch() {
        let mut undo = manager_with(&["", "a", "ab", "abc"]);
        undo.undo().unwrap();
        undo.undo().unwrap();
        undo.push_state(Position::new(0, 2), "aX").unwrap();

        assert_eq!(undo.len(), 3);
        assert!(!undo.can_redo());
        assert!(undo.redo().unwrap().is_none());
        assert_eq!(undo.undo().unwrap().unwrap().text, "a");
    }

    #[test]
    fn test_clear_resets_to_initial_state() {
        let mut undo = manager_with(&["", "a"]);
        undo.clear();
        assert!(undo.is_empty());
        assert!(undo.is_saved());
        assert!(undo.undo().unwrap().is_none());
        assert!(undo.redo().unwrap().is_none());
    }

    #[test]
    fn test_snapshots_are_compressed() {
        let text = "line of repeated text\n".repeat(500);
        let undo = manager_with(&[text.as_str()]);
        let record = undo.current().unwrap();
        assert!(record.compressed_len() < text.len() / 10);
    }
}
