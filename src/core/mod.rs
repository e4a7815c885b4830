//! The headless editing engine of dim.
//!
//! Text storage, caret motion, undo history, selections and the modal key
//! handling all live here and never touch the terminal directly; screen and
//! file access go through the traits in [`editor`].

pub mod buffer;
pub mod command;
pub mod documents;
pub mod editor;
pub mod header;
pub mod key;
pub mod mode;
pub mod position;
pub mod selection;
pub mod undo;
pub mod viewport;
