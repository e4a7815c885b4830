//! Error types for dim.
//!
//! Only conditions the editor cannot recover from end up here: file I/O while
//! loading or saving, terminal failures, and bad command-line usage. Mistyped
//! editor commands are not errors; they are dropped by the mode handlers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DimError {
    /// Reading or writing a document failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bound file disappeared between load and save.
    #[error("File no longer exists: {}", .path.display())]
    FileMissing { path: PathBuf },

    /// The document is not valid UTF-8.
    #[error("Unsupported text encoding in {}", .path.display())]
    Encoding { path: PathBuf },

    /// Creating a new file (or its directory) on first save failed.
    #[error("Could not create {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Raw mode, drawing or key input failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Compressing or restoring an undo snapshot failed.
    #[error("Undo snapshot error: {0}")]
    Snapshot(#[source] io::Error),

    /// Invalid command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// `--tutorial` named a document that is not bundled.
    #[error("Tutorial {0} does not exist")]
    TutorialNotFound(usize),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DimError>;

impl DimError {
    /// Process exit code for this error; `0` is reserved for a normal quit.
    pub fn exit_code(&self) -> u8 {
        match self {
            DimError::Usage(_) | DimError::TutorialNotFound(_) => 2,
            _ => 1,
        }
    }

    /// The short explanation printed after the terminal has been restored.
    pub fn diagnostic(&self) -> String {
        match self {
            DimError::Io { .. } => "The path given is invalid or inaccessible.".to_string(),
            DimError::FileMissing { .. } => "The current file can no longer be found.".to_string(),
            DimError::Encoding { .. } => "The encoding of the file is not supported.".to_string(),
            DimError::CreateFile { .. } => "An error occurred when creating the file.".to_string(),
            DimError::Terminal(e) => format!("The terminal could not be driven: {e}"),
            DimError::Snapshot(e) => format!("The undo history could not be recorded: {e}"),
            DimError::Usage(msg) => msg.clone(),
            DimError::TutorialNotFound(_) => {
                "There was an error while looking for the selected tutorial file.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DimError::FileMissing {
            path: PathBuf::from("/tmp/gone.txt"),
        };
        assert_eq!(err.to_string(), "File no longer exists: /tmp/gone.txt");

        let err = DimError::TutorialNotFound(9);
        assert_eq!(err.to_string(), "Tutorial 9 does not exist");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(DimError::Usage("bad flag".into()).exit_code(), 2);
        assert_eq!(
            DimError::Encoding {
                path: PathBuf::from("x")
            }
            .exit_code(),
            1
        );
        assert_eq!(DimError::TutorialNotFound(4).exit_code(), 2);
    }

    #[test]
    fn test_io_error_converts_to_terminal() {
        let err: DimError = io::Error::other("tty gone").into();
        assert!(matches!(err, DimError::Terminal(_)));
    }
}
