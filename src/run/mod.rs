//! Terminal session wiring for dim.
//!
//! Loads the document, puts the terminal in raw mode and runs the editor loop
//! until the user quits. The raw-mode guard lives only inside [`run`], so the
//! terminal is restored before the caller prints any diagnostic.

use std::io::{self, IsTerminal};

use tracing::info;

use crate::config::Config;
use crate::core::editor::{Document, Editor};
use crate::error::{DimError, Result};
use crate::store::FsStore;
use crate::terminal::display::TerminalDisplay;
use crate::terminal::raw::RawMode;

/// Run an interactive session and return the process exit code
pub fn run(config: Config) -> Result<u8> {
    require_terminal(io::stdin().is_terminal(), io::stdout().is_terminal())?;

    let store = FsStore::new();
    let doc = Document::load(&config, &store)?;

    let _raw_mode = RawMode::new()?;
    let display = TerminalDisplay::new_terminal()?;
    let mut editor = Editor::new(config, display, store, doc);
    let code = editor.launch()?;
    info!(code, "editor exited");
    Ok(code)
}

/// The editor reads keys from stdin and draws on stdout; both must be terminals
pub fn require_terminal(stdin_tty: bool, stdout_tty: bool) -> Result<()> {
    if stdin_tty && stdout_tty {
        Ok(())
    } else {
        Err(DimError::Terminal(io::Error::other(
            "dim must be run in an interactive terminal",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_terminal() {
        assert!(require_terminal(true, true).is_ok());
        let err = require_terminal(false, true).unwrap_err();
        assert!(matches!(err, DimError::Terminal(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(require_terminal(true, false).is_err());
    }
}
