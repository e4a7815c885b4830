use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Result;

static TERMINAL_INITIALIZED: AtomicBool = AtomicBool::new(false);

type PanicHook = Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Sync + Send + 'static>;

/// RAII wrapper for raw mode and alternate screen.
/// Enables raw mode and enters alternate screen on creation.
/// Restores terminal state on drop, and before a panic message is printed.
pub struct RawMode {
    original_hook: Option<PanicHook>,
}

impl RawMode {
    /// Enter raw mode and alternate screen
    pub fn new() -> Result<Self> {
        crossterm::terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        let entered = crossterm::execute!(
            stdout,
            crossterm::terminal::EnterAlternateScreen,
            crossterm::cursor::Hide,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
        );
        TERMINAL_INITIALIZED.store(true, Ordering::SeqCst);
        if let Err(err) = entered {
            restore_terminal();
            return Err(err.into());
        }

        // Set up panic hook to restore terminal before printing panic
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|info| {
            restore_terminal();
            eprintln!("{info}");
        }));

        Ok(Self {
            original_hook: Some(original_hook),
        })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        restore_terminal();

        if let Some(hook) = self.original_hook.take() {
            std::panic::set_hook(hook);
        }
    }
}

/// Leave the alternate screen, show the cursor and disable raw mode
///
/// Safe to call more than once; only the first call after `RawMode::new`
/// touches the terminal.
pub fn restore_terminal() {
    if TERMINAL_INITIALIZED.swap(false, Ordering::SeqCst) {
        let mut stdout = io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
            crossterm::cursor::MoveTo(0, 0),
            crossterm::cursor::Show,
            crossterm::terminal::LeaveAlternateScreen
        );
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Raw mode itself is not exercised here; toggling it would disturb the
    // test runner's terminal.

    #[test]
    fn test_restore_without_init_is_noop() {
        restore_terminal();
        assert!(!TERMINAL_INITIALIZED.load(Ordering::SeqCst));
    }

    #[test]
    fn test_drop_without_hook() {
        let guard = RawMode {
            original_hook: None,
        };
        drop(guard);
    }
}
