//! Diagnostic logging
//!
//! The terminal belongs to the editor while it runs, so logs never go to
//! stdout or stderr. Setting `DIM_LOG` to a filter directive (for example
//! `DIM_LOG=dim=debug`) appends logs to `DIM_LOG_FILE`, or to `dim.log` in the
//! system temp directory. Without `DIM_LOG` no subscriber is installed.

use std::env::VarError;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const FILTER_VAR: &str = "DIM_LOG";
pub const FILE_VAR: &str = "DIM_LOG_FILE";
const DEFAULT_FILE_NAME: &str = "dim.log";

/// Where and what to log, if anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub filter: String,
    pub path: PathBuf,
}

/// Resolve the log target from an environment lookup
pub fn log_target<F>(get_env: F) -> Option<LogTarget>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let filter = get_env(FILTER_VAR).ok().filter(|f| !f.trim().is_empty())?;
    let path = get_env(FILE_VAR)
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_FILE_NAME));
    Some(LogTarget { filter, path })
}

/// Install the file logger when `DIM_LOG` is set
///
/// Logging is best effort: an unwritable log file or a bad filter leaves
/// logging off rather than stopping the editor.
pub fn init_logging() {
    let Some(target) = log_target(|key| std::env::var(key)) else {
        return;
    };
    let Ok(env_filter) = EnvFilter::try_new(&target.filter) else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&target.path) else {
        return;
    };

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
    tracing::info!(path = %target.path.display(), "logging started");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_env<'a>(vars: &'a [(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn test_no_filter_means_no_logging() {
        assert_eq!(log_target(mock_env(&[])), None);
        assert_eq!(log_target(mock_env(&[(FILTER_VAR, "  ")])), None);
    }

    #[test]
    fn test_default_file_in_temp_dir() {
        let target = log_target(mock_env(&[(FILTER_VAR, "debug")])).unwrap();
        assert_eq!(target.filter, "debug");
        assert_eq!(target.path, std::env::temp_dir().join("dim.log"));
    }

    #[test]
    fn test_explicit_file() {
        let target = log_target(mock_env(&[(FILTER_VAR, "dim=trace"), (FILE_VAR, "/var/tmp/x.log")]));
        assert_eq!(target.map(|t| t.path), Some(PathBuf::from("/var/tmp/x.log")));
    }
}
