// Configuration module
// Immutable run configuration, built once from the command line

use std::path::PathBuf;

use crate::cli::Cli;

/// Longest pending command line accepted in Command and Select mode
pub const DEFAULT_MAX_COMMAND_LEN: usize = 20;

/// Spaces inserted by Tab in Insert mode
pub const DEFAULT_TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File named on the command line, if any
    pub file: Option<PathBuf>,
    pub read_only: bool,
    pub debug: bool,
    /// When false, `z` and `y` do nothing
    pub allow_undo: bool,
    pub max_command_len: usize,
    pub tab_width: usize,
    /// 1-based index of a bundled tutorial to open instead of `file`
    pub tutorial: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            read_only: false,
            debug: false,
            allow_undo: true,
            max_command_len: DEFAULT_MAX_COMMAND_LEN,
            tab_width: DEFAULT_TAB_WIDTH,
            tutorial: None,
        }
    }
}

impl Config {
    /// Build the configuration from parsed arguments
    ///
    /// A tutorial always opens read-only.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            file: cli.file.clone(),
            read_only: cli.read_only || cli.tutorial.is_some(),
            debug: cli.debug,
            allow_undo: !cli.no_undo,
            tutorial: cli.tutorial,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.file, None);
        assert!(!config.read_only);
        assert!(!config.debug);
        assert!(config.allow_undo);
        assert_eq!(config.max_command_len, 20);
        assert_eq!(config.tab_width, 4);
    }

    #[test]
    fn test_from_cli_copies_flags() {
        let cli = Cli {
            file: Some(PathBuf::from("notes.txt")),
            debug: true,
            no_undo: true,
            ..Cli::default()
        };
        let config = Config::from_cli(&cli);
        assert_eq!(config.file.as_deref(), Some(std::path::Path::new("notes.txt")));
        assert!(config.debug);
        assert!(!config.allow_undo);
        assert!(!config.read_only);
    }

    #[test]
    fn test_tutorial_forces_read_only() {
        let cli = Cli {
            tutorial: Some(2),
            ..Cli::default()
        };
        let config = Config::from_cli(&cli);
        assert!(config.read_only);
        assert_eq!(config.tutorial, Some(2));
    }
}
