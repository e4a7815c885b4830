//! Command-line argument parsing for dim.
//!
//! This module provides the `Cli` struct which encapsulates all command-line
//! options and methods for parsing them.

use std::path::PathBuf;

use crate::core::documents;
use crate::error::{DimError, Result};

pub const USAGE: &str = "\
dim - A modal terminal text editor

Usage: dim [OPTIONS] [FILE]

Options:
  -h, --help           Show this help message
  -V, --version        Show version information
  -g, --debug          Launch the editor in debug mode
  -t, --tutorial N     Open bundled tutorial N (read only)
      --read-only      Open the file without allowing saves
      --no-undo        Disable the undo and redo commands";

/// Command-line interface configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cli {
    /// File to edit
    pub file: Option<PathBuf>,

    /// Launch in debug mode
    pub debug: bool,

    /// Bundled tutorial index, 1-based
    pub tutorial: Option<usize>,

    /// Refuse to save
    pub read_only: bool,

    /// Disable undo/redo commands
    pub no_undo: bool,

    /// `--help` was given
    pub show_help: bool,

    /// `--version` was given
    pub show_version: bool,
}

impl Cli {
    /// Parse the process arguments.
    pub fn parse() -> Result<Self> {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse an argument list that excludes the program name.
    ///
    /// Returns `DimError::Usage` for unknown flags, missing values, more than
    /// one file, or a tutorial index that is not bundled.
    pub fn parse_from<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cli = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-g" | "--debug" => cli.debug = true,
                "--read-only" => cli.read_only = true,
                "--no-undo" => cli.no_undo = true,
                "-h" | "--help" => cli.show_help = true,
                "-V" | "--version" => cli.show_version = true,
                "-t" | "--tutorial" => {
                    let Some(value) = args.next() else {
                        return Err(DimError::Usage("--tutorial requires a value".into()));
                    };
                    cli.tutorial = Some(parse_tutorial_index(&value)?);
                }
                arg if arg.starts_with('-') && arg.len() > 1 => {
                    return Err(DimError::Usage(format!(
                        "Unknown flag: {arg}. Use --help for usage."
                    )));
                }
                _ => {
                    if cli.file.is_some() {
                        return Err(DimError::Usage(format!(
                            "Unexpected extra argument: {arg}. Only one file can be edited."
                        )));
                    }
                    cli.file = Some(PathBuf::from(arg));
                }
            }
        }

        Ok(cli)
    }
}

fn parse_tutorial_index(value: &str) -> Result<usize> {
    let index: usize = value
        .parse()
        .map_err(|_| DimError::Usage(format!("Invalid tutorial index: {value}")))?;
    let count = documents::tutorial_count();
    if !(1..=count).contains(&index) {
        return Err(DimError::Usage(format!(
            "Tutorial index must be between 1 and {count}, got {index}"
        )));
    }
    Ok(index)
}
