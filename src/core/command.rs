//! Command-line grammar shared by Command and Select mode
//!
//! A command line is a keyword followed by zero or more bracketed arguments:
//!
//! ```text
//! x          keyword "x", no arguments
//! x[3]       keyword "x", arguments ["3"]
//! cmd[a][b]  keyword "cmd", arguments ["a", "b"]
//! ```
//!
//! Surrounding whitespace is ignored. A malformed line is reported as a
//! [`CommandParseError`]; mode handlers treat that the same as an unknown
//! keyword and drop it.

use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub keyword: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// The first argument parsed as a count, falling back to `default`
    pub fn count_arg(&self, default: usize) -> usize {
        self.args
            .first()
            .and_then(|arg| arg.trim().parse().ok())
            .unwrap_or(default)
    }

    pub fn is_empty(&self) -> bool {
        self.keyword.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unterminated bracket in argument {0}")]
    UnterminatedBracket(usize),
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },
}

/// Parse one command line
pub fn parse(line: &str) -> Result<ParsedCommand, CommandParseError> {
    let line = line.trim();
    let (keyword, mut rest) = match line.find('[') {
        Some(idx) => line.split_at(idx),
        None => (line, ""),
    };
    let keyword = keyword.trim_end();
    if keyword.is_empty() {
        return Err(CommandParseError::Empty);
    }

    let mut args = Vec::new();
    while !rest.is_empty() {
        let offset = line.len() - rest.len();
        let Some(body) = rest.strip_prefix('[') else {
            let ch = rest.chars().next().unwrap_or_default();
            return Err(CommandParseError::UnexpectedCharacter { ch, offset });
        };
        let Some(close) = body.find(']') else {
            return Err(CommandParseError::UnterminatedBracket(args.len()));
        };
        args.push(body[..close].to_string());
        rest = &body[close + 1..];
    }

    Ok(ParsedCommand {
        keyword: keyword.to_string(),
        args,
    })
}

/// Parse a line, degrading any failure to the empty command
pub fn parse_or_empty(line: &str) -> ParsedCommand {
    match parse(line) {
        Ok(cmd) => cmd,
        Err(CommandParseError::Empty) => ParsedCommand::default(),
        Err(err) => {
            tracing::warn!(line, %err, "dropping malformed command");
            ParsedCommand::default()
        }
    }
}
