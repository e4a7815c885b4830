//! Header line composition
//!
//! The header is the top screen row: title, file name, the pending command and
//! the mode, laid out so the mode label stays a fixed distance from the right
//! edge. A horizontal rule on the second row separates it from the text.

/// How a header segment is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderStyle {
    Title,
    Plain,
    FileName,
    Command,
    Mode,
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSegment {
    pub text: String,
    pub style: HeaderStyle,
}

impl HeaderSegment {
    fn new(text: impl Into<String>, style: HeaderStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn spaces(n: usize) -> Self {
        Self::new(" ".repeat(n), HeaderStyle::Plain)
    }
}

const TITLE: &str = " Dim v1";
const RULE_CHAR: char = '─';
// Fixed text around the variable parts: title, spacers and labels
const FIXED_WIDTH: usize = 56;

/// Compose the header row segments followed by one `Rule` segment for row two
///
/// `file_name` of `None` is shown as "None". Lengths are in characters.
pub fn compose(width: usize, file_name: Option<&str>, mode: &str, command: &str) -> Vec<HeaderSegment> {
    let name = file_name.unwrap_or("None");
    let used = FIXED_WIDTH + name.chars().count() + mode.chars().count() + command.chars().count();
    let padding = width.saturating_sub(used);

    vec![
        HeaderSegment::new(TITLE, HeaderStyle::Title),
        HeaderSegment::spaces(5),
        HeaderSegment::new(format!("Editing {name}"), HeaderStyle::FileName),
        HeaderSegment::spaces(20),
        HeaderSegment::new(command, HeaderStyle::Command),
        HeaderSegment::spaces(padding),
        HeaderSegment::new(format!("Mode: {mode}"), HeaderStyle::Mode),
        HeaderSegment::spaces(10),
        HeaderSegment::new(RULE_CHAR.to_string().repeat(width), HeaderStyle::Rule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(segments: &[HeaderSegment]) -> String {
        segments
            .iter()
            .filter(|seg| seg.style != HeaderStyle::Rule)
            .map(|seg| seg.text.as_str())
            .collect()
    }

    #[test]
    fn test_header_fills_width() {
        let segments = compose(100, Some("notes.txt"), "COMMAND", "x[2");
        let row = row_text(&segments);
        assert_eq!(row.chars().count(), 100);
        assert!(row.starts_with(" Dim v1     Editing notes.txt"));
        assert!(row.ends_with("Mode: COMMAND          "));
    }

    #[test]
    fn test_missing_name_and_narrow_terminal() {
        let segments = compose(30, None, "INSERT", "");
        assert!(row_text(&segments).contains("Editing None"));
        let padding = &segments[5];
        assert_eq!(padding.style, HeaderStyle::Plain);
        assert!(padding.text.is_empty());
    }

    #[test]
    fn test_rule_spans_width() {
        let segments = compose(42, None, "SELECT", "");
        let rule = segments.last().unwrap();
        assert_eq!(rule.style, HeaderStyle::Rule);
        assert_eq!(rule.text.chars().count(), 42);
    }
}
