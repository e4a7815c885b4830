//! Terminal color definitions and ANSI conversion
//!
//! Provides the Color enum used by TUI rendering, the editor's fixed color
//! theme, and detection of how many colors the terminal can show.

use std::env::VarError;

use crate::core::header::HeaderStyle;

/// Terminal color: default, 16-color ANSI, 256-color palette index, or RGB
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Ansi256(u8),
    Rgb { r: u8, g: u8, b: u8 },
}

const BASIC: [Color; 16] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
    Color::BrightBlack,
    Color::BrightRed,
    Color::BrightGreen,
    Color::BrightYellow,
    Color::BrightBlue,
    Color::BrightMagenta,
    Color::BrightCyan,
    Color::BrightWhite,
];

impl Color {
    /// Convert Color enum to ANSI foreground color code
    pub fn to_ansi_fg_code(self) -> String {
        match self {
            Color::Reset => "39".to_string(),
            Color::Black => "30".to_string(),
            Color::Red => "31".to_string(),
            Color::Green => "32".to_string(),
            Color::Yellow => "33".to_string(),
            Color::Blue => "34".to_string(),
            Color::Magenta => "35".to_string(),
            Color::Cyan => "36".to_string(),
            Color::White => "37".to_string(),
            Color::BrightBlack => "90".to_string(),
            Color::BrightRed => "91".to_string(),
            Color::BrightGreen => "92".to_string(),
            Color::BrightYellow => "93".to_string(),
            Color::BrightBlue => "94".to_string(),
            Color::BrightMagenta => "95".to_string(),
            Color::BrightCyan => "96".to_string(),
            Color::BrightWhite => "97".to_string(),
            Color::Ansi256(n) => format!("38;5;{n}"),
            Color::Rgb { r, g, b } => format!("38;2;{r};{g};{b}"),
        }
    }

    /// Convert Color enum to ANSI background color code
    pub fn to_ansi_bg_code(self) -> String {
        match self {
            Color::Reset => "49".to_string(),
            Color::Black => "40".to_string(),
            Color::Red => "41".to_string(),
            Color::Green => "42".to_string(),
            Color::Yellow => "43".to_string(),
            Color::Blue => "44".to_string(),
            Color::Magenta => "45".to_string(),
            Color::Cyan => "46".to_string(),
            Color::White => "47".to_string(),
            Color::BrightBlack => "100".to_string(),
            Color::BrightRed => "101".to_string(),
            Color::BrightGreen => "102".to_string(),
            Color::BrightYellow => "103".to_string(),
            Color::BrightBlue => "104".to_string(),
            Color::BrightMagenta => "105".to_string(),
            Color::BrightCyan => "106".to_string(),
            Color::BrightWhite => "107".to_string(),
            Color::Ansi256(n) => format!("48;5;{n}"),
            Color::Rgb { r, g, b } => format!("48;2;{r};{g};{b}"),
        }
    }

    /// RGB value of a 256-color palette entry from the cube or gray ramp
    fn palette_rgb(n: u8) -> (u8, u8, u8) {
        match n {
            16..=231 => {
                let i = n - 16;
                let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
                (level(i / 36), level((i / 6) % 6), level(i % 6))
            }
            232..=255 => {
                let gray = 8 + (n - 232) * 10;
                (gray, gray, gray)
            }
            _ => (0, 0, 0),
        }
    }

    /// Convert to the nearest 16-color ANSI value for terminals without 256 colors
    pub fn to_ansi_fallback(self) -> Self {
        let (r, g, b) = match self {
            Color::Ansi256(n) if n < 16 => return BASIC[n as usize],
            Color::Ansi256(n) => Self::palette_rgb(n),
            Color::Rgb { r, g, b } => (r, g, b),
            other => return other,
        };

        let luminance = (r as u32 + g as u32 + b as u32) / 3;
        let bright = luminance > 127;
        let threshold = 85;

        let has_r = r > threshold;
        let has_g = g > threshold;
        let has_b = b > threshold;

        match (has_r, has_g, has_b, bright) {
            (false, false, false, false) => Color::Black,
            (false, false, false, true) => Color::BrightBlack,
            (true, false, false, false) => Color::Red,
            (true, false, false, true) => Color::BrightRed,
            (false, true, false, false) => Color::Green,
            (false, true, false, true) => Color::BrightGreen,
            (true, true, false, false) => Color::Yellow,
            (true, true, false, true) => Color::BrightYellow,
            (false, false, true, false) => Color::Blue,
            (false, false, true, true) => Color::BrightBlue,
            (true, false, true, false) => Color::Magenta,
            (true, false, true, true) => Color::BrightMagenta,
            (false, true, true, false) => Color::Cyan,
            (false, true, true, true) => Color::BrightCyan,
            (true, true, true, false) => Color::White,
            (true, true, true, true) => Color::BrightWhite,
        }
    }
}

// =============================================================================
// COLOR DEPTH
// =============================================================================

/// How many colors the terminal can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    /// 256-color palette or better
    Extended,
    /// The 16 standard ANSI colors
    Basic,
}

impl ColorDepth {
    pub fn detect() -> Self {
        Self::detect_with_env(|key| std::env::var(key))
    }

    /// Detection with an injectable environment lookup
    pub fn detect_with_env<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        if let Ok(colorterm) = get_env("COLORTERM") {
            if colorterm.contains("truecolor") || colorterm.contains("24bit") {
                return ColorDepth::Extended;
            }
        }
        match get_env("TERM") {
            Ok(term)
                if term.contains("256color")
                    || term.starts_with("xterm-kitty")
                    || term.starts_with("tmux")
                    || term.contains("truecolor") =>
            {
                ColorDepth::Extended
            }
            _ => ColorDepth::Basic,
        }
    }

    /// The color to emit on a terminal of this depth
    pub fn adapt(self, color: Color) -> Color {
        match self {
            ColorDepth::Extended => color,
            ColorDepth::Basic => color.to_ansi_fallback(),
        }
    }
}

// =============================================================================
// THEME
// =============================================================================

/// Foreground and background of one kind of screen element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub fg: Color,
    pub bg: Color,
}

impl ColorPair {
    const fn palette(fg: u8, bg: u8) -> Self {
        Self {
            fg: Color::Ansi256(fg),
            bg: Color::Ansi256(bg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text: ColorPair,
    pub header: ColorPair,
    pub title: ColorPair,
    pub file_name: ColorPair,
    pub mode: ColorPair,
    pub command: ColorPair,
    pub highlight: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: ColorPair::palette(7, 233),
            header: ColorPair::palette(7, 237),
            title: ColorPair::palette(221, 237),
            file_name: ColorPair::palette(200, 237),
            mode: ColorPair::palette(35, 237),
            command: ColorPair::palette(150, 237),
            highlight: ColorPair::palette(233, 7),
        }
    }
}

impl Theme {
    pub fn header_style(&self, style: HeaderStyle) -> ColorPair {
        match style {
            HeaderStyle::Title => self.title,
            HeaderStyle::FileName => self.file_name,
            HeaderStyle::Command => self.command,
            HeaderStyle::Mode => self.mode,
            HeaderStyle::Plain | HeaderStyle::Rule => self.header,
        }
    }
}
