//! Column alignment measured in visible terminal columns
//!
//! ANSI styling sequences are stripped before measuring, so a bold or
//! coloured cell pads exactly like its plain text.

use std::fmt;
use std::str::FromStr;
use unicode_width::UnicodeWidthStr;

use crate::error::{ErrorContext, ReportError};

/// Horizontal placement of a value inside its column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Pad `content` to `width` visible columns
    pub fn apply(self, content: &str, width: usize) -> String {
        match self {
            Alignment::Left => left_aligned(content, width),
            Alignment::Right => right_aligned(content, width),
            Alignment::Center => center_aligned(content, width),
        }
    }

    /// Default for data cells: first column left, the rest right
    pub fn positional(index: usize) -> Self {
        if index == 0 {
            Alignment::Left
        } else {
            Alignment::Right
        }
    }
}

impl FromStr for Alignment {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "right" => Ok(Alignment::Right),
            "center" | "centre" => Ok(Alignment::Center),
            _ => Err(ReportError::config(
                "parse_alignment",
                "invalid alignment value, expected left, right or center",
                ErrorContext::new().with("alignment", s),
            )),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
        };
        f.write_str(name)
    }
}

/// Display width of `content` without styling sequences
pub fn visible_width(content: &str) -> usize {
    if content.contains('\x1b') {
        UnicodeWidthStr::width(strip_ansi_escapes::strip_str(content).as_str())
    } else {
        UnicodeWidthStr::width(content)
    }
}

fn padding(content: &str, width: usize) -> usize {
    width.saturating_sub(visible_width(content))
}

/// Pad on the right
pub fn left_aligned(content: &str, width: usize) -> String {
    format!("{}{}", content, " ".repeat(padding(content, width)))
}

/// Pad on the left
pub fn right_aligned(content: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(padding(content, width)), content)
}

/// Split the padding, the odd space going to the right
pub fn center_aligned(content: &str, width: usize) -> String {
    let total = padding(content, width);
    let left = total / 2;
    format!("{}{}{}", " ".repeat(left), content, " ".repeat(total - left))
}
