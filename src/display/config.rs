//! Colour configuration and language palettes
//!
//! Decides whether styling is applied at all and which colour each known
//! language gets in the stats table.

use colored::Color;
use std::io::IsTerminal;

/// Whether and how the report is styled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourConfig {
    /// Master switch; `false` always means plain text
    pub enabled: bool,
    pub theme: ColourTheme,
    /// Honour the `NO_COLOR` environment variable
    pub respect_no_color: bool,
    /// Style even when stdout is not a terminal (`--color`)
    pub color_forced: bool,
}

impl Default for ColourConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: ColourTheme::Auto,
            respect_no_color: true,
            color_forced: false,
        }
    }
}

/// Palette selection by terminal background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourTheme {
    Auto,
    Light,
    Dark,
}

impl ColourTheme {
    /// Theme by name as written in the configuration file
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "auto" => Some(ColourTheme::Auto),
            "light" => Some(ColourTheme::Light),
            "dark" => Some(ColourTheme::Dark),
            _ => None,
        }
    }

    pub fn palette(self) -> ColourPalette {
        match self {
            ColourTheme::Auto => ColourPalette::default(),
            ColourTheme::Light => ColourPalette::light(),
            ColourTheme::Dark => ColourPalette::dark(),
        }
    }
}

/// Colour of each language recognised in the `Language` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourPalette {
    pub go: Color,
    pub julia: Color,
    pub python: Color,
    pub r: Color,
    pub rust: Color,
    pub shell: Color,
}

impl Default for ColourPalette {
    fn default() -> Self {
        Self {
            go: Color::Blue,
            julia: Color::Magenta,
            python: Color::Green,
            r: Color::Cyan,
            rust: Color::Yellow,
            shell: Color::Red,
        }
    }
}

impl ColourPalette {
    /// Yellow is unreadable on white, so Rust turns grey
    pub fn light() -> Self {
        Self {
            rust: Color::BrightBlack,
            ..Self::default()
        }
    }

    pub fn dark() -> Self {
        Self {
            go: Color::BrightBlue,
            julia: Color::BrightMagenta,
            python: Color::BrightGreen,
            r: Color::BrightCyan,
            rust: Color::BrightYellow,
            shell: Color::BrightRed,
        }
    }

    /// Colour for a lowercase language name, if the language is known
    pub fn language(&self, key: &str) -> Option<Color> {
        match key {
            "go" => Some(self.go),
            "julia" => Some(self.julia),
            "python" => Some(self.python),
            "r" => Some(self.r),
            "rust" => Some(self.rust),
            "shell" => Some(self.shell),
            _ => None,
        }
    }
}

impl ColourConfig {
    /// Create a colour configuration with colours disabled
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_theme(&mut self, theme: ColourTheme) {
        self.theme = theme;
    }

    /// Force colours to be enabled (--color flag)
    pub fn set_color_forced(&mut self, forced: bool) {
        self.color_forced = forced;
    }

    /// Enabled, then forced, then `NO_COLOR`, then terminal detection
    pub fn should_use_colours(&self) -> bool {
        match (self.enabled, self.color_forced) {
            (false, _) => false,
            (true, true) => true,
            (true, false) if self.respect_no_color => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
            (true, false) => true,
        }
    }

    pub fn palette(&self) -> ColourPalette {
        self.theme.palette()
    }
}
