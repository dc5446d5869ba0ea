//! Styling of report cells
//!
//! Wraps the `colored` crate so every style used by the table renderer
//! degrades to plain text when colours are disabled.

use colored::{ColoredString, Colorize};
use super::config::{ColourConfig, ColourPalette};

#[derive(Debug, Clone)]
pub struct ColourManager {
    config: ColourConfig,
    palette: ColourPalette,
}

impl ColourManager {
    pub fn new() -> Self {
        Self::with_config(ColourConfig::default())
    }

    /// Create a ColourManager with explicit colour control
    pub fn with_colours(enabled: bool) -> Self {
        let mut config = ColourConfig::default();
        config.set_enabled(enabled);
        Self::with_config(config)
    }

    pub fn with_config(config: ColourConfig) -> Self {
        let palette = config.palette();
        Self { config, palette }
    }

    /// Build from `--no-color` / `--color` and the configuration file.
    ///
    /// `--no-color` wins over `--color`, which wins over the file.
    pub fn from_color_args(no_color: bool, color: bool, config: Option<ColourConfig>) -> Self {
        let mut config = config.unwrap_or_default();
        if no_color {
            config.set_enabled(false);
        } else if color {
            config.set_enabled(true);
            config.set_color_forced(true);
        }
        Self::with_config(config)
    }

    pub fn colours_enabled(&self) -> bool {
        self.config.should_use_colours()
    }

    pub fn config(&self) -> &ColourConfig {
        &self.config
    }

    pub fn palette(&self) -> &ColourPalette {
        &self.palette
    }

    /// Bold; header cells, established repositories and larger sizes
    pub fn emphasis(&self, text: &str) -> ColoredString {
        if self.colours_enabled() {
            text.bold()
        } else {
            text.normal()
        }
    }

    /// Dimmed; zero counts, young repositories and small sizes
    pub fn muted(&self, text: &str) -> ColoredString {
        if self.colours_enabled() {
            text.dimmed()
        } else {
            text.normal()
        }
    }

    /// Colour `text` by language; unknown languages stay unstyled
    pub fn language(&self, text: &str, language: &str) -> ColoredString {
        match self.palette.language(&language.to_lowercase()) {
            Some(color) if self.colours_enabled() => text.color(color),
            _ => text.normal(),
        }
    }
}

impl Default for ColourManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::ColourTheme;

    #[test]
    fn test_colour_manager_explicit_disable() {
        let manager = ColourManager::with_colours(false);
        assert!(!manager.colours_enabled());
    }

    #[test]
    fn test_flag_precedence() {
        let forced = ColourManager::from_color_args(false, true, Some(ColourConfig::disabled()));
        assert!(forced.colours_enabled());

        let off = ColourManager::from_color_args(true, true, None);
        assert!(!off.colours_enabled());
    }

    #[test]
    fn test_palette_follows_theme() {
        let mut config = ColourConfig::default();
        config.set_theme(ColourTheme::Dark);
        let manager = ColourManager::with_config(config);
        assert_eq!(manager.palette(), &ColourTheme::Dark.palette());
    }

    #[test]
    fn test_styles_are_plain_when_disabled() {
        let manager = ColourManager::with_colours(false);
        assert_eq!(manager.emphasis("Repo").to_string(), "Repo");
        assert_eq!(manager.muted("0").to_string(), "0");
        assert_eq!(manager.language("Go 71%", "Go").to_string(), "Go 71%");
    }

    #[test]
    fn test_unknown_language_is_unstyled() {
        let manager = ColourManager::from_color_args(false, true, None);
        assert_eq!(manager.language("Cobol 90%", "cobol").to_string(), "Cobol 90%");
    }
}
