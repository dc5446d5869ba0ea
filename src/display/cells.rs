//! Per-kind value transforms applied to Markdown cells before alignment

use super::align::{left_aligned, visible_width};
use super::ColourManager;
use crate::report::FieldKind;

/// Host prefix removed from remote URLs in table cells
pub const GITHUB_PREFIX: &str = "https://github.com/";

/// Style a raw value for the column at `index`, ready for alignment.
///
/// Paired values (age, language, size) are spread across the column width.
/// Any column after the first shows a bare `"0"` muted.
pub fn format_cell(colours: &ColourManager, kind: FieldKind, value: &str, width: usize, index: usize) -> String {
    let styled = match kind {
        FieldKind::Age => {
            let spread = spread_pair(value, width);
            if has_zero_years(value) {
                colours.muted(&spread).to_string()
            } else {
                colours.emphasis(&spread).to_string()
            }
        }
        FieldKind::Language => {
            let language = value.rsplit_once(char::is_whitespace).map_or(value, |(name, _)| name);
            colours.language(&spread_pair(value, width), language.trim()).to_string()
        }
        FieldKind::Size => {
            let spread = spread_pair(value, width);
            if value.contains("MB") {
                colours.emphasis(&spread).to_string()
            } else {
                colours.muted(&spread).to_string()
            }
        }
        FieldKind::Url => value.strip_prefix(GITHUB_PREFIX).unwrap_or(value).to_string(),
        FieldKind::Text | FieldKind::Count | FieldKind::Months => value.to_string(),
    };

    if index > 0 && value == "0" {
        colours.muted(value).to_string()
    } else {
        styled
    }
}

/// Place the two halves of `value` at opposite ends of `width`, at least one space apart
fn spread_pair(value: &str, width: usize) -> String {
    match value.trim().rsplit_once(char::is_whitespace) {
        Some((first, second)) => {
            let first = first.trim_end();
            let filler = width
                .saturating_sub(visible_width(first) + visible_width(second))
                .max(1);
            format!("{}{}{}", first, " ".repeat(filler), second)
        }
        None => left_aligned(value, width),
    }
}

fn has_zero_years(age: &str) -> bool {
    age.split_whitespace().next() == Some("0y")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> ColourManager {
        ColourManager::with_colours(false)
    }

    #[test]
    fn test_age_spread_to_width() {
        assert_eq!(format_cell(&plain(), FieldKind::Age, "5y 3m", 6, 2), "5y  3m");
        assert_eq!(format_cell(&plain(), FieldKind::Age, "12y 11m", 6, 2), "12y 11m");
    }

    #[test]
    fn test_language_keeps_multi_word_name() {
        assert_eq!(
            format_cell(&plain(), FieldKind::Language, "Jupyter Notebooks 9%", 22, 3),
            "Jupyter Notebooks   9%"
        );
    }

    #[test]
    fn test_single_token_is_padded() {
        assert_eq!(format_cell(&plain(), FieldKind::Size, "0", 4, 0), "0   ");
        assert_eq!(format_cell(&plain(), FieldKind::Language, "Go", 6, 3), "Go    ");
    }

    #[test]
    fn test_remote_prefix_stripped() {
        assert_eq!(
            format_cell(&plain(), FieldKind::Url, "https://github.com/acme/tool", 20, 1),
            "acme/tool"
        );
        assert_eq!(
            format_cell(&plain(), FieldKind::Url, "git@gitlab.com:acme/tool.git", 20, 1),
            "git@gitlab.com:acme/tool.git"
        );
    }

    #[test]
    fn test_zero_years_detected_by_token() {
        assert!(has_zero_years("0y 7m"));
        assert!(!has_zero_years("10y 2m"));
        assert!(!has_zero_years(""));
    }

    #[test]
    fn test_styling_applied_when_enabled() {
        let colours = ColourManager::from_color_args(false, true, None);
        colored::control::set_override(true);

        let zero = format_cell(&colours, FieldKind::Count, "0", 3, 4);
        assert!(zero.contains('\x1b'));
        assert_eq!(strip_ansi_escapes::strip_str(&zero), "0");

        let first_column = format_cell(&colours, FieldKind::Text, "0", 3, 0);
        assert_eq!(first_column, "0");

        let size = format_cell(&colours, FieldKind::Size, "12 MB", 6, 6);
        assert_eq!(strip_ansi_escapes::strip_str(&size), "12  MB");
        assert!(size.contains('\x1b'));

        colored::control::unset_override();
    }
}
