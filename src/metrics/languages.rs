//! Dominant language detection from `tokei -C` output

use std::path::Path;
use log::debug;

use crate::error::{ErrorContext, ReportError, ReportResult};
use crate::process;

/// A count together with its integer share of the matching total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Share {
    pub count: u64,
    pub percentage: u64,
}

impl Share {
    fn of(count: u64, total: u64) -> Self {
        Self { count, percentage: count * 100 / total }
    }
}

/// Counts of the language with the most lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageStats {
    pub language: String,
    pub files: Share,
    pub lines: Share,
    pub code: Share,
    pub comments: Share,
    pub blanks: Share,
}

impl LanguageStats {
    /// `"<language> <line share>%"`, as shown in the stats table
    pub fn label(&self) -> String {
        format!("{} {}%", self.language, self.lines.percentage)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Counts([u64; 5]);

impl Counts {
    fn lines(&self) -> u64 {
        self.0[1]
    }
}

/// Split a row into its name and five trailing integer columns
fn parse_row(line: &str) -> Option<(String, Counts)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 6 {
        return None;
    }
    let (name, numbers) = tokens.split_at(tokens.len() - 5);
    let mut counts = [0u64; 5];
    for (slot, token) in counts.iter_mut().zip(numbers) {
        *slot = token.parse().ok()?;
    }
    Some((name.join(" "), Counts(counts)))
}

/// Find the language with the largest line count.
///
/// Ties keep the first language encountered. Fails when the `Total` row is
/// missing or any of its five totals is zero.
pub fn dominant_language(output: &str) -> ReportResult<LanguageStats> {
    let mut totals: Option<Counts> = None;
    let mut dominant: Option<(String, Counts)> = None;

    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('=') || trimmed.starts_with('-') {
            continue;
        }
        let Some((name, counts)) = parse_row(trimmed) else {
            continue;
        };
        if name.eq_ignore_ascii_case("total") {
            totals = Some(counts);
            continue;
        }
        let replace = match &dominant {
            Some((_, best)) => counts.lines() > best.lines(),
            None => true,
        };
        if replace {
            dominant = Some((name, counts));
        }
    }

    let totals = totals.unwrap_or_default();
    if totals.0.iter().any(|t| *t == 0) {
        return Err(ReportError::data(
            "dominant_language",
            "total counts are zero, invalid data",
            ErrorContext::new()
                .with("files", totals.0[0])
                .with("lines", totals.0[1])
                .with("code", totals.0[2])
                .with("comments", totals.0[3])
                .with("blanks", totals.0[4]),
        ));
    }
    let Some((language, counts)) = dominant else {
        return Err(ReportError::data("dominant_language", "no language rows found", ErrorContext::new()));
    };

    debug!("Dominant language: {} ({} lines)", language, counts.lines());
    let [files, lines, code, comments, blanks] = counts.0;
    Ok(LanguageStats {
        language,
        files: Share::of(files, totals.0[0]),
        lines: Share::of(lines, totals.0[1]),
        code: Share::of(code, totals.0[2]),
        comments: Share::of(comments, totals.0[3]),
        blanks: Share::of(blanks, totals.0[4]),
    })
}

/// Run `tokei -C` in `dir` and pick the dominant language
pub fn code_statistics<P: AsRef<Path>>(dir: P) -> ReportResult<LanguageStats> {
    let output = process::capture("tokei", &["-C"], dir)?;
    dominant_language(&output)
}
