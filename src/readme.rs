//! README overview and LICENSE classification

use std::fs;
use std::path::Path;

use crate::error::{ErrorContext, ReportError, ReportResult};

pub const README_FILE: &str = "README.md";
pub const LICENSE_FILE: &str = "LICENSE";

/// Keyword table checked in order against the lowercased license text
const LICENSE_KEYWORDS: &[(&str, &str)] = &[
    ("mit license", "MIT"),
    ("apache license", "Apache-2.0"),
    ("gnu general public license", "GPL"),
    ("bsd license", "BSD"),
    ("mozilla public license", "MPL"),
    ("creative commons", "CC"),
    ("eclipse public license", "EPL"),
];

pub const UNKNOWN_LICENSE: &str = "Unknown";

fn read(path: &Path, operation: &'static str) -> ReportResult<String> {
    fs::read_to_string(path).map_err(|e| {
        ReportError::io(operation, "failed to read file", e, ErrorContext::new().with("filename", path.display()))
    })
}

/// Text under `## Overview` up to the next `## ` heading, lines joined by a
/// single space and cut to at most `max_chars` characters.
pub fn extract_overview(content: &str, max_chars: usize) -> String {
    let section: Vec<&str> = content
        .lines()
        .map(str::trim)
        .skip_while(|line| !line.starts_with("## Overview"))
        .skip(1)
        .take_while(|line| !line.starts_with("## "))
        .filter(|line| !line.is_empty())
        .collect();
    section.join(" ").chars().take(max_chars).collect()
}

/// Classify license text against the keyword table
pub fn classify_license(content: &str) -> &'static str {
    let lowered = content.to_lowercase();
    LICENSE_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, license)| *license)
        .unwrap_or(UNKNOWN_LICENSE)
}

/// Overview of `dir/README.md`; empty when the file does not exist
pub fn readme_overview<P: AsRef<Path>>(dir: P, max_chars: usize) -> ReportResult<String> {
    let path = dir.as_ref().join(README_FILE);
    if !path.is_file() {
        return Ok(String::new());
    }
    Ok(extract_overview(&read(&path, "readme_overview")?, max_chars))
}

/// License of `dir/LICENSE`; empty when the file does not exist
pub fn detect_license<P: AsRef<Path>>(dir: P) -> ReportResult<String> {
    let path = dir.as_ref().join(LICENSE_FILE);
    if !path.is_file() {
        return Ok(String::new());
    }
    Ok(classify_license(&read(&path, "detect_license")?).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const README: &str = "# Project\n\nIntro text.\n\n## Overview\n\nFirst line of the overview.\n  Second line.  \n\n## Installation\n\ncargo install\n";

    #[test]
    fn test_extract_overview_section() {
        assert_eq!(extract_overview(README, 200), "First line of the overview. Second line.");
    }

    #[test]
    fn test_extract_overview_truncates_on_char_boundary() {
        assert_eq!(extract_overview(README, 10), "First line");
        let accented = "## Overview\nÀéîõü ñ\n";
        assert_eq!(extract_overview(accented, 3), "Àéî");
    }

    #[test]
    fn test_extract_overview_missing_section() {
        assert_eq!(extract_overview("# Title\n\n## Usage\nrun it\n", 50), "");
    }

    #[test]
    fn test_overview_runs_to_end_of_file() {
        assert_eq!(extract_overview("## Overview\nonly section\n", 50), "only section");
    }

    #[test]
    fn test_classify_license() {
        assert_eq!(classify_license("The MIT License (MIT)\nCopyright"), "MIT");
        assert_eq!(classify_license("Apache License\nVersion 2.0"), "Apache-2.0");
        assert_eq!(classify_license("GNU GENERAL PUBLIC LICENSE\nVersion 3"), "GPL");
        assert_eq!(classify_license("All rights reserved."), UNKNOWN_LICENSE);
    }

    #[test]
    fn test_missing_files_are_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(readme_overview(dir.path(), 92).unwrap(), "");
        assert_eq!(detect_license(dir.path()).unwrap(), "");
    }

    #[test]
    fn test_reads_files_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(README_FILE), README).unwrap();
        fs::write(dir.path().join(LICENSE_FILE), "Mozilla Public License Version 2.0").unwrap();
        assert_eq!(readme_overview(dir.path(), 5).unwrap(), "First");
        assert_eq!(detect_license(dir.path()).unwrap(), "MPL");
    }
}
