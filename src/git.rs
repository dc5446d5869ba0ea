//! Version-control queries
//!
//! Repository detection goes through `git2`; history queries shell out to
//! the `git` binary in the repository directory and hand raw text to the
//! metrics parsers.

use std::path::Path;
use chrono::NaiveDate;
use git2::Repository;
use log::debug;

use crate::error::{ErrorContext, ReportError, ReportResult};
use crate::metrics::{MonthFrequency, RepoAge};
use crate::process;

/// Check if the given path is the root of a git repository
pub fn is_git_repository<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    match Repository::open(path) {
        Ok(_) => {
            debug!("Git repository detected at: {}", path.display());
            true
        }
        Err(e) => {
            debug!("Not a git repository at {}: {}", path.display(), e);
            false
        }
    }
}

/// Number of commits reachable from HEAD
pub fn commit_count<P: AsRef<Path>>(dir: P) -> ReportResult<u32> {
    let out = process::capture("git", &["rev-list", "--count", "HEAD"], dir)?;
    let trimmed = out.trim();
    trimmed.parse::<u32>().map_err(|e| {
        ReportError::data(
            "commit_count",
            format!("unexpected rev-list output: {}", e),
            ErrorContext::new().with("output", trimmed),
        )
    })
}

/// Age of the repository measured from its oldest commit
pub fn repository_age<P: AsRef<Path>>(dir: P, today: NaiveDate) -> ReportResult<RepoAge> {
    let out = process::capture("git", &["log", "--reverse", "--format=%ci"], dir)?;
    RepoAge::from_git_log(&out, today)
}

/// Commits per month for `year`
pub fn commit_frequency<P: AsRef<Path>>(dir: P, year: i32) -> ReportResult<MonthFrequency> {
    let since = format!("{}-01-01T00:00:00", year);
    let until = format!("{}-12-31T23:59:59", year);
    let out = process::capture(
        "git",
        &["log", "--since", &since, "--until", &until, "--format=%ci"],
        dir,
    )?;
    Ok(MonthFrequency::from_git_log(year, &out))
}

/// Fetch URL of the `origin` remote, or an empty string when there is none
pub fn remote_url<P: AsRef<Path>>(dir: P) -> ReportResult<String> {
    let out = process::capture("git", &["remote", "-v"], dir)?;
    Ok(parse_remote_url(&out))
}

/// Extract the `origin` URL from `git remote -v` output
pub fn parse_remote_url(remote_output: &str) -> String {
    remote_output
        .lines()
        .filter(|line| line.starts_with("origin"))
        .find_map(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string()
}
