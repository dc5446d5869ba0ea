//! End-to-end report generation over fixture repositories built with git2
//!
//! History and remote queries shell out to `git`; tests return early when the
//! binary is not installed.

use cerberus::display::ColourManager;
use cerberus::report::{generate, ReportKind, ReportSettings, RepoId};
use cerberus::{app, git};
use chrono::NaiveDate;
use git2::{Repository, Signature, Time};
use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

/// Rendering several repositories changes the process directory
static CWD: Mutex<()> = Mutex::new(());

fn git_available() -> bool {
    Command::new("git").arg("--version").output().map(|o| o.status.success()).unwrap_or(false)
}

fn settings() -> ReportSettings {
    ReportSettings {
        year: 2025,
        today: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        overview_length: 40,
    }
}

/// Initialise a repository with an optional origin remote
fn create_repo(dir: &Path, origin: Option<&str>) -> Repository {
    fs::create_dir_all(dir).unwrap();
    let repo = Repository::init(dir).expect("Failed to init test repository");
    if let Some(url) = origin {
        repo.remote("origin", url).expect("Failed to add origin");
    }
    repo
}

/// Commit `file` with committer and author time `epoch` (UTC)
fn commit_at(repo: &Repository, file: &str, epoch: i64) {
    let workdir = repo.workdir().unwrap();
    fs::write(workdir.join(file), format!("{}\n", epoch)).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(file)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let signature = Signature::new("Fixture", "fixture@example.com", &Time::new(epoch, 0)).unwrap();
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, file, &tree, &parents).unwrap();
}

fn epoch(date: &str) -> i64 {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp()
}

#[test]
fn test_remember_over_repository_collection() {
    if !git_available() {
        return;
    }
    let _lock = CWD.lock().unwrap_or_else(|e| e.into_inner());
    let before = std::env::current_dir().unwrap();

    let root = TempDir::new().unwrap();
    create_repo(&root.path().join("beta"), None);
    create_repo(&root.path().join("alpha"), Some("https://github.com/acme/alpha.git"));
    fs::create_dir(root.path().join(".cache")).unwrap();

    let repos = app::resolve_repositories(root.path()).unwrap();
    let colours = ColourManager::with_colours(false);
    let layout = ReportKind::Remember.default_layout(settings().overview_length);
    let report = generate(ReportKind::Remember, &repos, &layout, &settings(), &colours, true).unwrap();

    let lines: Vec<&str> = report.markdown.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("| Repo "));
    assert!(lines[2].starts_with("| alpha "));
    assert!(lines[2].contains("acme/alpha.git"));
    assert!(!lines[2].contains("https://"));
    assert!(lines[3].starts_with("| beta "));

    assert_eq!(
        report.csv.unwrap(),
        "Repo,Remote\nalpha,https://github.com/acme/alpha.git\nbeta,\n"
    );
    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
fn test_describe_single_repository() {
    if !git_available() {
        return;
    }
    let root = TempDir::new().unwrap();
    let path = root.path().join("tool");
    create_repo(&path, Some("git@example.com:acme/tool.git"));
    fs::write(
        path.join("README.md"),
        "# Tool\n\n## Overview\n\nA command line helper that keeps\nrepository notes in one place.\n\n## Usage\n\nrun it\n",
    )
    .unwrap();
    fs::write(path.join("LICENSE"), "MIT License\n\nCopyright (c) Acme\n").unwrap();

    let repos = app::resolve_repositories(&path).unwrap();
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].name, "tool");

    let colours = ColourManager::with_colours(false);
    let layout = ReportKind::Describe.default_layout(settings().overview_length);
    let report = generate(ReportKind::Describe, &repos, &layout, &settings(), &colours, true).unwrap();

    let csv = report.csv.unwrap();
    let mut rows = csv.lines();
    assert_eq!(rows.next(), Some("Repo,Overview,License"));
    assert_eq!(rows.next(), Some("tool,A command line helper that keeps reposit,MIT"));
    assert!(report.markdown.contains("A command line helper that keeps reposit"));
}

#[test]
fn test_failing_repository_aborts_report() {
    if !git_available() {
        return;
    }
    let _lock = CWD.lock().unwrap_or_else(|e| e.into_inner());
    let before = std::env::current_dir().unwrap();

    let root = TempDir::new().unwrap();
    create_repo(&root.path().join("alpha"), Some("https://github.com/acme/alpha.git"));
    let missing = RepoId::new("gone", root.path().join("gone"));
    let repos = vec![RepoId::new("alpha", root.path().join("alpha")), missing];

    let colours = ColourManager::with_colours(false);
    let layout = ReportKind::Remember.default_layout(settings().overview_length);
    let err = generate(ReportKind::Remember, &repos, &layout, &settings(), &colours, true).unwrap_err();

    assert_eq!(err.operation(), "render");
    assert!(err.to_string().contains("'gone'"));
    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
fn test_history_queries_on_dated_commits() {
    if !git_available() {
        return;
    }
    let root = TempDir::new().unwrap();
    let repo = create_repo(root.path(), None);
    commit_at(&repo, "a.txt", epoch("2020-03-01"));
    commit_at(&repo, "b.txt", epoch("2025-02-10"));
    commit_at(&repo, "c.txt", epoch("2025-05-20"));
    commit_at(&repo, "d.txt", epoch("2025-05-21"));

    assert_eq!(git::commit_count(root.path()).unwrap(), 4);

    let age = git::repository_age(root.path(), settings().today).unwrap();
    assert_eq!(age.to_string(), "5y 3m");

    let frequency = git::commit_frequency(root.path(), 2025).unwrap();
    assert_eq!(frequency.len(), 12);
    assert_eq!(frequency.get("2025-02"), 1);
    assert_eq!(frequency.get("2025-05"), 2);
    assert_eq!(frequency.total(), 3);
    let quarters = frequency.quarterly(2025);
    assert_eq!((quarters.q1, quarters.q2, quarters.q3, quarters.q4), (1, 2, 0, 0));
}

#[test]
fn test_empty_repository_has_no_age() {
    if !git_available() {
        return;
    }
    let root = TempDir::new().unwrap();
    create_repo(root.path(), None);
    assert!(git::repository_age(root.path(), settings().today).is_err());
}
