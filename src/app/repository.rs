//! Repository path resolution

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, info, warn};

use crate::git;
use crate::report::RepoId;

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home_dir) => home_dir.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Repositories to report on.
///
/// A target holding a `.git` entry is a single repository. Otherwise every
/// immediate, non-hidden subdirectory is one, sorted by name.
pub fn resolve_repositories(target: &Path) -> Result<Vec<RepoId>> {
    let expanded = expand_home(target);
    if !expanded.exists() {
        anyhow::bail!(
            "Directory does not exist: {}\n\nPlease check the path and try again.",
            expanded.display()
        );
    }
    let root = expanded
        .canonicalize()
        .with_context(|| format!("Failed to resolve canonical path for: {}", expanded.display()))?;

    if root.join(".git").exists() {
        let name = display_name(&root);
        info!("Reporting on single repository {}", name);
        return Ok(vec![RepoId::new(name, root)]);
    }

    let mut repos = Vec::new();
    let entries = fs::read_dir(&root).with_context(|| format!("Failed to list directory: {}", root.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", root.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to inspect {}", entry.path().display()))?;
        if file_type.is_dir() {
            if !git::is_git_repository(entry.path()) {
                warn!("{} does not look like a git repository", name);
            }
            repos.push(RepoId::new(name, entry.path()));
        }
    }
    repos.sort_by(|a, b| a.name.cmp(&b.name));

    debug!("Resolved {} repositories under {}", repos.len(), root.display());
    Ok(repos)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
