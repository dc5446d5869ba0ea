//! Working-directory scoping for per-repository collection
//!
//! The process working directory is the one piece of shared mutable state
//! while a report runs. It is captured once, changed only through a
//! [`DirGuard`], and restored before the next repository is visited.

use std::env;
use std::path::{Path, PathBuf};
use log::{error, trace};

use crate::error::{ErrorContext, ReportError, ReportResult};

/// Directory captured when a report starts
#[derive(Debug, Clone)]
pub struct WorkingDirectory {
    original: PathBuf,
}

impl WorkingDirectory {
    /// Remember the current directory
    pub fn capture() -> ReportResult<Self> {
        let original = env::current_dir().map_err(|e| {
            ReportError::io("capture_directory", "failed to read current directory", e, ErrorContext::new())
        })?;
        Ok(Self { original })
    }

    pub fn original(&self) -> &Path {
        &self.original
    }

    /// Change into `path` when `change` is set; the returned guard restores
    /// the captured directory.
    pub fn enter(&self, path: &Path, change: bool) -> ReportResult<DirGuard<'_>> {
        if change {
            trace!("Entering {}", path.display());
            env::set_current_dir(path).map_err(|e| {
                ReportError::io(
                    "enter_repository",
                    "failed to change directory",
                    e,
                    ErrorContext::new().with("path", path.display()),
                )
            })?;
        }
        Ok(DirGuard { origin: &self.original, active: change })
    }

    /// Run `f` inside `path`, restoring the captured directory afterwards
    /// whether `f` succeeds or not.
    ///
    /// An error from `f` takes precedence over a failure to restore.
    pub fn within<T, F>(&self, path: &Path, change: bool, f: F) -> ReportResult<T>
    where
        F: FnOnce() -> ReportResult<T>,
    {
        let guard = self.enter(path, change)?;
        let result = f();
        match (result, guard.restore()) {
            (Err(e), Err(restore_err)) => {
                error!("Could not restore working directory: {}", restore_err);
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
            (Ok(_), Err(restore_err)) => Err(restore_err),
            (Ok(value), Ok(())) => Ok(value),
        }
    }
}

/// Restores the captured directory on [`DirGuard::restore`] or on drop
#[derive(Debug)]
pub struct DirGuard<'a> {
    origin: &'a Path,
    active: bool,
}

impl DirGuard<'_> {
    /// Restore explicitly so a failure can be reported
    pub fn restore(mut self) -> ReportResult<()> {
        self.reset()
    }

    fn reset(&mut self) -> ReportResult<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        trace!("Restoring {}", self.origin.display());
        env::set_current_dir(self.origin).map_err(|e| {
            ReportError::io(
                "restore_directory",
                "failed to restore working directory",
                e,
                ErrorContext::new().with("path", self.origin.display()),
            )
        })
    }
}

impl Drop for DirGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.reset() {
            error!("{}", e);
        }
    }
}

/// Serialises tests that change the process working directory
#[cfg(test)]
pub(crate) static CWD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
