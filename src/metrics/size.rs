//! On-disk repository size

use std::path::Path;
use walkdir::WalkDir;

use crate::error::{ErrorContext, ReportError, ReportResult};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Whole-unit size such as `"12 MB"` or `"512 bytes"`
pub fn format_size(bytes: u64) -> String {
    match bytes {
        b if b >= GB => format!("{} GB", b / GB),
        b if b >= MB => format!("{} MB", b / MB),
        b if b >= KB => format!("{} KB", b / KB),
        b => format!("{} bytes", b),
    }
}

/// Sum of the sizes of every regular file below `dir`, `.git` included
pub fn directory_size<P: AsRef<Path>>(dir: P) -> ReportResult<u64> {
    let dir = dir.as_ref();
    let mut total = 0u64;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
            ReportError::io("directory_size", "failed to walk repository", source, ErrorContext::new().with("path", path))
        })?;
        if entry.file_type().is_file() {
            let metadata = entry.metadata().map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "metadata unavailable"));
                ReportError::io(
                    "directory_size",
                    "failed to read file metadata",
                    source,
                    ErrorContext::new().with("path", entry.path().display()),
                )
            })?;
            total += metadata.len();
        }
    }
    Ok(total)
}
