//! Synchronous invocation of external analyzers

use std::path::Path;
use std::process::Command;
use log::{debug, trace};

use crate::error::{ErrorContext, ReportError, ReportResult};

/// Run `program` with `args` inside `dir` and return its standard output.
///
/// A spawn failure, a non-zero exit status or non UTF-8 output are all
/// reported as process errors carrying the command line and directory.
pub fn capture<P: AsRef<Path>>(program: &str, args: &[&str], dir: P) -> ReportResult<String> {
    let dir = dir.as_ref();
    let command_line = if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    };
    let context = || {
        ErrorContext::new()
            .with("command", &command_line)
            .with("directory", dir.display())
    };

    debug!("Running '{}' in {}", command_line, dir.display());

    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| ReportError::process("capture", format!("failed to start {}: {}", program, e), context()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let status = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        return Err(ReportError::process(
            "capture",
            format!("{} exited unsuccessfully", program),
            context().with("status", status).with("stderr", stderr),
        ));
    }

    let stdout = String::from_utf8(output.stdout)
        .map_err(|_| ReportError::process("capture", "command produced non UTF-8 output", context()))?;

    trace!("'{}' produced {} bytes", command_line, stdout.len());
    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_program_is_process_error() {
        let dir = TempDir::new().unwrap();
        let err = capture("definitely-not-a-real-program-xyz", &["--version"], dir.path()).unwrap_err();
        assert!(matches!(err, ReportError::Process { .. }));
        assert!(err.to_string().contains("definitely-not-a-real-program-xyz --version"));
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_runs_in_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
        let out = capture("ls", &[], dir.path()).unwrap();
        assert!(out.contains("marker.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = capture("ls", &["does-not-exist"], dir.path()).unwrap_err();
        assert!(err.to_string().contains("exited unsuccessfully"));
    }
}
