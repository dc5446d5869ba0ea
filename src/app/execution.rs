//! Report execution and output

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use log::{info, warn};

use crate::display::{ColourManager, RenderedReport};
use crate::report::{self, ReportSettings};
use crate::{cli, config};
use super::repository::resolve_repositories;

/// Build the requested report and write it to `out` (and the CSV file, if any)
pub fn run_report<W: Write>(
    args: &cli::Args,
    config: &config::ConfigManager,
    colours: &ColourManager,
    settings: &ReportSettings,
    out: &mut W,
) -> Result<()> {
    let kind = args.command.kind();
    let repos = resolve_repositories(args.command.repo())?;
    if repos.is_empty() {
        warn!("No repositories found under {}", args.command.repo().display());
    }

    let layout = config
        .report_layout(kind, settings.overview_length)
        .with_context(|| format!("Invalid layout for the {} report", kind))?;

    let (emit_csv, csv_path) = csv_request(args, config);
    let rendered = report::generate(kind, &repos, &layout, settings, colours, emit_csv)
        .with_context(|| format!("Failed to generate the {} report", kind))?;

    write_report(&rendered, csv_path.as_deref(), out)
}

/// Whether CSV is wanted and the file it goes to.
///
/// `-o` wins over `[report] output`; either one turns CSV on, and `--csv`
/// without a path sends it to stdout.
pub fn csv_request(args: &cli::Args, config: &config::ConfigManager) -> (bool, Option<PathBuf>) {
    let path = args.output.clone().or_else(|| config.get_path("report", "output"));
    (args.csv || path.is_some(), path)
}

/// Markdown first, then CSV to `csv_path` or, without one, to `out`
pub fn write_report<W: Write>(report: &RenderedReport, csv_path: Option<&Path>, out: &mut W) -> Result<()> {
    out.write_all(report.markdown.as_bytes())
        .context("Failed to write report")?;

    if let Some(csv) = &report.csv {
        match csv_path {
            Some(path) => {
                fs::write(path, csv).with_context(|| format!("Failed to write CSV to {}", path.display()))?;
                info!("CSV written to {}", path.display());
            }
            None => {
                writeln!(out).context("Failed to write report")?;
                out.write_all(csv.as_bytes()).context("Failed to write CSV")?;
            }
        }
    }

    out.flush().context("Failed to flush output")
}
