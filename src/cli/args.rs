//! Command line surface: one subcommand per report

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use log::debug;

use crate::logging::{parse_log_level, LogFormat};
use crate::report::ReportKind;

/// Repository metadata reporter
#[derive(Parser, Debug)]
#[command(name = "cerberus")]
#[command(about = "Summarise one or many local repositories as a Markdown table, optionally mirrored to CSV")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log down to debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log everything down to trace level
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log line format: text or json
    #[arg(long, value_name = "FORMAT", global = true)]
    pub log_format: Option<String>,

    /// Also append log lines to FILE
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Level for --log-file, defaulting to the console level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_file_level: Option<String>,

    /// Read settings from FILE instead of the discovered configuration
    #[arg(long, value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Configuration section consulted before all others
    #[arg(long, value_name = "SECTION", global = true)]
    pub config_name: Option<String>,

    /// Also emit the report as CSV, to stdout unless a file is named by --output or `[report] output`
    #[arg(long, global = true)]
    pub csv: bool,

    /// Write CSV to this file; implies --csv
    #[arg(short = 'o', long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Force coloured output even when not writing to a terminal
    #[arg(long, global = true)]
    pub color: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Commit activity, age, size and dominant language
    Stats(StatsArgs),
    /// README overview and license
    Describe(DescribeArgs),
    /// Remote URL of each repository
    Remember(TargetArgs),
}

/// Where to look for repositories
#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct TargetArgs {
    /// A repository, or a directory whose subdirectories are repositories
    #[arg(short = 'r', long = "repo", value_name = "PATH", default_value = ".")]
    pub repo: PathBuf,
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct StatsArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Year used for monthly frequency and quarterly totals (default: current year)
    #[arg(short = 'y', long, value_name = "YEAR")]
    pub year: Option<i32>,
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Maximum characters kept from the README overview
    #[arg(long, value_name = "N")]
    pub overview_length: Option<usize>,
}

impl Command {
    pub fn kind(&self) -> ReportKind {
        match self {
            Command::Stats(_) => ReportKind::Stats,
            Command::Describe(_) => ReportKind::Describe,
            Command::Remember(_) => ReportKind::Remember,
        }
    }

    pub fn repo(&self) -> &Path {
        match self {
            Command::Stats(args) => &args.target.repo,
            Command::Describe(args) => &args.target.repo,
            Command::Remember(args) => &args.repo,
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            Command::Stats(args) => args.year,
            _ => None,
        }
    }

    pub fn overview_length(&self) -> Option<usize> {
        match self {
            Command::Describe(args) => args.overview_length,
            _ => None,
        }
    }
}

pub fn parse_args() -> Args {
    let args = Args::parse();
    debug!("Command line: {:?}", args);
    args
}

/// Reject flag combinations clap cannot express
pub fn validate_args(args: &Args) -> Result<()> {
    let level_flags = [args.verbose, args.quiet, args.debug].into_iter().filter(|set| *set).count();
    if level_flags > 1 {
        bail!("Conflicting log level flags: pick one of --verbose, --quiet and --debug");
    }

    if let Some(format) = &args.log_format {
        format.parse::<LogFormat>().map_err(|e| anyhow!(e))?;
    }

    match (&args.log_file_level, &args.log_file) {
        (Some(_), None) => bail!("--log-file-level has no effect without --log-file"),
        (Some(level), Some(_)) => {
            parse_log_level(level)?;
        }
        _ => {}
    }

    if args.command.overview_length() == Some(0) {
        bail!("--overview-length must be positive");
    }
    Ok(())
}
