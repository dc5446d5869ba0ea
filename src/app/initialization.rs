//! Application initialization and configuration

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use log::{debug, LevelFilter};
use std::str::FromStr;

use crate::report::{ReportSettings, DEFAULT_OVERVIEW_LENGTH};
use crate::{cli, config, display, logging};

pub fn load_configuration(args: &cli::Args) -> Result<config::ConfigManager> {
    let mut manager = if let Some(config_file) = &args.config_file {
        debug!("Loading configuration from explicit file: {}", config_file.display());
        config::ConfigManager::load_from_file(config_file.clone())?
    } else {
        config::ConfigManager::load()?
    };

    if let Some(section_name) = &args.config_name {
        manager.select_section(section_name.clone());
    }

    Ok(manager)
}

/// Logging setup from flags, then `[base]`, then defaults
pub fn configure_logging(args: &cli::Args, config: &config::ConfigManager) -> Result<logging::LogConfig> {
    let console_level = if args.debug {
        LevelFilter::Trace
    } else if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        config
            .get_log_level("base", "console-level")
            .context("Invalid console-level in configuration")?
            .unwrap_or(LevelFilter::Warn)
    };

    let format = match args.log_format.as_deref().or_else(|| config.get_value("base", "log-format").map(String::as_str)) {
        Some(format) => logging::LogFormat::from_str(format).map_err(|e| anyhow::anyhow!(e))?,
        None => logging::LogFormat::Text,
    };

    let log_file_path = args.log_file.clone().or_else(|| config.get_path("base", "log-file"));

    let file_level = match &args.log_file_level {
        Some(level) => Some(logging::parse_log_level(level)?),
        None => config
            .get_log_level("base", "file-log-level")
            .context("Invalid file-log-level in configuration")?,
    };

    let (destination, file_level) = match log_file_path {
        Some(path) => (logging::LogDestination::Both(path), Some(file_level.unwrap_or(console_level))),
        None if args.log_file_level.is_some() => {
            return Err(anyhow::anyhow!("Log file level specified without log file"));
        }
        None => (logging::LogDestination::Console, None),
    };

    Ok(logging::LogConfig {
        console_level,
        file_level,
        format,
        destination,
    })
}

/// Create a ColourManager from CLI arguments and configuration file
///
/// Precedence: --no-color > --color > config file > terminal detection.
pub fn create_colour_manager(args: &cli::Args, config: &config::ConfigManager) -> Result<display::ColourManager> {
    let colour_config = config.get_colour_config()?;
    let manager = display::ColourManager::from_color_args(args.no_color, args.color, colour_config);
    if manager.config().color_forced {
        colored::control::set_override(true);
    }
    Ok(manager)
}

/// Year, reference date and overview length for this run
pub fn report_settings(args: &cli::Args, config: &config::ConfigManager, today: NaiveDate) -> Result<ReportSettings> {
    let year = match args.command.year() {
        Some(year) => year,
        None => config.get_parsed::<i32>("report", "year")?.unwrap_or_else(|| today.year()),
    };

    let overview_length = match args.command.overview_length() {
        Some(length) => length,
        None => config
            .get_parsed::<usize>("report", "overview-length")?
            .unwrap_or(DEFAULT_OVERVIEW_LENGTH),
    };

    debug!("Report settings: year={} today={} overview-length={}", year, today, overview_length);
    Ok(ReportSettings { year, today, overview_length })
}
