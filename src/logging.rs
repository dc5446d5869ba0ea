// Logging for cerberus
//
// A `log::Log` implementation writing text or JSON lines to stderr, to a
// file, or to both, each destination with its own level. The report itself
// goes to stdout, so log lines never interleave with table output.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Unknown log format '{}' (expected text or json)", other)),
        }
    }
}

/// Where log lines go; the file variants carry the log file path
#[derive(Debug, Clone, PartialEq)]
pub enum LogDestination {
    Console,
    File(PathBuf),
    Both(PathBuf),
}

impl LogDestination {
    fn file(&self) -> Option<&Path> {
        match self {
            LogDestination::Console => None,
            LogDestination::File(path) | LogDestination::Both(path) => Some(path),
        }
    }

    fn console(&self) -> bool {
        !matches!(self, LogDestination::File(_))
    }
}

/// One line of `--log-format json` output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub console_level: LevelFilter,
    pub file_level: Option<LevelFilter>,
    pub format: LogFormat,
    pub destination: LogDestination,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: LevelFilter::Warn,
            file_level: None,
            format: LogFormat::Text,
            destination: LogDestination::Console,
        }
    }
}

impl LogConfig {
    /// Most verbose level any destination accepts
    pub fn max_level(&self) -> LevelFilter {
        let console = if self.destination.console() { self.console_level } else { LevelFilter::Off };
        let file = if self.destination.file().is_some() { self.file_level.unwrap_or(self.console_level) } else { LevelFilter::Off };
        console.max(file)
    }
}

pub struct CerberusLogger {
    config: LogConfig,
    file: Option<Mutex<File>>,
}

impl CerberusLogger {
    /// Build the logger, opening the log file for appending when one is configured
    pub fn new(config: LogConfig) -> Result<Self> {
        let file = match config.destination.file() {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Cannot open log file {}", path.display()))?;
                Some(Mutex::new(file))
            }
            None => None,
        };
        Ok(Self { config, file })
    }

    fn format_line(&self, level: Level, target: &str, message: &str) -> String {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let text = || format!("{} [{}] {}", stamp, level, message);
        if self.config.format == LogFormat::Text {
            return text();
        }
        let entry = JsonLogEntry {
            timestamp: stamp.clone(),
            level: level.to_string(),
            target: target.to_owned(),
            message: message.to_owned(),
        };
        serde_json::to_string(&entry).unwrap_or_else(|_| text())
    }

    fn console_accepts(&self, level: Level) -> bool {
        self.config.destination.console() && level <= self.config.console_level
    }

    fn file_accepts(&self, level: Level) -> bool {
        self.file.is_some() && level <= self.config.file_level.unwrap_or(self.config.console_level)
    }

    fn write_to_file(&self, line: &str) -> io::Result<()> {
        if let Some(file) = &self.file {
            let mut file = file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}

impl log::Log for CerberusLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        let level = metadata.level();
        self.console_accepts(level) || self.file_accepts(level)
    }

    fn log(&self, record: &log::Record) {
        let level = record.level();
        let (console, file) = (self.console_accepts(level), self.file_accepts(level));
        if !console && !file {
            return;
        }

        let line = self.format_line(level, record.target(), &record.args().to_string());
        if console {
            let _ = writeln!(io::stderr(), "{}", line);
        }
        if file {
            if let Err(e) = self.write_to_file(&line) {
                let _ = writeln!(io::stderr(), "Cannot write log file: {}", e);
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Install the logger for the whole process
pub fn init_logger(config: LogConfig) -> Result<()> {
    let max_level = config.max_level();
    let logger = CerberusLogger::new(config)?;
    log::set_boxed_logger(Box::new(logger)).context("A logger is already installed")?;
    log::set_max_level(max_level);
    Ok(())
}

/// Level names are case insensitive
pub fn parse_log_level(name: &str) -> Result<LevelFilter> {
    name.trim()
        .parse::<LevelFilter>()
        .map_err(|_| anyhow!("Unknown log level '{}' (expected error, warn, info, debug, trace or off)", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("warn").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_log_level("TRACE").unwrap(), LevelFilter::Trace);
        assert_eq!(parse_log_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_logger_installs_once_per_process() {
        assert!(init_logger(LogConfig::default()).is_ok());
        assert_eq!(log::max_level(), LevelFilter::Warn);
        assert!(init_logger(LogConfig::default()).is_err());
    }

    #[test]
    fn test_default_console_level_is_warn() {
        assert_eq!(LogConfig::default().console_level, LevelFilter::Warn);
        assert_eq!(LogConfig::default().max_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_max_level_covers_file() {
        let config = LogConfig {
            console_level: LevelFilter::Error,
            file_level: Some(LevelFilter::Debug),
            format: LogFormat::Text,
            destination: LogDestination::Both(PathBuf::from("unused.log")),
        };
        assert_eq!(config.max_level(), LevelFilter::Debug);

        let file_only = LogConfig { destination: LogDestination::File(PathBuf::from("unused.log")), ..config };
        assert_eq!(file_only.max_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_text_line_format() {
        let logger = CerberusLogger::new(LogConfig::default()).unwrap();
        let line = logger.format_line(Level::Info, "cerberus", "Rendering alpha");
        assert!(line.ends_with("[INFO] Rendering alpha"));
        assert_eq!(line.chars().nth(4), Some('-'));
        assert_eq!(line.chars().nth(10), Some(' '));
        assert_eq!(line.chars().nth(13), Some(':'));
    }

    #[test]
    fn test_json_line_format() {
        let logger = CerberusLogger::new(LogConfig { format: LogFormat::Json, ..LogConfig::default() }).unwrap();
        let line = logger.format_line(Level::Warn, "cerberus::git", "no origin");
        let entry: JsonLogEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(entry.level, "WARN");
        assert_eq!(entry.target, "cerberus::git");
        assert_eq!(entry.message, "no origin");
    }

    #[test]
    fn test_file_destination_receives_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cerberus.log");
        let logger = CerberusLogger::new(LogConfig {
            console_level: LevelFilter::Off,
            file_level: Some(LevelFilter::Debug),
            format: LogFormat::Text,
            destination: LogDestination::File(path.clone()),
        })
        .unwrap();

        logger.log(
            &log::Record::builder()
                .level(Level::Debug)
                .target("cerberus")
                .args(format_args!("Rendering beta"))
                .build(),
        );
        logger.log(
            &log::Record::builder()
                .level(Level::Trace)
                .target("cerberus")
                .args(format_args!("hidden"))
                .build(),
        );
        logger.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[DEBUG] Rendering beta"));
        assert!(!content.contains("hidden"));
    }
}
