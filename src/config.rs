//! Layered TOML configuration
//!
//! Files are flattened into `section -> key -> string` maps; typed getters
//! parse on demand so a bad value is reported where it is used.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};
use toml::Value;

use crate::display::{Alignment, ColourConfig, ColourTheme, TableLayout};
use crate::report::ReportKind;

/// Flattened settings keyed by dotted section name
pub type Configuration = HashMap<String, HashMap<String, String>>;

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV: &str = "CERBERUS_CONFIG";

const BASE_SECTION: &str = "base";

#[derive(Debug, Default)]
pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
    selected_section: Option<String>,
}

impl ConfigManager {
    pub fn from_config(config: Configuration) -> Self {
        Self { config, ..Self::default() }
    }

    /// First existing file from the discovery list, or empty settings
    pub fn load() -> Result<Self> {
        match discover_config_files().into_iter().find(|path| path.is_file()) {
            Some(path) => Self::load_from_file(path),
            None => {
                info!("No configuration file found; built-in defaults apply");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read configuration {}", path.display()))?;
        let config = parse_toml_config(&content)
            .with_context(|| format!("Cannot parse configuration {}", path.display()))?;

        info!("Using configuration {}", path.display());
        Ok(Self {
            config,
            config_file_path: Some(path),
            ..Self::default()
        })
    }

    pub fn config_file_path(&self) -> Option<&Path> {
        self.config_file_path.as_deref()
    }

    /// Looks in the `--config-name` section, then `section`, then `base`
    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        self.selected_section
            .as_deref()
            .into_iter()
            .chain([section, BASE_SECTION])
            .find_map(|name| self.config.get(name)?.get(key))
    }

    /// All keys of one section, without fallback
    pub fn section(&self, section: &str) -> Option<&HashMap<String, String>> {
        self.config.get(section)
    }

    pub fn select_section(&mut self, section: String) {
        debug!("Configuration section {} selected", section);
        self.selected_section = Some(section);
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        self.get_value(section, key)
            .map(|value| match value.to_lowercase().as_str() {
                "true" | "yes" | "on" => Ok(true),
                "false" | "no" | "off" => Ok(false),
                _ => Err(anyhow!("{}.{} must be true or false, found {}", section, key, value)),
            })
            .transpose()
    }

    /// Parse a value with `FromStr`
    pub fn get_parsed<T>(&self, section: &str, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_value(section, key)
            .map(|value| {
                value
                    .trim()
                    .parse::<T>()
                    .map_err(|e| anyhow!("Invalid value for {}.{}: {} ({})", section, key, value, e))
            })
            .transpose()
    }

    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<log::LevelFilter>> {
        self.get_value(section, key)
            .map(|value| crate::logging::parse_log_level(value))
            .transpose()
    }

    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }

    /// Comma separated list of strings; arrays are stored this way
    pub fn get_string_list(&self, section: &str, key: &str) -> Option<Vec<String>> {
        self.get_value(section, key).map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()
        })
    }

    /// List of positive integers, used for column widths
    pub fn get_usize_list(&self, section: &str, key: &str) -> Result<Option<Vec<usize>>> {
        let Some(items) = self.get_string_list(section, key) else {
            return Ok(None);
        };
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            let value = item
                .parse::<usize>()
                .with_context(|| format!("Invalid {}.{} entry: {}", section, key, item))?;
            if value == 0 {
                bail!("Invalid {}.{} entry: widths must be positive", section, key);
            }
            values.push(value);
        }
        Ok(Some(values))
    }

    /// Colour settings from `[base] color` and `[base] theme`
    pub fn get_colour_config(&self) -> Result<Option<ColourConfig>> {
        let enabled = self.get_bool("base", "color")?;
        let theme = match self.get_value("base", "theme") {
            Some(name) => Some(
                ColourTheme::from_name(name)
                    .ok_or_else(|| anyhow!("Invalid colour theme: {}. Valid themes: auto, light, dark", name))?,
            ),
            None => None,
        };
        if enabled.is_none() && theme.is_none() {
            return Ok(None);
        }

        let mut config = ColourConfig::default();
        if let Some(enabled) = enabled {
            config.set_enabled(enabled);
        }
        if let Some(theme) = theme {
            config.set_theme(theme);
        }
        Ok(Some(config))
    }

    /// Table layout for `kind`: the built-in layout overridden by
    /// `[report.<kind>] widths`/`omit` and `[align.<kind>]`
    pub fn report_layout(&self, kind: ReportKind, overview_length: usize) -> Result<TableLayout> {
        let mut layout = kind.default_layout(overview_length);
        let section = format!("report.{}", kind.name());

        if let Some(widths) = self.get_usize_list(&section, "widths")? {
            debug!("Configured widths for {}: {:?}", kind, widths);
            layout.widths = widths;
        }
        if let Some(omit) = self.get_string_list(&section, "omit") {
            layout.omit = omit;
        }

        if let Some(alignments) = self.section(&format!("align.{}", kind.name())) {
            for (field, value) in alignments {
                let alignment = value
                    .parse::<Alignment>()
                    .with_context(|| format!("Invalid alignment for {} in align.{}", field, kind.name()))?;
                layout.alignments.insert(field.clone(), alignment);
            }
        }

        Ok(layout)
    }
}

/// Candidate files, most specific first: `$CERBERUS_CONFIG`, the user
/// config directory, `~/.cerberus.toml`, then `./.cerberus.toml`
fn discover_config_files() -> Vec<PathBuf> {
    let explicit = env::var_os(CONFIG_ENV).map(PathBuf::from);
    let xdg = dirs::config_dir().map(|dir| dir.join("cerberus").join("config.toml"));
    let home = dirs::home_dir().map(|dir| dir.join(".cerberus.toml"));

    let paths: Vec<PathBuf> = [explicit, xdg, home, Some(PathBuf::from("./.cerberus.toml"))]
        .into_iter()
        .flatten()
        .collect();
    debug!("Configuration candidates: {:?}", paths);
    paths
}

fn parse_toml_config(content: &str) -> Result<Configuration> {
    let table: toml::Table = content.parse().context("Invalid TOML")?;
    let mut config = Configuration::new();
    flatten_toml_table(&table, "", &mut config);
    Ok(config)
}

/// Flatten TOML tables into dotted section names.
///
/// Scalars and arrays stay in the section of the table holding them; top
/// level scalars land in `base`.
fn flatten_toml_table(table: &toml::Table, prefix: &str, config: &mut Configuration) {
    for (key, value) in table {
        match value {
            Value::Table(subtable) => {
                let section_name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                config.entry(section_name.clone()).or_default();
                flatten_toml_table(subtable, &section_name, config);
            }
            _ => {
                let section_name = if prefix.is_empty() { BASE_SECTION } else { prefix };
                config
                    .entry(section_name.to_string())
                    .or_default()
                    .insert(key.clone(), toml_value_to_string(value));
            }
        }
    }
}

/// Arrays become comma separated lists
fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(d) => d.to_string(),
        Value::Array(items) => items.iter().map(toml_value_to_string).collect::<Vec<_>>().join(","),
        Value::Table(_) => value.to_string(),
    }
}
