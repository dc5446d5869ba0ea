//! Commit frequency grouped by calendar month

use std::collections::BTreeMap;
use std::fmt;
use chrono::{DateTime, Datelike, FixedOffset};
use log::warn;

use super::age::GIT_DATE_FORMAT;

/// Commit counts keyed by `YYYY-MM`.
///
/// A map built with [`MonthFrequency::for_year`] always holds the twelve keys
/// of that year, zero-valued when a month saw no commits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthFrequency {
    counts: BTreeMap<String, u32>,
}

/// Quarterly commit totals (Jan-Mar, Apr-Jun, Jul-Sep, Oct-Dec)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quarters {
    pub q1: u32,
    pub q2: u32,
    pub q3: u32,
    pub q4: u32,
}

impl Quarters {
    pub fn total(&self) -> u32 {
        self.q1 + self.q2 + self.q3 + self.q4
    }
}

/// Canonical month key
pub fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

impl MonthFrequency {
    /// Twelve zero entries for `year`
    pub fn for_year(year: i32) -> Self {
        let counts = (1..=12).map(|m| (month_key(year, m), 0)).collect();
        Self { counts }
    }

    /// Build the map for `year` from `git log --format=%ci` output.
    ///
    /// Lines that do not parse are logged and skipped. Dates outside `year`
    /// are ignored so the map never grows beyond its twelve keys.
    pub fn from_git_log(year: i32, log_output: &str) -> Self {
        let mut frequency = Self::for_year(year);
        for line in log_output.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match DateTime::parse_from_str(line, GIT_DATE_FORMAT) {
                Ok(date) => {
                    if !frequency.record(&date) {
                        warn!("Ignoring commit date outside {}: {}", year, line);
                    }
                }
                Err(e) => warn!("Skipping unparseable commit date '{}': {}", line, e),
            }
        }
        frequency
    }

    /// Count one commit; returns false when its month is not tracked
    pub fn record(&mut self, date: &DateTime<FixedOffset>) -> bool {
        let key = month_key(date.year(), date.month());
        match self.counts.get_mut(&key) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum each fixed three-month group of `year`
    pub fn quarterly(&self, year: i32) -> Quarters {
        let sum = |months: [u32; 3]| months.iter().map(|m| self.get(&month_key(year, *m))).sum();
        Quarters {
            q1: sum([1, 2, 3]),
            q2: sum([4, 5, 6]),
            q3: sum([7, 8, 9]),
            q4: sum([10, 11, 12]),
        }
    }
}

impl fmt::Display for MonthFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
        write!(f, "{}", parts.join(" "))
    }
}
